//! Host error codes
//!
//! Every host service reports failures with this one type. Each variant maps
//! onto the negative status code a kernel-style host expects back from probe
//! and prepare callbacks.

use core::fmt;

/// Failure reported by a host service or a driver callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Allocation failed (`-ENOMEM`)
    NoMemory,
    /// No such device, or the device does not match (`-ENODEV`)
    NoDevice,
    /// Bus transfer failed (`-EIO`)
    Io,
    /// Bad parameter (`-EINVAL`)
    InvalidArgument,
    /// Resource already claimed (`-EBUSY`)
    Busy,
    /// Transfer did not complete in time (`-ETIMEDOUT`)
    TimedOut,
    /// Operation not supported by the host (`-EOPNOTSUPP`)
    NotSupported,
    /// A dependency is not ready yet, retry the probe later (`-EPROBE_DEFER`)
    ProbeDefer,
    /// Any other negative status code
    Other(i32),
}

impl Error {
    /// Negative status code for this error
    pub const fn errno(self) -> i32 {
        match self {
            Error::NoMemory => -12,
            Error::NoDevice => -19,
            Error::Io => -5,
            Error::InvalidArgument => -22,
            Error::Busy => -16,
            Error::TimedOut => -110,
            Error::NotSupported => -95,
            Error::ProbeDefer => -517,
            Error::Other(code) => code,
        }
    }

    /// Map a status code back to an error
    ///
    /// Returns `None` for zero and positive values, which are successes.
    pub const fn from_errno(code: i32) -> Option<Self> {
        match code {
            c if c >= 0 => None,
            -12 => Some(Error::NoMemory),
            -19 => Some(Error::NoDevice),
            -5 => Some(Error::Io),
            -22 => Some(Error::InvalidArgument),
            -16 => Some(Error::Busy),
            -110 => Some(Error::TimedOut),
            -95 => Some(Error::NotSupported),
            -517 => Some(Error::ProbeDefer),
            c => Some(Error::Other(c)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoMemory => f.write_str("out of memory"),
            Error::NoDevice => f.write_str("no such device"),
            Error::Io => f.write_str("I/O error"),
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::Busy => f.write_str("device or resource busy"),
            Error::TimedOut => f.write_str("timed out"),
            Error::NotSupported => f.write_str("operation not supported"),
            Error::ProbeDefer => f.write_str("probe deferred"),
            Error::Other(code) => write!(f, "error {}", code),
        }
    }
}
