//! GPIO line abstractions
//!
//! Panels are wired to discrete lines (reset, backlight enable) owned by the
//! host's GPIO controller. Drivers ask the host for a line by its consumer
//! name at probe time and then only ever drive it.

use crate::error::Error;

/// Logical line level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level from a boolean (true = high)
    pub const fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        Level::from_bool(high)
    }
}

/// Digital output line
///
/// Setting a line never fails from the driver's point of view: a line that
/// cannot be driven is a host fault, reported by the host.
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Named output line lookup
///
/// Mirrors the device-tree `<name>-gpios` property convention: `con_id`
/// is the property prefix ("reset" for `reset-gpios`). The line is driven
/// to `initial` before it is handed out.
pub trait GpioProvider {
    /// Line handle handed to the driver
    type Line: OutputPin;

    /// Request an output line by consumer name
    ///
    /// Fails with [`Error::NoDevice`] when the property is missing and
    /// [`Error::Busy`] when another consumer already owns the line.
    fn request_output(&mut self, con_id: &str, initial: Level) -> Result<Self::Line, Error>;
}

/// Adapter exposing an `embedded-hal` output pin as an [`OutputPin`]
///
/// The last requested level is cached so it can be read back without a
/// stateful pin. Failed writes are counted rather than propagated.
pub struct EhOutputPin<P> {
    pin: P,
    level: Level,
    faults: u16,
}

impl<P: embedded_hal::digital::OutputPin> EhOutputPin<P> {
    /// Wrap a pin and drive it to `initial`
    pub fn new(pin: P, initial: Level) -> Self {
        let mut out = Self {
            pin,
            level: initial,
            faults: 0,
        };
        out.set_level(initial);
        out
    }

    /// Number of writes the underlying pin rejected
    pub fn faults(&self) -> u16 {
        self.faults
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }

    fn record(&mut self, level: Level, ok: bool) {
        self.level = level;
        if !ok {
            self.faults = self.faults.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("gpio write to {} rejected", level);
        }
    }
}

impl<P: embedded_hal::digital::OutputPin> OutputPin for EhOutputPin<P> {
    fn set_high(&mut self) {
        let ok = self.pin.set_high().is_ok();
        self.record(Level::High, ok);
    }

    fn set_low(&mut self) {
        let ok = self.pin.set_low().is_ok();
        self.record(Level::Low, ok);
    }

    fn is_set_high(&self) -> bool {
        self.level.is_high()
    }
}
