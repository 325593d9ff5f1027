//! MIPI-DSI peripheral side
//!
//! [`DsiLink`] is how a panel wants to be driven (lanes, pixel format, video
//! mode flags). [`MipiDsiDevice`] pairs that configuration with the host
//! transport and offers the DCS helpers panel drivers call.

use bitflags::bitflags;
use dsipanel_protocol::{DcsCommand, DsiMessage, MsgFlags};

use crate::error::{from_packet_error, Error};
use crate::traits::DsiHost;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum data lanes on a DSI link
pub const MAX_LANES: u8 = 4;

/// Pixel stream format on the video link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PixelFormat {
    #[default]
    Rgb888,
    /// 18 bits per pixel, loosely packed into 24
    Rgb666,
    Rgb666Packed,
    Rgb565,
}

impl PixelFormat {
    /// Bits per pixel on the wire
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Rgb888 | PixelFormat::Rgb666 => 24,
            PixelFormat::Rgb666Packed => 18,
            PixelFormat::Rgb565 => 16,
        }
    }
}

bitflags! {
    /// Video and command mode behaviour of the link
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct DsiModeFlags: u32 {
        /// Video mode (as opposed to command mode)
        const VIDEO = 1 << 0;
        const VIDEO_BURST = 1 << 1;
        const VIDEO_SYNC_PULSE = 1 << 2;
        const VIDEO_AUTO_VERT = 1 << 3;
        const VIDEO_HSE = 1 << 4;
        const VIDEO_NO_HFP = 1 << 5;
        const VIDEO_NO_HBP = 1 << 6;
        const VIDEO_NO_HSA = 1 << 7;
        const NO_EOT_PACKET = 1 << 9;
        const CLOCK_NON_CONTINUOUS = 1 << 10;
        /// Send commands in low-power mode
        const LPM = 1 << 11;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DsiModeFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DsiModeFlags({=u32:#x})", self.bits());
    }
}

/// Link configuration a peripheral requests when attaching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsiLink {
    /// Virtual channel (0-3)
    pub channel: u8,
    /// Data lanes (1-4)
    pub lanes: u8,
    pub format: PixelFormat,
    pub mode_flags: DsiModeFlags,
}

impl Default for DsiLink {
    fn default() -> Self {
        Self {
            channel: 0,
            lanes: 1,
            format: PixelFormat::Rgb888,
            mode_flags: DsiModeFlags::empty(),
        }
    }
}

impl DsiLink {
    /// Check lane count and channel
    pub fn validate(&self) -> Result<(), Error> {
        if self.lanes == 0 || self.lanes > MAX_LANES || self.channel > 3 {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Check if commands go out in low-power mode
    pub fn low_power_commands(&self) -> bool {
        self.mode_flags.contains(DsiModeFlags::LPM)
    }
}

/// A DSI peripheral bound to its host
pub struct MipiDsiDevice<H> {
    host: H,
    link: DsiLink,
    attached: bool,
}

impl<H: DsiHost> MipiDsiDevice<H> {
    /// Create an unattached device on `channel`
    pub fn new(host: H, channel: u8) -> Self {
        Self {
            host,
            link: DsiLink {
                channel,
                ..DsiLink::default()
            },
            attached: false,
        }
    }

    pub fn link(&self) -> &DsiLink {
        &self.link
    }

    /// Mutable link configuration
    ///
    /// Lanes, format and video flags must be settled before
    /// [`attach`](Self::attach); the `LPM` flag may change at any time.
    pub fn link_mut(&mut self) -> &mut DsiLink {
        &mut self.link
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Announce this peripheral and its link configuration to the host
    pub fn attach(&mut self) -> Result<(), Error> {
        if self.attached {
            return Err(Error::Busy);
        }
        self.link.validate()?;
        self.host.attach(&self.link)?;
        self.attached = true;
        Ok(())
    }

    /// Detach from the host
    ///
    /// The device counts as detached afterwards even if the host reports an
    /// error.
    pub fn detach(&mut self) -> Result<(), Error> {
        if !self.attached {
            return Err(Error::NoDevice);
        }
        self.attached = false;
        self.host.detach(&self.link)
    }

    /// Send a message, in low-power mode if the link asks for it
    pub fn transfer(&mut self, msg: DsiMessage) -> Result<usize, Error> {
        let msg = if self.link.low_power_commands() {
            msg.with_flags(MsgFlags::USE_LPM)
        } else {
            msg
        };
        self.host.transfer(&msg)
    }

    /// Write a DCS command with parameters
    pub fn dcs_write(&mut self, cmd: DcsCommand, params: &[u8]) -> Result<usize, Error> {
        let msg =
            DsiMessage::dcs_write(self.link.channel, cmd.code(), params).map_err(from_packet_error)?;
        self.transfer(msg)
    }

    pub fn dcs_nop(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::Nop, &[]).map(|_| ())
    }

    pub fn dcs_soft_reset(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::SoftReset, &[]).map(|_| ())
    }

    pub fn dcs_enter_sleep_mode(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::EnterSleepMode, &[]).map(|_| ())
    }

    pub fn dcs_exit_sleep_mode(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::ExitSleepMode, &[]).map(|_| ())
    }

    pub fn dcs_set_display_off(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::SetDisplayOff, &[]).map(|_| ())
    }

    pub fn dcs_set_display_on(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::SetDisplayOn, &[]).map(|_| ())
    }

    /// Release the host transport
    pub fn release(self) -> H {
        self.host
    }
}
