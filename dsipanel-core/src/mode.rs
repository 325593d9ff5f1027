//! Display mode descriptors
//!
//! A mode describes one timing the panel can scan out: active area, sync and
//! blanking intervals, pixel clock and physical size. Drivers keep their
//! modes as constants and hand copies to the connector.

use bitflags::bitflags;
use core::fmt::Write;
use heapless::String;

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum mode name length
pub const DISPLAY_MODE_LEN: usize = 32;

bitflags! {
    /// Where a mode came from and how it should be ranked
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ModeType: u32 {
        const BUILTIN = 1 << 0;
        const PREFERRED = 1 << 3;
        const USERDEF = 1 << 5;
        /// Mode supplied by the driver itself
        const DRIVER = 1 << 6;
    }
}

bitflags! {
    /// Sync polarity and scan flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ModeFlags: u32 {
        const PHSYNC = 1 << 0;
        const NHSYNC = 1 << 1;
        const PVSYNC = 1 << 2;
        const NVSYNC = 1 << 3;
        const INTERLACE = 1 << 4;
        const DBLSCAN = 1 << 5;
    }
}

/// One axis of a mode, expressed as intervals
///
/// `active + front_porch + sync_len + back_porch` is the line (or frame)
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncTiming {
    pub active: u16,
    pub front_porch: u16,
    pub sync_len: u16,
    pub back_porch: u16,
}

impl SyncTiming {
    pub const fn new(active: u16, front_porch: u16, sync_len: u16, back_porch: u16) -> Self {
        Self {
            active,
            front_porch,
            sync_len,
            back_porch,
        }
    }

    pub const fn sync_start(&self) -> u16 {
        self.active + self.front_porch
    }

    pub const fn sync_end(&self) -> u16 {
        self.sync_start() + self.sync_len
    }

    pub const fn total(&self) -> u16 {
        self.sync_end() + self.back_porch
    }
}

/// Pixel clock in kHz that scans `h` x `v` at `refresh_hz`
pub const fn clock_khz(h: &SyncTiming, v: &SyncTiming, refresh_hz: u32) -> u32 {
    (h.total() as u32 * v.total() as u32 * refresh_hz) / 1000
}

/// A display timing and geometry descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayMode {
    /// Pixel clock in kHz
    pub clock: u32,
    pub hdisplay: u16,
    pub hsync_start: u16,
    pub hsync_end: u16,
    pub htotal: u16,
    pub hskew: u16,
    pub vdisplay: u16,
    pub vsync_start: u16,
    pub vsync_end: u16,
    pub vtotal: u16,
    pub vscan: u16,
    /// Physical width in millimetres
    pub width_mm: u16,
    /// Physical height in millimetres
    pub height_mm: u16,
    pub mode_type: ModeType,
    pub flags: ModeFlags,
    pub name: String<DISPLAY_MODE_LEN>,
}

impl DisplayMode {
    /// Build a mode from per-axis intervals
    pub const fn from_timings(clock: u32, h: SyncTiming, v: SyncTiming) -> Self {
        Self {
            clock,
            hdisplay: h.active,
            hsync_start: h.sync_start(),
            hsync_end: h.sync_end(),
            htotal: h.total(),
            hskew: 0,
            vdisplay: v.active,
            vsync_start: v.sync_start(),
            vsync_end: v.sync_end(),
            vtotal: v.total(),
            vscan: 0,
            width_mm: 0,
            height_mm: 0,
            mode_type: ModeType::empty(),
            flags: ModeFlags::empty(),
            name: String::new(),
        }
    }

    /// Return this mode with a physical size
    pub const fn with_size_mm(mut self, width_mm: u16, height_mm: u16) -> Self {
        self.width_mm = width_mm;
        self.height_mm = height_mm;
        self
    }

    /// Return this mode with extra flags
    pub const fn with_flags(mut self, flags: ModeFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Vertical refresh rate in Hz, rounded to nearest
    ///
    /// Returns 0 for a mode with no line or frame total.
    pub fn vrefresh(&self) -> u32 {
        if self.htotal == 0 || self.vtotal == 0 {
            return 0;
        }

        let mut num = u64::from(self.clock) * 1000;
        let mut den = u64::from(self.htotal) * u64::from(self.vtotal);

        if self.flags.contains(ModeFlags::INTERLACE) {
            num *= 2;
        }
        if self.flags.contains(ModeFlags::DBLSCAN) {
            den *= 2;
        }
        if self.vscan > 1 {
            den *= u64::from(self.vscan);
        }

        ((num + den / 2) / den) as u32
    }

    /// Set the name to `<hdisplay>x<vdisplay>`, with an `i` suffix when interlaced
    pub fn set_name(&mut self) {
        self.name.clear();
        let interlaced = if self.flags.contains(ModeFlags::INTERLACE) {
            "i"
        } else {
            ""
        };
        // Two u16 values and a suffix always fit
        let _ = write!(self.name, "{}x{}{}", self.hdisplay, self.vdisplay, interlaced);
    }

    /// Check if this mode is marked preferred
    pub fn is_preferred(&self) -> bool {
        self.mode_type.contains(ModeType::PREFERRED)
    }

    /// Check that sync intervals are ordered and non-empty
    pub fn validate(&self) -> Result<(), Error> {
        let h_ok = self.hdisplay > 0
            && self.hdisplay <= self.hsync_start
            && self.hsync_start <= self.hsync_end
            && self.hsync_end <= self.htotal;
        let v_ok = self.vdisplay > 0
            && self.vdisplay <= self.vsync_start
            && self.vsync_start <= self.vsync_end
            && self.vsync_end <= self.vtotal;

        if self.clock == 0 || !h_ok || !v_ok {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisplayMode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "\"{}\" {}x{}@{} clock={}kHz h={}/{}/{} v={}/{}/{}",
            self.name.as_str(),
            self.hdisplay,
            self.vdisplay,
            self.vrefresh(),
            self.clock,
            self.hsync_start,
            self.hsync_end,
            self.htotal,
            self.vsync_start,
            self.vsync_end,
            self.vtotal
        );
    }
}
