//! Panel configuration types
//!
//! Panel configuration is fixed per model and lives in the driver as
//! constants. The types derive serde behind the `serde` feature so board
//! tooling can dump or override them.

use dsipanel_hal::Level;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sleep the hardware tolerates anywhere between `min_us` and `max_us`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SleepRange {
    /// Shortest acceptable sleep in microseconds
    pub min_us: u32,
    /// Longest acceptable sleep in microseconds
    pub max_us: u32,
}

impl SleepRange {
    pub const fn new(min_us: u32, max_us: u32) -> Self {
        Self { min_us, max_us }
    }

    /// Check if the range is well-formed
    pub const fn is_valid(&self) -> bool {
        self.min_us <= self.max_us
    }
}

/// Power sequence timings for a DSI panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerTimings {
    /// Hold time for each phase of the reset pulse
    pub reset_step: SleepRange,
    /// Wait after exit_sleep_mode before the next command (ms)
    pub exit_sleep_ms: u32,
    /// Wait after set_display_on (ms)
    pub display_on_ms: u32,
    /// Wait after enter_sleep_mode before pulling reset (ms)
    pub power_off_ms: u32,
}

impl Default for PowerTimings {
    fn default() -> Self {
        Self {
            reset_step: SleepRange::new(10_000, 11_000),
            exit_sleep_ms: 120,
            display_on_ms: 50,
            power_off_ms: 100,
        }
    }
}

/// A GPIO line a driver requests at probe time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioRequest {
    /// Consumer name (`<con_id>-gpios` in the device tree)
    pub con_id: &'static str,
    /// Level driven as soon as the line is acquired
    pub initial: Level,
}

impl GpioRequest {
    pub const fn new(con_id: &'static str, initial: Level) -> Self {
        Self { con_id, initial }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let timings = PowerTimings::default();
        assert_eq!(timings.reset_step.min_us, 10_000);
        assert!(timings.reset_step.is_valid());
        assert_eq!(timings.exit_sleep_ms, 120);
        assert_eq!(timings.display_on_ms, 50);
        assert_eq!(timings.power_off_ms, 100);
    }

    #[test]
    fn test_sleep_range_validity() {
        assert!(SleepRange::new(5, 5).is_valid());
        assert!(!SleepRange::new(6, 5).is_valid());
    }
}
