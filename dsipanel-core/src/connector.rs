//! Display connector
//!
//! The connector is the display pipeline's view of the sink. Panels fill in
//! its probed mode list and physical size when asked for their modes.

use heapless::Vec;

use crate::error::Error;
use crate::mode::DisplayMode;

/// Maximum probed modes per connector
pub const MAX_PROBED_MODES: usize = 8;

/// Physical link type between the display controller and the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorType {
    Unknown,
    Lvds,
    Edp,
    Dsi,
    Dpi,
}

/// Properties of the sink reported by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayInfo {
    /// Physical width in millimetres (0 if unknown)
    pub width_mm: u32,
    /// Physical height in millimetres (0 if unknown)
    pub height_mm: u32,
}

/// A connector collecting modes from its panel
#[derive(Debug, Clone)]
pub struct Connector {
    connector_type: ConnectorType,
    /// Sink properties
    pub display_info: DisplayInfo,
    probed_modes: Vec<DisplayMode, MAX_PROBED_MODES>,
}

impl Connector {
    /// Create a connector with no modes and unknown size
    pub fn new(connector_type: ConnectorType) -> Self {
        Self {
            connector_type,
            display_info: DisplayInfo::default(),
            probed_modes: Vec::new(),
        }
    }

    pub fn connector_type(&self) -> ConnectorType {
        self.connector_type
    }

    /// Add a duplicated mode to the probed list
    ///
    /// Fails with [`Error::NoMemory`] once the list is full.
    pub fn add_probed_mode(&mut self, mode: DisplayMode) -> Result<(), Error> {
        self.probed_modes.push(mode).map_err(|_| Error::NoMemory)
    }

    /// Modes added since the last [`clear_probed_modes`](Self::clear_probed_modes)
    pub fn probed_modes(&self) -> &[DisplayMode] {
        &self.probed_modes
    }

    /// First mode flagged preferred, if any
    pub fn preferred_mode(&self) -> Option<&DisplayMode> {
        self.probed_modes.iter().find(|m| m.is_preferred())
    }

    /// Drop all probed modes ahead of a new probe
    pub fn clear_probed_modes(&mut self) {
        self.probed_modes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{ModeType, SyncTiming};

    fn mode(width: u16) -> DisplayMode {
        DisplayMode::from_timings(
            25_175,
            SyncTiming::new(width, 16, 96, 48),
            SyncTiming::new(480, 10, 2, 33),
        )
    }

    #[test]
    fn test_new_connector_is_empty() {
        let connector = Connector::new(ConnectorType::Dsi);
        assert_eq!(connector.connector_type(), ConnectorType::Dsi);
        assert!(connector.probed_modes().is_empty());
        assert_eq!(connector.display_info, DisplayInfo::default());
    }

    #[test]
    fn test_preferred_mode() {
        let mut connector = Connector::new(ConnectorType::Dpi);
        connector.add_probed_mode(mode(640)).unwrap();

        let mut preferred = mode(800);
        preferred.mode_type = ModeType::DRIVER | ModeType::PREFERRED;
        connector.add_probed_mode(preferred).unwrap();

        assert_eq!(connector.probed_modes().len(), 2);
        assert_eq!(connector.preferred_mode().map(|m| m.hdisplay), Some(800));
    }

    #[test]
    fn test_full_mode_list() {
        let mut connector = Connector::new(ConnectorType::Dsi);
        for _ in 0..MAX_PROBED_MODES {
            connector.add_probed_mode(mode(640)).unwrap();
        }

        assert_eq!(connector.add_probed_mode(mode(640)), Err(Error::NoMemory));

        connector.clear_probed_modes();
        assert!(connector.add_probed_mode(mode(640)).is_ok());
    }
}
