//! Panel registration and lifecycle
//!
//! A registered panel is described by [`PanelInfo`] and tracked by the
//! registry under a [`PanelId`]. Its power state follows the
//! [`PanelState`] machine.

pub mod registry;
pub mod state;

pub use registry::PanelList;
pub use state::{PanelEvent, PanelState};

use heapless::String;

use crate::connector::ConnectorType;
use crate::error::Error;
use crate::of::MAX_NAME_LEN;

/// Handle for a registered panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelId(pub u16);

/// What the registry knows about a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelInfo {
    /// Name of the device the panel belongs to
    pub device: String<MAX_NAME_LEN>,
    pub connector_type: ConnectorType,
    /// Prepare this panel before the upstream bridge / DSI host is
    /// powered, so commands can be sent during the host's own enable
    pub prepare_prev_first: bool,
}

impl PanelInfo {
    pub fn new(device: &str, connector_type: ConnectorType) -> Result<Self, Error> {
        let mut name = String::new();
        name.push_str(device).map_err(|_| Error::InvalidArgument)?;

        Ok(Self {
            device: name,
            connector_type,
            prepare_prev_first: false,
        })
    }

    /// Return this info with `prepare_prev_first` set
    pub fn with_prepare_prev_first(mut self) -> Self {
        self.prepare_prev_first = true;
        self
    }
}
