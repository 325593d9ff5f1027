//! Panel callbacks and registration

use crate::connector::Connector;
use crate::error::Error;
use crate::panel::{PanelId, PanelInfo};

/// Callbacks the display pipeline invokes on a panel
///
/// Calls for one panel are serialized by the host.
pub trait Panel {
    /// Power the panel up so it accepts video
    ///
    /// Calling it on a prepared panel must succeed without touching the
    /// hardware.
    fn prepare(&mut self) -> Result<(), Error>;

    /// Power the panel down
    ///
    /// Best-effort: failures are logged, not returned. Calling it on an
    /// unprepared panel must succeed without touching the hardware.
    fn unprepare(&mut self) -> Result<(), Error>;

    /// Turn on the image after video is running
    fn enable(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Turn off the image before video stops
    fn disable(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Add the panel's modes to `connector`
    ///
    /// Returns the number of modes added.
    fn get_modes(&self, connector: &mut Connector) -> Result<usize, Error>;
}

/// The host's list of available panels
pub trait PanelRegistry {
    /// Make a panel visible to display pipelines
    fn add(&mut self, info: PanelInfo) -> Result<PanelId, Error>;

    /// Withdraw a panel; unknown ids are ignored
    fn remove(&mut self, id: PanelId);

    /// Check if a panel is currently registered
    fn contains(&self, id: PanelId) -> bool;

    /// Number of registered panels
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
