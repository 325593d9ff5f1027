//! DSI host and driver traits

use dsipanel_protocol::DsiMessage;

use crate::dsi::DsiLink;
use crate::error::Error;
use crate::of::{of_match_device, DeviceNode, OfDeviceId};

/// The DSI controller a panel hangs off
///
/// Implemented by the host; drivers reach it through
/// [`MipiDsiDevice`](crate::dsi::MipiDsiDevice).
pub trait DsiHost {
    /// Register a peripheral with the given link configuration
    ///
    /// Hosts commonly return [`Error::ProbeDefer`] while the rest of the
    /// display pipeline is still missing.
    fn attach(&mut self, link: &DsiLink) -> Result<(), Error>;

    /// Unregister a previously attached peripheral
    fn detach(&mut self, link: &DsiLink) -> Result<(), Error>;

    /// Send one message
    ///
    /// Returns the number of payload bytes transmitted.
    fn transfer(&mut self, msg: &DsiMessage) -> Result<usize, Error>;
}

/// Static description of a DSI peripheral driver
pub trait DsiDriver {
    /// Driver name
    const NAME: &'static str;

    /// Compatible strings this driver binds to
    const OF_MATCH_TABLE: &'static [OfDeviceId];

    /// Entry of [`OF_MATCH_TABLE`](Self::OF_MATCH_TABLE) that binds `node`, if any
    fn of_match(node: &DeviceNode) -> Option<&'static OfDeviceId> {
        of_match_device(Self::OF_MATCH_TABLE, node)
    }
}
