//! Board-agnostic display panel framework
//!
//! This crate contains everything a panel driver needs besides the panel's
//! own power sequence:
//!
//! - Display mode descriptors and the connector they are reported to
//! - DSI link configuration and the DSI device wrapper issuing DCS writes
//! - Panel callbacks, lifecycle state and the panel registry
//! - Device-tree compatible matching
//! - Error codes and logging macros

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod connector;
pub mod dsi;
pub mod error;
pub mod mode;
pub mod of;
pub mod panel;
pub mod traits;

pub use config::{GpioRequest, PowerTimings, SleepRange};
pub use connector::{Connector, ConnectorType, DisplayInfo};
pub use dsi::{DsiLink, DsiModeFlags, MipiDsiDevice, PixelFormat};
pub use error::Error;
pub use mode::{DisplayMode, ModeFlags, ModeType, SyncTiming};
pub use of::{of_match_device, DeviceNode, OfDeviceId};
pub use panel::{PanelId, PanelInfo, PanelList, PanelState};
pub use traits::{DsiDriver, DsiHost, Panel, PanelRegistry};
