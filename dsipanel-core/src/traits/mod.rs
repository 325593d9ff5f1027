//! Framework traits
//!
//! These traits define the interface between panel drivers and the display
//! stack hosting them.

pub mod dsi;
pub mod panel;

pub use dsi::{DsiDriver, DsiHost};
pub use panel::{Panel, PanelRegistry};
