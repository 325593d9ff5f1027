//! dsipanel Hardware Abstraction Layer
//!
//! This crate defines the host services a panel driver calls into. Panel
//! drivers never touch registers themselves: whoever binds the panel (a
//! kernel shim, a bare-metal board crate, a test harness) implements these
//! traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Panel drivers (dsipanel-drivers)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dsipanel-core (modes, DSI, registry)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dsipanel-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Discrete output line (reset, backlight enable)
//! - [`gpio::GpioProvider`] - Named line lookup at probe time
//! - [`DelayNs`] - Blocking sleeps, straight from `embedded-hal`

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod gpio;

pub use embedded_hal::delay::DelayNs;
pub use error::Error;
pub use gpio::{EhOutputPin, GpioProvider, Level, OutputPin};
