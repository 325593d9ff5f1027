//! MIPI-DSI command transport protocol
//!
//! This crate defines what travels over the DSI link when a panel driver
//! talks to its panel: DSI packets and the Display Command Set (DCS)
//! vocabulary carried inside them.
//!
//! # Packet Overview
//!
//! Short packets carry up to two data bytes in the header:
//! ```text
//! ┌──────┬───────┬───────┬─────┐
//! │ DI   │ DATA0 │ DATA1 │ ECC │
//! │ 1B   │ 1B    │ 1B    │ 1B  │
//! └──────┴───────┴───────┴─────┘
//! ```
//!
//! Long packets carry a word count in the header, then the payload and a
//! 16-bit checksum:
//! ```text
//! ┌──────┬───────┬───────┬─────┬─────────────┬──────────┐
//! │ DI   │ WC lo │ WC hi │ ECC │ PAYLOAD     │ CHECKSUM │
//! │ 1B   │ 1B    │ 1B    │ 1B  │ WC bytes    │ 2B (LE)  │
//! └──────┴───────┴───────┴─────┴─────────────┴──────────┘
//! ```
//!
//! `DI` packs the virtual channel (bits 7:6) and the data type (bits 5:0).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dcs;
pub mod message;
pub mod packet;

pub use dcs::DcsCommand;
pub use message::{DsiMessage, MsgFlags};
pub use packet::{
    checksum, ecc, DataType, Packet, PacketError, HEADER_SIZE, MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE,
};
