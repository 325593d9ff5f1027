//! Panel driver implementations
//!
//! This crate provides concrete panel drivers built on the traits defined
//! in dsipanel-core and dsipanel-hal:
//!
//! - Sharp LS029B3SX02 (1440x1440 MIPI-DSI, video mode)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
extern crate dsipanel_core;

pub mod sharp;
