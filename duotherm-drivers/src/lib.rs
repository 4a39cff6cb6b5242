//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in duotherm-core on top of the duotherm-hal traits:
//!
//! - Two-wire request/response engine
//! - Temperature sensors (AM2320, NTC thermistor)
//! - Bit-banged seven-segment controller (TM1637)
//! - Text screen buffer over a display backend (SSD1306 OLED)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;
pub mod segment;
pub mod sensor;

#[cfg(test)]
mod mock;
