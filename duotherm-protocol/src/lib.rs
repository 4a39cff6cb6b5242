//! Duotherm wire formats
//!
//! This crate holds the byte-level formats Duotherm speaks, with no
//! knowledge of pins, buses or timing:
//!
//! - [`am2320`]: the AM2320 humidity/temperature sensor's Modbus-like
//!   register read over I2C
//! - [`segment`]: the command set of a TM1637-style 4-digit seven-segment
//!   controller, driven over a two-line clock/data link
//!
//! # AM2320 read exchange
//!
//! ```text
//! write  [0x00]                 wake (sensor NACKs while asleep)
//! wait   ≥ 0.8 ms
//! write  [0x03, 0x00, 0x04]     read 4 registers from 0x00
//! wait   ≥ 1.5 ms
//! read   ┌──────┬───────┬────────────┬────────────┬──────────┐
//!        │ 0x03 │ 0x04  │ RH hi, lo  │ T hi, lo   │ CRC lo,hi│
//!        │ func │ count │ ×0.1 %     │ ×0.1 °C    │ Modbus   │
//!        └──────┴───────┴────────────┴────────────┴──────────┘
//! ```
//!
//! # Seven-segment update
//!
//! ```text
//! [START] 0x40 [STOP]                              data command, auto-increment
//! [START] 0xC0 seg0 seg1 seg2 seg3 [STOP]          address 0, four digits
//! [START] 0x88 | brightness [STOP]                 display on + brightness
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod am2320;
pub mod segment;

pub use am2320::{parse_response, Am2320Measurement, ResponseError, RESPONSE_LEN};
pub use segment::{encode_digit, split_digits, SegmentFrame, DIGIT_SEGMENTS};
