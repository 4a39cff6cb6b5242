//! Duotherm Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. Drivers in `duotherm-drivers` only see these
//! traits, so the whole acquisition path can be exercised on the host with
//! simulated pins, buses and converters.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (duotherm-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  duotherm-drivers / duotherm-core       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  duotherm-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ duotherm-hal- │
//!             │     stm32     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`i2c::I2cBus`] - Two-wire bus operations
//! - [`adc::AnalogInput`] - Normalized analog sampling
//!
//! Timing is not abstracted here: drivers take an
//! [`embedded_hal::delay::DelayNs`](https://docs.rs/embedded-hal) implementation.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use i2c::I2cBus;
