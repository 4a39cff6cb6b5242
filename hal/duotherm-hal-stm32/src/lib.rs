//! STM32 HAL for the Duotherm firmware
//!
//! Thin wrappers that put embassy-stm32 blocking peripherals behind the
//! `duotherm-hal` traits:
//!
//! - [`i2c::BlockingI2c`] - shared two-wire bus for the AM2320 and the OLED
//! - [`gpio::PushPull`] / [`gpio::FlexLine`] - TM1637 clock and data lines
//! - [`adc::AnalogPin`] - thermistor divider input
//!
//! # Features
//!
//! - `stm32f401re` - Enable support for STM32F401RE (Nucleo-F401RE)
//! - `stm32f411re` - Enable support for STM32F411RE (Nucleo-F411RE)
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod i2c;

pub use adc::AnalogPin;
pub use gpio::{FlexLine, PushPull};
pub use i2c::{BlockingI2c, I2cBusError};
