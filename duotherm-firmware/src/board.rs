//! Nucleo-F401RE wiring
//!
//! | Signal        | Pin  | Header |
//! |---------------|------|--------|
//! | I2C1 SCL      | PB8  | D15    |
//! | I2C1 SDA      | PB9  | D14    |
//! | NTC divider   | PA0  | A0     |
//! | TM1637 CLK    | PA10 | D2     |
//! | TM1637 DIO    | PB3  | D3     |
//!
//! The AM2320 and the OLED share I2C1.

use duotherm_core::config::{SensorConfig, StationConfig};
use duotherm_drivers::display::ssd1306;
use duotherm_hal::i2c::I2cConfig;

/// The AM2320 tops out at standard mode
pub const I2C: I2cConfig = I2cConfig::STANDARD;

/// OLED panel address
pub const OLED_ADDRESS: u8 = ssd1306::DEFAULT_ADDRESS;

/// Station settings for this board
///
/// The sensor sleeps between exchanges and does not acknowledge the wake
/// write, so that NACK is expected here.
pub fn station_config() -> StationConfig {
    StationConfig {
        sensor: SensorConfig {
            tolerate_wake_nack: true,
            ..Default::default()
        },
        ..Default::default()
    }
}
