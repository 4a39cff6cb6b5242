//! Per-device configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use duotherm_protocol::am2320::{
    DEFAULT_ADDRESS, FUNCTION_READ_REGISTERS, REGISTER_COUNT, REG_HUMIDITY_HIGH, RESPONSE_LEN,
    WAKE_PAYLOAD,
};
use duotherm_protocol::segment::{CommandSet, CMD_ADDRESS, CMD_DATA_WRITE, CMD_DISPLAY_CONTROL};

/// AM2320 exchange parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Byte written to wake the sensor
    pub wake_payload: u8,
    /// Read-registers function code
    pub function: u8,
    /// First register to read
    pub start_register: u8,
    /// Number of registers to read
    pub register_count: u8,
    /// Expected response length in bytes
    pub response_len: u8,
    /// Delay after the wake write (ms)
    pub wake_settle_ms: u32,
    /// Delay after the command write (ms)
    pub command_settle_ms: u32,
    /// Check header and CRC of every response
    pub verify_crc: bool,
    /// Carry on when the wake write is not acknowledged
    ///
    /// A sleeping AM2320 does not ACK its address, so real hardware
    /// usually needs this.
    pub tolerate_wake_nack: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            wake_payload: WAKE_PAYLOAD,
            function: FUNCTION_READ_REGISTERS,
            start_register: REG_HUMIDITY_HIGH,
            register_count: REGISTER_COUNT,
            response_len: RESPONSE_LEN as u8,
            wake_settle_ms: 1,
            command_settle_ms: 2,
            verify_crc: false,
            tolerate_wake_nack: false,
        }
    }
}

/// Steinhart–Hart coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteinhartHart {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for SteinhartHart {
    /// Generic 10 kΩ NTC
    fn default() -> Self {
        Self {
            a: 1.009249522e-03,
            b: 2.378405444e-04,
            c: 2.019202697e-07,
        }
    }
}

/// Thermistor voltage divider
///
/// The thermistor is the upper leg: `v_out = v_in * r_ref / (r_ref + r)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermistorConfig {
    /// Fixed resistor in ohms
    pub reference_ohms: f64,
    /// Divider supply in volts
    pub supply_volts: f64,
    /// Model coefficients
    pub coefficients: SteinhartHart,
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        Self {
            reference_ohms: 10_000.0,
            supply_volts: 3.3,
            coefficients: SteinhartHart::default(),
        }
    }
}

/// Seven-segment controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentConfig {
    /// Data command (write, auto-increment)
    pub data_write: u8,
    /// Address command for digit 0
    pub address: u8,
    /// Display control base
    pub display_control: u8,
    /// Brightness level (0-7)
    pub brightness: u8,
    /// Half-period of the clock line (µs)
    pub bit_delay_us: u32,
}

impl SegmentConfig {
    /// Command bytes for the frame builder
    pub fn commands(&self) -> CommandSet {
        CommandSet {
            data_write: self.data_write,
            address: self.address,
            display_control: self.display_control,
        }
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            data_write: CMD_DATA_WRITE,
            address: CMD_ADDRESS,
            display_control: CMD_DISPLAY_CONTROL,
            brightness: 1,
            bit_delay_us: 100,
        }
    }
}
