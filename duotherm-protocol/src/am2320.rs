//! AM2320 register read format
//!
//! The AM2320 answers a Modbus-style "read registers" request. A read of the
//! four registers starting at 0x00 returns an 8-byte frame:
//!
//! - byte 0: function code echo (0x03)
//! - byte 1: number of data bytes (0x04)
//! - bytes 2-3: relative humidity, big-endian, 0.1 %RH units
//! - bytes 4-5: temperature, big-endian sign-magnitude, 0.1 °C units
//! - bytes 6-7: CRC-16/Modbus over bytes 0-5, low byte first

/// Default 7-bit bus address
pub const DEFAULT_ADDRESS: u8 = 0x5C;

/// Payload that wakes the sensor from sleep
pub const WAKE_PAYLOAD: u8 = 0x00;

/// Function code: read registers
pub const FUNCTION_READ_REGISTERS: u8 = 0x03;

/// First register of the humidity/temperature block
pub const REG_HUMIDITY_HIGH: u8 = 0x00;

/// Registers covering humidity (2) and temperature (2)
pub const REGISTER_COUNT: u8 = 0x04;

/// Length of the response to a 4-register read
pub const RESPONSE_LEN: usize = 8;

/// Offset of the humidity word in the response
pub const HUMIDITY_OFFSET: usize = 2;

/// Offset of the temperature word in the response
pub const TEMPERATURE_OFFSET: usize = 4;

/// Offset of the CRC (low byte first) in the response
pub const CRC_OFFSET: usize = 6;

/// Sign flag of the temperature word
const TEMPERATURE_SIGN: u16 = 0x8000;

/// Errors from validating a raw response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Function code echo does not match the request
    UnexpectedFunction(u8),
    /// Byte count does not match the number of requested registers
    UnexpectedLength(u8),
    /// CRC mismatch
    Checksum { expected: u16, received: u16 },
}

/// Build the 3-byte read-registers command
pub const fn read_registers_command(function: u8, start_register: u8, count: u8) -> [u8; 3] {
    [function, start_register, count]
}

/// CRC-16/Modbus (poly 0xA001 reflected, init 0xFFFF)
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Check the header and CRC of a response
///
/// `function` and `count` are the values sent in the request. The sensor
/// echoes the function code, then the number of data bytes that follow,
/// which for the AM2320's byte-wide registers equals the register count.
pub fn validate_response(
    frame: &[u8; RESPONSE_LEN],
    function: u8,
    count: u8,
) -> Result<(), ResponseError> {
    if frame[0] != function {
        return Err(ResponseError::UnexpectedFunction(frame[0]));
    }
    if frame[1] != count {
        return Err(ResponseError::UnexpectedLength(frame[1]));
    }

    let received = u16::from_le_bytes([frame[CRC_OFFSET], frame[CRC_OFFSET + 1]]);
    let expected = crc16(&frame[..CRC_OFFSET]);
    if received != expected {
        return Err(ResponseError::Checksum { expected, received });
    }

    Ok(())
}

/// Decoded humidity and temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Am2320Measurement {
    /// Relative humidity in 0.1 % units
    pub humidity_x10: u16,
    /// Temperature in 0.1 °C units
    pub temperature_x10: i16,
}

impl Am2320Measurement {
    /// Decode a raw response without validating it
    pub fn parse(frame: &[u8; RESPONSE_LEN]) -> Self {
        let humidity_x10 =
            u16::from_be_bytes([frame[HUMIDITY_OFFSET], frame[HUMIDITY_OFFSET + 1]]);
        let raw_temperature =
            u16::from_be_bytes([frame[TEMPERATURE_OFFSET], frame[TEMPERATURE_OFFSET + 1]]);

        Self {
            humidity_x10,
            temperature_x10: decode_sign_magnitude(raw_temperature),
        }
    }

    /// Whole degrees, truncated toward zero
    pub fn integer_part(&self) -> i16 {
        self.temperature_x10 / 10
    }

    /// Tenths digit (0-9), magnitude only
    pub fn tenths(&self) -> u8 {
        (self.temperature_x10 % 10).unsigned_abs() as u8
    }

    /// True when the temperature is below zero
    pub fn is_negative(&self) -> bool {
        self.temperature_x10 < 0
    }
}

/// Decode a raw response without validating it
pub fn parse_response(frame: &[u8; RESPONSE_LEN]) -> Am2320Measurement {
    Am2320Measurement::parse(frame)
}

fn decode_sign_magnitude(raw: u16) -> i16 {
    let magnitude = (raw & !TEMPERATURE_SIGN) as i16;
    if raw & TEMPERATURE_SIGN != 0 {
        -magnitude
    } else {
        magnitude
    }
}
