//! I2C bus driver for STM32
//!
//! Blocking master transfers on one of the chip's I2C peripherals.

use duotherm_hal::i2c::{I2cBus, I2cConfig};
use embassy_stm32::i2c::{Config, Error as I2cError, I2c, Master};
use embassy_stm32::mode::Blocking;
use embassy_stm32::time::Hertz;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Timeout
    Timeout,
    /// CRC error
    Crc,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<I2cError> for I2cBusError {
    fn from(e: I2cError) -> Self {
        match e {
            I2cError::Bus => I2cBusError::Bus,
            I2cError::Arbitration => I2cBusError::ArbitrationLost,
            I2cError::Nack => I2cBusError::Nack,
            I2cError::Timeout => I2cBusError::Timeout,
            I2cError::Crc => I2cBusError::Crc,
            I2cError::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Build the peripheral configuration for a bus speed
pub fn peripheral_config(config: &I2cConfig) -> Config {
    let mut c = Config::default();
    c.frequency = Hertz(config.frequency);
    c
}

/// Blocking I2C master
pub struct BlockingI2c<'d> {
    i2c: I2c<'d, Blocking, Master>,
}

impl<'d> BlockingI2c<'d> {
    pub fn new(i2c: I2c<'d, Blocking, Master>) -> Self {
        Self { i2c }
    }

    /// Give the peripheral back
    pub fn release(self) -> I2c<'d, Blocking, Master> {
        self.i2c
    }
}

impl I2cBus for BlockingI2c<'_> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_write(address, data).map_err(I2cBusError::from)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_read(address, buf).map_err(I2cBusError::from)
    }
}
