//! AM2320 digital humidity/temperature sensor
//!
//! Every read is a full wake → command → response exchange; the sensor
//! goes back to sleep on its own afterwards.

use duotherm_core::config::SensorConfig;
use duotherm_core::reading::{Reading, Source};
use duotherm_core::traits::{SensorError, TemperatureSensor};
use duotherm_hal::I2cBus;
use duotherm_protocol::am2320::{self, Am2320Measurement, ResponseError, RESPONSE_LEN};
use embedded_hal::delay::DelayNs;

use crate::bus::{BusTransaction, TwoWire, WireTiming};

/// AM2320 on a two-wire bus
pub struct Am2320<B, D> {
    wire: TwoWire<B, D>,
    config: SensorConfig,
}

impl<B: I2cBus, D: DelayNs> Am2320<B, D> {
    /// Create a driver; no bus traffic until the first read
    pub fn new(bus: B, delay: D, config: SensorConfig) -> Self {
        Self {
            wire: TwoWire::new(bus, delay, WireTiming::from(&config)),
            config,
        }
    }

    /// Run one exchange and decode humidity and temperature
    pub fn measure(&mut self) -> Result<Am2320Measurement, SensorError> {
        let command = am2320::read_registers_command(
            self.config.function,
            self.config.start_register,
            self.config.register_count,
        );
        let tx = BusTransaction::new(
            self.config.address,
            &command,
            self.config.response_len as usize,
        )
        .ok_or(SensorError::InvalidResponse)?;
        if tx.response_length != RESPONSE_LEN {
            return Err(SensorError::InvalidResponse);
        }

        self.wire.wake(self.config.address)?;

        let mut frame = [0u8; RESPONSE_LEN];
        self.wire.execute(&tx, &mut frame)?;

        if self.config.verify_crc {
            am2320::validate_response(&frame, self.config.function, self.config.register_count)
                .map_err(|e| match e {
                    ResponseError::Checksum { .. } => SensorError::Checksum,
                    _ => SensorError::InvalidResponse,
                })?;
        }

        Ok(am2320::parse_response(&frame))
    }

    /// Give the bus and delay back
    pub fn release(self) -> (B, D) {
        self.wire.release()
    }
}

impl<B: I2cBus, D: DelayNs> TemperatureSensor for Am2320<B, D> {
    fn source(&self) -> Source {
        Source::Digital
    }

    fn read(&mut self) -> Result<Reading, SensorError> {
        let m = self.measure()?;
        Ok(Reading::from_tenths(m.temperature_x10, Source::Digital))
    }
}
