//! Two-wire request/response engine
//!
//! Sequences the phases of a sensor exchange over an [`I2cBus`]: an
//! optional wake write, a command write, and a response read, each
//! followed by its settle delay. No retries: a failed phase ends the
//! exchange with [`SensorError::BusComm`] naming the phase.

use duotherm_core::config::SensorConfig;
use duotherm_core::traits::{BusPhase, SensorError};
use duotherm_hal::I2cBus;
use embedded_hal::delay::DelayNs;
use heapless::Vec;

/// Longest command payload
pub const MAX_PAYLOAD: usize = 8;

/// One write-then-read exchange with a device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTransaction {
    /// 7-bit device address
    pub address: u8,
    /// Command bytes
    pub payload: Vec<u8, MAX_PAYLOAD>,
    /// Bytes expected back
    pub response_length: usize,
}

impl BusTransaction {
    /// Describe an exchange, `None` if the payload is too long
    pub fn new(address: u8, payload: &[u8], response_length: usize) -> Option<Self> {
        Some(Self {
            address,
            payload: Vec::from_slice(payload).ok()?,
            response_length,
        })
    }
}

/// Settle delays and wake behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WireTiming {
    /// Byte written to wake the device
    pub wake_payload: u8,
    /// Wait after the wake write (ms)
    pub wake_settle_ms: u32,
    /// Wait after the command write (ms)
    pub command_settle_ms: u32,
    /// Treat a failed wake write as success
    pub tolerate_wake_nack: bool,
}

impl From<&SensorConfig> for WireTiming {
    fn from(config: &SensorConfig) -> Self {
        Self {
            wake_payload: config.wake_payload,
            wake_settle_ms: config.wake_settle_ms,
            command_settle_ms: config.command_settle_ms,
            tolerate_wake_nack: config.tolerate_wake_nack,
        }
    }
}

/// Phase sequencer over a blocking bus
pub struct TwoWire<B, D> {
    bus: B,
    delay: D,
    timing: WireTiming,
}

impl<B: I2cBus, D: DelayNs> TwoWire<B, D> {
    pub fn new(bus: B, delay: D, timing: WireTiming) -> Self {
        Self { bus, delay, timing }
    }

    /// Wake the device and wait for it to settle
    ///
    /// A sleeping device may not acknowledge this write. With
    /// `tolerate_wake_nack` set the failure is ignored and the settle delay
    /// still runs.
    pub fn wake(&mut self, address: u8) -> Result<(), SensorError> {
        let result = self.bus.write(address, &[self.timing.wake_payload]);
        if result.is_err() && !self.timing.tolerate_wake_nack {
            return Err(SensorError::BusComm(BusPhase::Wake));
        }
        self.delay.delay_ms(self.timing.wake_settle_ms);
        Ok(())
    }

    /// Send a command and wait for the device to prepare its answer
    pub fn write_command(&mut self, address: u8, bytes: &[u8]) -> Result<(), SensorError> {
        self.bus
            .write(address, bytes)
            .map_err(|_| SensorError::BusComm(BusPhase::Command))?;
        self.delay.delay_ms(self.timing.command_settle_ms);
        Ok(())
    }

    /// Read `buf.len()` bytes
    pub fn read_response(&mut self, address: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        self.bus
            .read(address, buf)
            .map_err(|_| SensorError::BusComm(BusPhase::Read))
    }

    /// Run command write, settle and response read
    ///
    /// The response lands in the first `response_length` bytes of `buf`.
    pub fn execute(&mut self, tx: &BusTransaction, buf: &mut [u8]) -> Result<(), SensorError> {
        let response = buf
            .get_mut(..tx.response_length)
            .ok_or(SensorError::InvalidResponse)?;
        self.write_command(tx.address, &tx.payload)?;
        self.read_response(tx.address, response)
    }

    /// Give the bus and delay back
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}
