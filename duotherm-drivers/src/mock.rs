//! Test doubles shared by the driver tests

use std::vec::Vec;

use duotherm_hal::I2cBus;
use embedded_hal::delay::DelayNs;

/// Delay that records every wait instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    pub ms: Vec<u32>,
    pub ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
        self.ns += ms as u64 * 1_000_000;
    }
}

/// One bus operation as seen by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Write(u8, Vec<u8>),
    Read(u8, usize),
}

/// Bus error injected by [`MockBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

/// Scripted two-wire bus
///
/// `fail_on` lists operation indices (0-based) that return [`Nack`].
#[derive(Debug, Default)]
pub struct MockBus {
    pub ops: Vec<BusOp>,
    pub response: Vec<u8>,
    pub fail_on: Vec<usize>,
}

impl MockBus {
    pub fn with_response(response: &[u8]) -> Self {
        Self {
            response: response.to_vec(),
            ..Default::default()
        }
    }

    fn fails(&self) -> bool {
        self.fail_on.contains(&(self.ops.len() - 1))
    }
}

impl I2cBus for MockBus {
    type Error = Nack;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
        self.ops.push(BusOp::Write(address, data.to_vec()));
        if self.fails() {
            return Err(Nack);
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Nack> {
        self.ops.push(BusOp::Read(address, buf.len()));
        if self.fails() {
            return Err(Nack);
        }
        for (dst, src) in buf.iter_mut().zip(self.response.iter()) {
            *dst = *src;
        }
        Ok(())
    }
}
