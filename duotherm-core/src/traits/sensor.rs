//! Temperature sensor trait

use crate::reading::{Reading, Source};

/// Phase of a bus exchange that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusPhase {
    /// Wake write
    Wake,
    /// Command write
    Command,
    /// Response read
    Read,
}

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer failed in the given phase
    BusComm(BusPhase),
    /// Input outside the domain of the conversion (open/short divider,
    /// degenerate model)
    UndefinedConversion,
    /// Response CRC mismatch
    Checksum,
    /// Response header does not match the request
    InvalidResponse,
}

/// Trait for temperature sensors
///
/// Each call is one sample attempt. Errors are per-sample; the caller
/// skips the sample and carries on.
pub trait TemperatureSensor {
    /// Which source this sensor feeds
    fn source(&self) -> Source;

    /// Take one reading
    ///
    /// Takes `&mut self` because bus and ADC reads require mutable access.
    fn read(&mut self) -> Result<Reading, SensorError>;
}
