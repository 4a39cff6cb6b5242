//! Station configuration
//!
//! Addresses, register map, opcodes and timings are plain values injected
//! into the drivers. `Default` gives the values for an AM2320, a 10 kΩ NTC
//! in a divider from 3.3 V and a TM1637 module.

mod hardware;
mod types;

pub use hardware::{SegmentConfig, SensorConfig, SteinhartHart, ThermistorConfig};
pub use types::CycleConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a station needs, grouped per collaborator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationConfig {
    /// Digital sensor exchange
    pub sensor: SensorConfig,
    /// Thermistor divider and model
    pub thermistor: ThermistorConfig,
    /// Seven-segment controller
    pub segment: SegmentConfig,
    /// Acquisition pacing
    pub cycle: CycleConfig,
}
