//! Temperature sensors

pub mod am2320;
pub mod ntc;

pub use am2320::Am2320;
pub use ntc::{NtcThermistor, ThermistorConverter};
