//! Collaborator traits
//!
//! The acquisition cycle only talks to sensors and displays through these,
//! so drivers live elsewhere and tests can substitute mocks.

pub mod display;
pub mod sensor;

pub use display::{DisplayError, NumericDisplay, TextDisplay};
pub use sensor::{BusPhase, SensorError, TemperatureSensor};
