//! Acquisition cycle
//!
//! One cycle samples both sources, averages them, reports the averages on
//! the text display, then shows the deviation on the numeric display
//! before pausing.

mod phase;
mod runner;

pub use phase::{CycleEvent, CyclePhase};
pub use runner::{AcquisitionCycle, CycleReport};
