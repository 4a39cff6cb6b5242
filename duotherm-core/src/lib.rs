//! Board-agnostic core logic for the Duotherm firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Readings and their integer/hundredths decomposition
//! - Per-cycle sample accumulation and averaging
//! - Absolute/relative deviation between the two sources
//! - Collaborator traits (temperature sensors, text and numeric displays)
//! - Configuration type definitions
//! - The acquisition cycle and its phase state machine

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod aggregate;
pub mod config;
pub mod cycle;
pub mod metrics;
pub mod reading;
pub mod traits;

pub use aggregate::{Accumulator, Average};
pub use config::StationConfig;
pub use cycle::{AcquisitionCycle, CyclePhase, CycleReport};
pub use metrics::{ErrorMetrics, MetricsError};
pub use reading::{Reading, Source};
