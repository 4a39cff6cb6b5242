//! Acquisition cycle timing

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pacing of the acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CycleConfig {
    /// Sample attempts per source per cycle
    pub samples_per_cycle: u8,
    /// Wait after each sample pair (ms)
    pub sample_interval_ms: u32,
    /// How long each metric stays on the segment display (ms)
    pub metric_dwell_ms: u32,
    /// Rest between cycles (ms)
    pub pause_ms: u32,
    /// Wait after clearing the display at startup (ms)
    pub startup_delay_ms: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            samples_per_cycle: 10,
            sample_interval_ms: 1000,
            metric_dwell_ms: 2000,
            pause_ms: 5000,
            startup_delay_ms: 1000,
        }
    }
}
