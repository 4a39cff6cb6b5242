//! Cycle phases
//!
//! The cycle's progress is a function of the current phase and an event.

/// Phases of the acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CyclePhase {
    /// Power-on: display cleared, startup delay pending
    Boot,
    /// Taking sample pairs
    Sampling,
    /// Computing per-source averages
    Averaging,
    /// Writing the averages to the text display
    Reporting,
    /// Absolute deviation on the numeric display
    ShowingAbsolute,
    /// Relative deviation on the numeric display
    ShowingRelative,
    /// Rest before the next cycle
    Pausing,
}

/// Events that move the cycle forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// Startup delay elapsed
    BootComplete,
    /// All sample attempts done
    SamplingComplete,
    /// Averages computed (possibly none)
    AveragesReady,
    /// Text display updated and metrics available
    MetricsReady,
    /// Metrics could not be computed this cycle
    MetricsUnavailable,
    /// A metric has been shown long enough
    DwellElapsed,
    /// Inter-cycle pause elapsed
    PauseElapsed,
}

impl CyclePhase {
    /// Check if sensors are being read in this phase
    pub fn is_sampling(&self) -> bool {
        matches!(self, CyclePhase::Sampling)
    }

    /// Check if the numeric display is showing a metric
    pub fn is_showing_metric(&self) -> bool {
        matches!(self, CyclePhase::ShowingAbsolute | CyclePhase::ShowingRelative)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: CycleEvent) -> Self {
        use CycleEvent::*;
        use CyclePhase::*;

        match (self, event) {
            (Boot, BootComplete) => Sampling,

            (Sampling, SamplingComplete) => Averaging,

            (Averaging, AveragesReady) => Reporting,

            (Reporting, MetricsReady) => ShowingAbsolute,
            (Reporting, MetricsUnavailable) => Pausing,

            (ShowingAbsolute, DwellElapsed) => ShowingRelative,
            (ShowingRelative, DwellElapsed) => Pausing,

            (Pausing, PauseElapsed) => Sampling,

            // Default: stay in current phase
            _ => self,
        }
    }
}
