//! Deviation between the two sources
//!
//! The digital sensor is the reference:
//!
//! - absolute = |digital - thermistor|
//! - relative = absolute / digital * 100 (percent)

use duotherm_protocol::segment::MAX_DISPLAY_VALUE;

use crate::aggregate::Average;
use crate::reading::DECOMPOSE_EPSILON;

/// Why metrics could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MetricsError {
    /// Reference average is exactly zero; relative error is undefined
    ZeroReference,
    /// An input was NaN or infinite
    NonFinite,
}

/// Absolute and relative deviation of one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorMetrics {
    /// Magnitude of the difference, in °C
    pub absolute: f64,
    /// Absolute deviation as a percentage of the reference
    pub relative: f64,
}

impl ErrorMetrics {
    /// Compute the deviation of `thermistor` from `reference`
    pub fn between(reference: f64, thermistor: f64) -> Result<Self, MetricsError> {
        if !reference.is_finite() || !thermistor.is_finite() {
            return Err(MetricsError::NonFinite);
        }
        if reference == 0.0 {
            return Err(MetricsError::ZeroReference);
        }

        let absolute = libm::fabs(reference - thermistor);
        let relative = absolute / reference * 100.0;
        if !absolute.is_finite() || !relative.is_finite() {
            return Err(MetricsError::NonFinite);
        }

        Ok(Self { absolute, relative })
    }

    /// Compute from the two cycle averages
    pub fn from_averages(digital: &Average, thermistor: &Average) -> Result<Self, MetricsError> {
        Self::between(digital.value(), thermistor.value())
    }

    /// Absolute deviation as a 4-digit display number (hundredths of °C)
    pub fn absolute_display(&self) -> u16 {
        display_number(self.absolute)
    }

    /// Relative deviation as a 4-digit display number (hundredths of %)
    pub fn relative_display(&self) -> u16 {
        display_number(self.relative)
    }
}

/// Scale by 100, truncate toward zero and clamp to 0-9999
///
/// Truncation uses the same margin as [`decompose`], so the display agrees
/// with the printed hundredths. Negative and non-finite values show as 0.
///
/// [`decompose`]: crate::reading::decompose
pub fn display_number(value: f64) -> u16 {
    let scaled = libm::trunc(value * 100.0 + DECOMPOSE_EPSILON);
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0;
    }
    if scaled >= MAX_DISPLAY_VALUE as f64 {
        return MAX_DISPLAY_VALUE;
    }
    scaled as u16
}
