//! Per-cycle sample accumulation
//!
//! Each source gets a fresh [`Accumulator`] per cycle, which the cycle owns
//! and consumes when it takes the average. Failed reads are never pushed,
//! so the average divides by the number of successful samples only.

use core::fmt;

use crate::reading::{self, Reading, Source};

/// Running sum of one source's readings within a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accumulator {
    source: Source,
    sum_centi: i64,
    count: u16,
}

impl Accumulator {
    /// Empty accumulator for `source`
    pub const fn new(source: Source) -> Self {
        Self {
            source,
            sum_centi: 0,
            count: 0,
        }
    }

    /// Add a successful reading
    ///
    /// Readings from another source are ignored and return `false`.
    pub fn push(&mut self, reading: &Reading) -> bool {
        if reading.source() != self.source {
            return false;
        }
        self.sum_centi += reading.hundredths() as i64;
        self.count = self.count.saturating_add(1);
        true
    }

    /// Source being accumulated
    pub fn source(&self) -> Source {
        self.source
    }

    /// Number of successful readings
    pub fn count(&self) -> u16 {
        self.count
    }

    /// True when no reading has been pushed
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sum of all readings in degrees Celsius
    pub fn sum(&self) -> f64 {
        self.sum_centi as f64 / 100.0
    }

    /// Mean of the successful readings, `None` if there were none
    pub fn average(self) -> Option<Average> {
        if self.count == 0 {
            return None;
        }
        Some(Average {
            value: self.sum_centi as f64 / self.count as f64 / 100.0,
            samples: self.count,
            source: self.source,
        })
    }
}

/// Mean of one source's readings over a cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Average {
    value: f64,
    samples: u16,
    source: Source,
}

impl Average {
    /// Mean in degrees Celsius
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of readings that went into the mean
    pub fn samples(&self) -> u16 {
        self.samples
    }

    /// Source the mean was taken over
    pub fn source(&self) -> Source {
        self.source
    }

    /// Whole degrees, truncated toward zero
    pub fn integer_part(&self) -> i32 {
        reading::decompose(self.value).0
    }

    /// Hundredths digits (0-99), truncated
    pub fn fractional_part(&self) -> u8 {
        reading::decompose(self.value).1
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        reading::write_hundredths(f, reading::hundredths(self.value))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Average {
    fn format(&self, f: defmt::Formatter) {
        let centi = reading::hundredths(self.value);
        let sign = if centi < 0 { "-" } else { "" };
        let magnitude = centi.unsigned_abs();
        defmt::write!(
            f,
            "{}{}.{}{} ({} samples)",
            sign,
            magnitude / 100,
            (magnitude % 100) / 10,
            magnitude % 10,
            self.samples
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_constant_readings() {
        let mut acc = Accumulator::new(Source::Digital);
        for _ in 0..10 {
            assert!(acc.push(&Reading::from_tenths(256, Source::Digital)));
        }

        let avg = acc.average().unwrap();
        assert_eq!(avg.samples(), 10);
        assert!((avg.value() - 25.6).abs() < 1e-9);
        assert_eq!(avg.integer_part(), 25);
        assert_eq!(avg.fractional_part(), 60);
        assert_eq!(avg.to_string(), "25.60");
    }

    #[test]
    fn test_failures_do_not_dilute() {
        let mut acc = Accumulator::new(Source::Thermistor);
        for i in 0..10 {
            if i % 3 != 2 {
                acc.push(&Reading::from_hundredths(2100, Source::Thermistor));
            }
        }

        assert_eq!(acc.count(), 7);
        let avg = acc.average().unwrap();
        assert_eq!(avg.samples(), 7);
        assert!((avg.value() - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_has_no_average() {
        let acc = Accumulator::new(Source::Digital);
        assert!(acc.is_empty());
        assert!(acc.average().is_none());
    }

    #[test]
    fn test_rejects_other_source() {
        let mut acc = Accumulator::new(Source::Digital);
        assert!(!acc.push(&Reading::from_tenths(100, Source::Thermistor)));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_mixed_readings() {
        let mut acc = Accumulator::new(Source::Thermistor);
        acc.push(&Reading::from_hundredths(2455, Source::Thermistor));
        acc.push(&Reading::from_hundredths(2466, Source::Thermistor));

        assert!((acc.sum() - 49.21).abs() < 1e-9);
        let avg = acc.average().unwrap();
        assert_eq!(avg.integer_part(), 24);
        assert_eq!(avg.fractional_part(), 60);
    }
}
