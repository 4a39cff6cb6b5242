//! Temperature readings
//!
//! A reading is stored as signed hundredths of a degree, which keeps
//! accumulation exact. Values coming from the thermistor model are
//! decomposed into an integer part and a hundredths part by truncation
//! toward zero.

use core::fmt;

/// Added before truncating the hundredths so values like 25.599999999999998
/// decompose as 25.60 and decomposition is idempotent
pub const DECOMPOSE_EPSILON: f64 = 1e-9;

/// Where a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// AM2320 digital sensor (the reference)
    Digital,
    /// NTC thermistor through the ADC
    Thermistor,
}

impl Source {
    /// Short label used in logs and on the text display
    pub fn label(&self) -> &'static str {
        match self {
            Source::Digital => "AM2320",
            Source::Thermistor => "NTC",
        }
    }
}

/// A single temperature sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    centi: i32,
    source: Source,
}

impl Reading {
    /// Build from tenths of a degree, as delivered by the digital sensor
    pub fn from_tenths(tenths: i16, source: Source) -> Self {
        Self {
            centi: tenths as i32 * 10,
            source,
        }
    }

    /// Build from hundredths of a degree
    pub fn from_hundredths(centi: i32, source: Source) -> Self {
        Self { centi, source }
    }

    /// Build from degrees Celsius, truncating to hundredths
    ///
    /// Returns `None` for non-finite or out-of-range values.
    pub fn from_celsius(celsius: f64, source: Source) -> Option<Self> {
        if !celsius.is_finite() || libm::fabs(celsius) >= (i32::MAX / 100) as f64 {
            return None;
        }
        Some(Self {
            centi: hundredths(celsius) as i32,
            source,
        })
    }

    /// Which sensor produced this reading
    pub fn source(&self) -> Source {
        self.source
    }

    /// Signed hundredths of a degree
    pub fn hundredths(&self) -> i32 {
        self.centi
    }

    /// Whole degrees, truncated toward zero
    pub fn integer_part(&self) -> i32 {
        self.centi / 100
    }

    /// Hundredths digits (0-99), magnitude only
    pub fn fractional_part(&self) -> u8 {
        (self.centi % 100).unsigned_abs() as u8
    }

    /// True when below zero
    pub fn is_negative(&self) -> bool {
        self.centi < 0
    }

    /// Value in degrees Celsius
    pub fn celsius(&self) -> f64 {
        self.centi as f64 / 100.0
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hundredths(f, self.centi as i64)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reading {
    fn format(&self, f: defmt::Formatter) {
        let sign = if self.is_negative() { "-" } else { "" };
        let fraction = self.fractional_part();
        defmt::write!(
            f,
            "{}{}.{}{}",
            sign,
            self.integer_part().unsigned_abs(),
            fraction / 10,
            fraction % 10
        )
    }
}

/// Split a value into whole degrees and hundredths
///
/// The integer part is truncated toward zero and carries the sign. The
/// hundredths are `trunc((|value| - |integer|) * 100)` and always in 0-99.
pub fn decompose(value: f64) -> (i32, u8) {
    let integer = libm::trunc(value);
    let fraction = libm::trunc((libm::fabs(value) - libm::fabs(integer)) * 100.0 + DECOMPOSE_EPSILON);

    if fraction >= 100.0 {
        // rounding pushed the fraction over; carry into the integer part
        let magnitude = libm::fabs(integer) as i32 + 1;
        let integer = if value < 0.0 { -magnitude } else { magnitude };
        return (integer, 0);
    }

    (integer as i32, fraction as u8)
}

/// Signed hundredths of a value, by [`decompose`]
pub fn hundredths(value: f64) -> i64 {
    let (integer, fraction) = decompose(value);
    let magnitude = integer.unsigned_abs() as i64 * 100 + fraction as i64;
    if value < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Write signed hundredths as `[-]I.FF`
pub(crate) fn write_hundredths<W: fmt::Write>(w: &mut W, centi: i64) -> fmt::Result {
    let sign = if centi < 0 { "-" } else { "" };
    let magnitude = centi.unsigned_abs();
    write!(w, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}
