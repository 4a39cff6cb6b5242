//! Analog input abstractions

/// Single-channel analog input
///
/// Returns the sampled voltage as a fraction of the converter's reference,
/// in the range `[0.0, 1.0]`. Callers scale by their supply voltage.
pub trait AnalogInput {
    /// Error type for conversions
    type Error;

    /// Take one normalized sample
    fn read_normalized(&mut self) -> Result<f32, Self::Error>;
}

/// Convert a raw converter code to a normalized sample
///
/// `full_scale` is the largest code the converter can return
/// (4095 for a 12-bit ADC).
pub fn normalize(raw: u16, full_scale: u16) -> f32 {
    if full_scale == 0 {
        return 0.0;
    }
    (raw.min(full_scale) as f32) / (full_scale as f32)
}
