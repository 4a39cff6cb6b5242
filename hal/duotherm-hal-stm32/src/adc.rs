//! ADC channel wrapper for STM32
//!
//! The F4 converter runs at 12-bit resolution by default.

use core::convert::Infallible;

use duotherm_hal::adc::{normalize, AnalogInput};
use embassy_stm32::adc::{Adc, AnyAdcChannel, Instance};

/// Largest code at the default 12-bit resolution
pub const FULL_SCALE: u16 = 4095;

/// One converter bound to one input channel
pub struct AnalogPin<'d, T: Instance> {
    adc: Adc<'d, T>,
    channel: AnyAdcChannel<'d, T>,
}

impl<'d, T: Instance> AnalogPin<'d, T> {
    pub fn new(adc: Adc<'d, T>, channel: AnyAdcChannel<'d, T>) -> Self {
        Self { adc, channel }
    }

    /// Raw conversion result
    pub fn read_raw(&mut self) -> u16 {
        self.adc.blocking_read(&mut self.channel)
    }
}

impl<T: Instance> AnalogInput for AnalogPin<'_, T> {
    type Error = Infallible;

    fn read_normalized(&mut self) -> Result<f32, Self::Error> {
        Ok(normalize(self.read_raw(), FULL_SCALE))
    }
}
