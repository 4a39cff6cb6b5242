//! NTC thermistor on an analog input
//!
//! Circuit: VIN -- NTC -- ADC_PIN -- R_ref -- GND
//!
//! The sampled divider voltage gives the thermistor resistance, which the
//! Steinhart–Hart model turns into a temperature:
//!
//! - `R = R_ref * (V_in / V_out - 1)`
//! - `1 / T = A + B * ln(R) + C * ln(R)^3` (T in kelvin)
//!
//! Every input that would make either step undefined is rejected with
//! [`SensorError::UndefinedConversion`], so no infinity or NaN ever
//! reaches an average.

use duotherm_core::config::{SteinhartHart, ThermistorConfig};
use duotherm_core::reading::{Reading, Source};
use duotherm_core::traits::{SensorError, TemperatureSensor};
use duotherm_hal::AnalogInput;

/// Offset between kelvin and degrees Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

/// Divider voltage to temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermistorConverter {
    reference_ohms: f64,
    supply_volts: f64,
    coefficients: SteinhartHart,
}

impl ThermistorConverter {
    pub fn new(config: &ThermistorConfig) -> Self {
        Self {
            reference_ohms: config.reference_ohms,
            supply_volts: config.supply_volts,
            coefficients: config.coefficients,
        }
    }

    /// Divider supply voltage
    pub fn supply_volts(&self) -> f64 {
        self.supply_volts
    }

    /// Thermistor resistance for a divider output voltage
    ///
    /// `v_out` must lie strictly between 0 (shorted reference / open NTC)
    /// and the supply (shorted NTC).
    pub fn resistance(&self, v_out: f64) -> Result<f64, SensorError> {
        if !v_out.is_finite() || v_out <= 0.0 || v_out >= self.supply_volts {
            return Err(SensorError::UndefinedConversion);
        }

        let ohms = self.reference_ohms * (self.supply_volts / v_out - 1.0);
        if !ohms.is_finite() || ohms <= 0.0 {
            return Err(SensorError::UndefinedConversion);
        }
        Ok(ohms)
    }

    /// Temperature in °C for a thermistor resistance
    pub fn temperature_c(&self, ohms: f64) -> Result<f64, SensorError> {
        if !ohms.is_finite() || ohms <= 0.0 {
            return Err(SensorError::UndefinedConversion);
        }

        let SteinhartHart { a, b, c } = self.coefficients;
        let ln_r = libm::log(ohms);
        let inverse_kelvin = a + b * ln_r + c * ln_r * ln_r * ln_r;
        if !inverse_kelvin.is_finite() || inverse_kelvin <= 0.0 {
            return Err(SensorError::UndefinedConversion);
        }

        let celsius = 1.0 / inverse_kelvin - KELVIN_OFFSET;
        if !celsius.is_finite() {
            return Err(SensorError::UndefinedConversion);
        }
        Ok(celsius)
    }

    /// Temperature in °C for a divider output voltage
    pub fn convert(&self, v_out: f64) -> Result<f64, SensorError> {
        self.temperature_c(self.resistance(v_out)?)
    }

    /// Divider output voltage for a thermistor resistance
    pub fn output_voltage(&self, ohms: f64) -> f64 {
        self.supply_volts * self.reference_ohms / (self.reference_ohms + ohms)
    }
}

impl Default for ThermistorConverter {
    fn default() -> Self {
        Self::new(&ThermistorConfig::default())
    }
}

/// 10 kΩ NTC sampled through an [`AnalogInput`]
pub struct NtcThermistor<A> {
    adc: A,
    converter: ThermistorConverter,
}

impl<A: AnalogInput> NtcThermistor<A> {
    pub fn new(adc: A, config: &ThermistorConfig) -> Self {
        Self {
            adc,
            converter: ThermistorConverter::new(config),
        }
    }

    /// Conversion model in use
    pub fn converter(&self) -> &ThermistorConverter {
        &self.converter
    }

    /// Sample the divider and return the temperature in °C
    pub fn read_celsius(&mut self) -> Result<f64, SensorError> {
        let normalized = self
            .adc
            .read_normalized()
            .map_err(|_| SensorError::UndefinedConversion)?;
        let v_out = normalized as f64 * self.converter.supply_volts();
        self.converter.convert(v_out)
    }
}

impl<A: AnalogInput> TemperatureSensor for NtcThermistor<A> {
    fn source(&self) -> Source {
        Source::Thermistor
    }

    fn read(&mut self) -> Result<Reading, SensorError> {
        let celsius = self.read_celsius()?;
        Reading::from_celsius(celsius, Source::Thermistor).ok_or(SensorError::UndefinedConversion)
    }
}

/// Fixed-value analog input for testing
#[cfg(test)]
pub struct DummyAdc(pub f32);

#[cfg(test)]
impl AnalogInput for DummyAdc {
    type Error = ();

    fn read_normalized(&mut self) -> Result<f32, ()> {
        Ok(self.0)
    }
}
