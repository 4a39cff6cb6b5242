//! Acquisition cycle runner

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;

use super::phase::{CycleEvent, CyclePhase};
use crate::aggregate::{Accumulator, Average};
use crate::config::CycleConfig;
use crate::metrics::ErrorMetrics;
use crate::reading::Source;
use crate::traits::{DisplayError, NumericDisplay, TemperatureSensor, TextDisplay};

/// Longest line written to the text display
const LINE_LEN: usize = 32;

/// Outcome of one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Digital sensor average, `None` if every attempt failed
    pub digital: Option<Average>,
    /// Thermistor average, `None` if every attempt failed
    pub thermistor: Option<Average>,
    /// Deviation, `None` if either average is missing or undefined
    pub metrics: Option<ErrorMetrics>,
    /// Failed digital attempts
    pub digital_failures: u8,
    /// Failed thermistor attempts
    pub thermistor_failures: u8,
}

/// Samples both sources and reports their comparison, forever
///
/// Generic over its collaborators so the same loop runs on hardware and
/// against mocks.
pub struct AcquisitionCycle<DS, TS, TD, ND, D> {
    digital: DS,
    thermistor: TS,
    text: TD,
    segment: ND,
    delay: D,
    config: CycleConfig,
    phase: CyclePhase,
}

impl<DS, TS, TD, ND, D> AcquisitionCycle<DS, TS, TD, ND, D>
where
    DS: TemperatureSensor,
    TS: TemperatureSensor,
    TD: TextDisplay,
    ND: NumericDisplay,
    D: DelayNs,
{
    pub fn new(
        digital: DS,
        thermistor: TS,
        text: TD,
        segment: ND,
        delay: D,
        config: CycleConfig,
    ) -> Self {
        Self {
            digital,
            thermistor,
            text,
            segment,
            delay,
            config,
            phase: CyclePhase::Boot,
        }
    }

    /// Current phase
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Text display collaborator
    pub fn text_display(&self) -> &TD {
        &self.text
    }

    /// Numeric display collaborator
    pub fn numeric_display(&self) -> &ND {
        &self.segment
    }

    /// Delay collaborator
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Clear the text display and wait the startup delay
    ///
    /// Only acts in [`CyclePhase::Boot`].
    pub fn start(&mut self) {
        if self.phase != CyclePhase::Boot {
            return;
        }

        info!("Duotherm starting");
        if let Err(e) = self.text.clear().and_then(|_| self.text.present()) {
            warn!("Text display clear failed: {}", e);
        }
        self.delay.delay_ms(self.config.startup_delay_ms);
        self.advance(CycleEvent::BootComplete);
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.run_once();
        }
    }

    /// Run one full cycle, from sampling through the pause
    pub fn run_once(&mut self) -> CycleReport {
        self.start();

        let (digital, thermistor, digital_failures, thermistor_failures) = self.sample();
        self.advance(CycleEvent::SamplingComplete);

        let digital = digital.average();
        let thermistor = thermistor.average();
        self.advance(CycleEvent::AveragesReady);

        if let Err(e) = self.draw_averages(digital.as_ref(), thermistor.as_ref()) {
            warn!("Text display update failed: {}", e);
        }
        log_average(Source::Digital, digital.as_ref());
        log_average(Source::Thermistor, thermistor.as_ref());

        let metrics = match (&digital, &thermistor) {
            (Some(d), Some(t)) => match ErrorMetrics::from_averages(d, t) {
                Ok(m) => Some(m),
                Err(e) => {
                    warn!("Metrics unavailable: {}", e);
                    None
                }
            },
            _ => {
                warn!("Metrics unavailable: missing average");
                None
            }
        };

        match metrics {
            Some(m) => {
                self.advance(CycleEvent::MetricsReady);
                info!("Absolute Error: {} C", m.absolute);
                info!("Relative Error: {} %", m.relative);

                self.show(m.absolute_display());
                self.delay.delay_ms(self.config.metric_dwell_ms);
                self.advance(CycleEvent::DwellElapsed);

                self.show(m.relative_display());
                self.delay.delay_ms(self.config.metric_dwell_ms);
                self.advance(CycleEvent::DwellElapsed);
            }
            None => self.advance(CycleEvent::MetricsUnavailable),
        }

        self.delay.delay_ms(self.config.pause_ms);
        self.advance(CycleEvent::PauseElapsed);

        CycleReport {
            digital,
            thermistor,
            metrics,
            digital_failures,
            thermistor_failures,
        }
    }

    fn advance(&mut self, event: CycleEvent) {
        let next = self.phase.transition(event);
        trace!("Cycle {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// One digital attempt and one thermistor sample per iteration
    fn sample(&mut self) -> (Accumulator, Accumulator, u8, u8) {
        let mut digital = Accumulator::new(self.digital.source());
        let mut thermistor = Accumulator::new(self.thermistor.source());
        let mut digital_failures = 0u8;
        let mut thermistor_failures = 0u8;

        for _ in 0..self.config.samples_per_cycle {
            match self.digital.read() {
                Ok(r) => {
                    info!("{} - Temperature: {} C", r.source().label(), r);
                    digital.push(&r);
                }
                Err(e) => {
                    warn!("{} read failed: {}", digital.source().label(), e);
                    digital_failures += 1;
                }
            }

            match self.thermistor.read() {
                Ok(r) => {
                    info!("{} - Temperature: {} C", r.source().label(), r);
                    thermistor.push(&r);
                }
                Err(e) => {
                    warn!("{} read failed: {}", thermistor.source().label(), e);
                    thermistor_failures += 1;
                }
            }

            self.delay.delay_ms(self.config.sample_interval_ms);
        }

        (digital, thermistor, digital_failures, thermistor_failures)
    }

    fn draw_averages(
        &mut self,
        digital: Option<&Average>,
        thermistor: Option<&Average>,
    ) -> Result<(), DisplayError> {
        self.text.clear()?;
        self.text.set_text_size(1)?;
        self.text.set_cursor(0, 0)?;
        self.text.print_line(&average_line(Source::Digital, digital)?)?;
        self.text.print_line(&average_line(Source::Thermistor, thermistor)?)?;
        self.text.present()
    }

    fn show(&mut self, value: u16) {
        if let Err(e) = self.segment.show_number(value) {
            warn!("Numeric display update failed: {}", e);
        }
    }
}

/// `"<label> Temp: I.FF C"`, or dashes when there is no average
fn average_line(source: Source, average: Option<&Average>) -> Result<String<LINE_LEN>, DisplayError> {
    let mut line = String::new();
    let written = match average {
        Some(avg) => write!(line, "{} Temp: {} C", source.label(), avg),
        None => write!(line, "{} Temp: --.-- C", source.label()),
    };
    written.map_err(|_| DisplayError::BufferOverflow)?;
    Ok(line)
}

fn log_average(source: Source, average: Option<&Average>) {
    match average {
        Some(avg) => info!("{} Average: {} C", source.label(), avg),
        None => warn!("{} Average: no samples", source.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;
    use crate::traits::{BusPhase, SensorError};
    use std::string::String as StdString;
    use std::vec::Vec;

    /// Sensor replaying a fixed script, one entry per call
    struct ScriptedSensor {
        source: Source,
        script: Vec<Result<Reading, SensorError>>,
        calls: usize,
    }

    impl ScriptedSensor {
        fn constant(reading: Reading) -> Self {
            Self {
                source: reading.source(),
                script: std::vec![Ok(reading)],
                calls: 0,
            }
        }

        fn scripted(source: Source, script: Vec<Result<Reading, SensorError>>) -> Self {
            Self {
                source,
                script,
                calls: 0,
            }
        }
    }

    impl TemperatureSensor for ScriptedSensor {
        fn source(&self) -> Source {
            self.source
        }

        fn read(&mut self) -> Result<Reading, SensorError> {
            let r = self.script[self.calls % self.script.len()];
            self.calls += 1;
            r
        }
    }

    #[derive(Default)]
    struct MockText {
        lines: Vec<StdString>,
        cleared: usize,
        presented: usize,
        fail: bool,
    }

    impl TextDisplay for MockText {
        fn clear(&mut self) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.lines.clear();
            self.cleared += 1;
            Ok(())
        }

        fn set_text_size(&mut self, _size: u8) -> Result<(), DisplayError> {
            Ok(())
        }

        fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
            Ok(())
        }

        fn print_line(&mut self, text: &str) -> Result<(), DisplayError> {
            self.lines.push(text.into());
            Ok(())
        }

        fn present(&mut self) -> Result<(), DisplayError> {
            self.presented += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockSegment {
        shown: Vec<u16>,
    }

    impl NumericDisplay for MockSegment {
        fn show_number(&mut self, value: u16) -> Result<(), DisplayError> {
            self.shown.push(value);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        ns: u64,
    }

    impl MockDelay {
        fn total_ms(&self) -> u64 {
            self.ns / 1_000_000
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ns += ns as u64;
        }
    }

    type TestCycle = AcquisitionCycle<ScriptedSensor, ScriptedSensor, MockText, MockSegment, MockDelay>;

    fn cycle(digital: ScriptedSensor, thermistor: ScriptedSensor) -> TestCycle {
        AcquisitionCycle::new(
            digital,
            thermistor,
            MockText::default(),
            MockSegment::default(),
            MockDelay::default(),
            CycleConfig::default(),
        )
    }

    fn reference_pair() -> (ScriptedSensor, ScriptedSensor) {
        (
            ScriptedSensor::constant(Reading::from_tenths(256, Source::Digital)),
            ScriptedSensor::constant(Reading::from_hundredths(2460, Source::Thermistor)),
        )
    }

    #[test]
    fn test_start_clears_and_waits() {
        let (d, t) = reference_pair();
        let mut c = cycle(d, t);
        assert_eq!(c.phase(), CyclePhase::Boot);

        c.start();
        assert_eq!(c.phase(), CyclePhase::Sampling);
        assert_eq!(c.text_display().cleared, 1);
        assert_eq!(c.delay().total_ms(), 1000);

        // second call is a no-op
        c.start();
        assert_eq!(c.delay().total_ms(), 1000);
    }

    #[test]
    fn test_reference_scenario() {
        let (d, t) = reference_pair();
        let mut c = cycle(d, t);
        c.start();

        let report = c.run_once();

        let digital = report.digital.unwrap();
        assert_eq!(digital.samples(), 10);
        assert!((digital.value() - 25.6).abs() < 1e-9);
        assert_eq!((digital.integer_part(), digital.fractional_part()), (25, 60));

        let thermistor = report.thermistor.unwrap();
        assert!((thermistor.value() - 24.6).abs() < 1e-9);
        assert_eq!((thermistor.integer_part(), thermistor.fractional_part()), (24, 60));

        let metrics = report.metrics.unwrap();
        assert!((metrics.absolute - 1.0).abs() < 1e-9);
        assert!((metrics.relative - 3.90625).abs() < 1e-9);

        assert_eq!(c.numeric_display().shown, [100, 390]);
        assert_eq!(
            c.text_display().lines,
            ["AM2320 Temp: 25.60 C", "NTC Temp: 24.60 C"]
        );

        // startup + 10 samples + two dwells + pause
        assert_eq!(c.delay().total_ms(), 1000 + 10 * 1000 + 2 * 2000 + 5000);
        assert_eq!(c.phase(), CyclePhase::Sampling);
    }

    #[test]
    fn test_failed_digital_attempts_skipped() {
        let ok = Ok(Reading::from_tenths(210, Source::Digital));
        let fail = Err(SensorError::BusComm(BusPhase::Read));
        let script = std::vec![ok, ok, fail, ok, ok, fail, ok, ok, fail, ok];

        let mut c = cycle(
            ScriptedSensor::scripted(Source::Digital, script),
            ScriptedSensor::constant(Reading::from_hundredths(2000, Source::Thermistor)),
        );
        let report = c.run_once();

        assert_eq!(report.digital_failures, 3);
        assert_eq!(report.thermistor_failures, 0);
        let digital = report.digital.unwrap();
        assert_eq!(digital.samples(), 7);
        assert!((digital.value() - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_digital_samples() {
        let mut c = cycle(
            ScriptedSensor::scripted(
                Source::Digital,
                std::vec![Err(SensorError::BusComm(BusPhase::Wake))],
            ),
            ScriptedSensor::constant(Reading::from_hundredths(2460, Source::Thermistor)),
        );
        c.start();
        let report = c.run_once();

        assert!(report.digital.is_none());
        assert!(report.thermistor.is_some());
        assert!(report.metrics.is_none());
        assert_eq!(report.digital_failures, 10);
        assert!(c.numeric_display().shown.is_empty());
        assert_eq!(c.text_display().lines[0], "AM2320 Temp: --.-- C");

        // no dwell when there is nothing to show
        assert_eq!(c.delay().total_ms(), 1000 + 10 * 1000 + 5000);
        assert_eq!(c.phase(), CyclePhase::Sampling);
    }

    #[test]
    fn test_zero_reference_has_no_metrics() {
        let mut c = cycle(
            ScriptedSensor::constant(Reading::from_tenths(0, Source::Digital)),
            ScriptedSensor::constant(Reading::from_hundredths(150, Source::Thermistor)),
        );
        let report = c.run_once();

        assert!(report.digital.is_some());
        assert!(report.metrics.is_none());
        assert!(c.numeric_display().shown.is_empty());
    }

    #[test]
    fn test_text_display_failure_does_not_stop_cycle() {
        let (d, t) = reference_pair();
        let mut c = cycle(d, t);
        c.text.fail = true;

        let report = c.run_once();

        assert!(report.metrics.is_some());
        assert_eq!(c.numeric_display().shown, [100, 390]);
        assert_eq!(c.text_display().presented, 0);
    }

    #[test]
    fn test_consecutive_cycles_use_fresh_accumulators() {
        let digital = ScriptedSensor::scripted(
            Source::Digital,
            std::vec![Ok(Reading::from_tenths(200, Source::Digital))],
        );
        let mut c = cycle(
            digital,
            ScriptedSensor::constant(Reading::from_hundredths(1900, Source::Thermistor)),
        );

        let first = c.run_once();
        c.digital.script = std::vec![Ok(Reading::from_tenths(300, Source::Digital))];
        let second = c.run_once();

        assert_eq!(first.digital.unwrap().samples(), 10);
        assert_eq!(second.digital.unwrap().samples(), 10);
        assert!((second.digital.unwrap().value() - 30.0).abs() < 1e-9);
    }
}
