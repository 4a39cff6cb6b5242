//! TM1637 4-digit display

use duotherm_core::config::SegmentConfig;
use duotherm_core::traits::{DisplayError, NumericDisplay};
use duotherm_hal::{FlexPin, OutputPin};
use duotherm_protocol::segment::{CommandSet, SegmentFrame, MAX_BRIGHTNESS};
use embedded_hal::delay::DelayNs;

use super::line::{SegmentBus, SegmentError};

/// TM1637 on a clock pin and a bidirectional data pin
pub struct Tm1637<CLK, DIO, D> {
    bus: SegmentBus<CLK, DIO, D>,
    commands: CommandSet,
    brightness: u8,
}

impl<CLK: OutputPin, DIO: FlexPin, D: DelayNs> Tm1637<CLK, DIO, D> {
    pub fn new(clk: CLK, dio: DIO, delay: D, config: &SegmentConfig) -> Self {
        Self {
            bus: SegmentBus::new(clk, dio, delay, config.bit_delay_us),
            commands: config.commands(),
            brightness: config.brightness.min(MAX_BRIGHTNESS),
        }
    }

    /// Brightness used for the next update (0-7)
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(MAX_BRIGHTNESS);
    }

    /// Framing engine, for acknowledge statistics
    pub fn bus(&self) -> &SegmentBus<CLK, DIO, D> {
        &self.bus
    }

    /// Send a frame as its three transactions
    ///
    /// On a framing error the lines are reset so the next update starts
    /// clean.
    pub fn write_frame(&mut self, frame: &SegmentFrame) -> Result<(), SegmentError> {
        for tx in frame.transactions(&self.commands) {
            if let Err(e) = self.bus.transaction(&tx) {
                self.bus.reset();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Show `value` (saturated to 0-9999) with leading zeros
    pub fn show(&mut self, value: u16) -> Result<(), SegmentError> {
        let frame = SegmentFrame::new(value, self.brightness);
        self.write_frame(&frame)
    }

    /// Give the pins and delay back
    pub fn release(self) -> (CLK, DIO, D) {
        self.bus.release()
    }
}

impl<CLK: OutputPin, DIO: FlexPin, D: DelayNs> NumericDisplay for Tm1637<CLK, DIO, D> {
    fn show_number(&mut self, value: u16) -> Result<(), DisplayError> {
        self.show(value).map_err(|_| DisplayError::Communication)
    }
}
