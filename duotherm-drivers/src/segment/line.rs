//! Two-line framing engine
//!
//! ```text
//!        start         bit 0   bit 1  ...  bit 7   ack     stop
//! CLK  ‾‾‾‾‾‾‾‾\____/‾‾‾‾\__/‾‾‾‾\_ ... /‾‾‾‾\____/‾‾\____/‾‾‾‾‾‾
//! DIO  ‾‾‾‾\_______<  b0  ><  b1  > ... <  b7  > ack ______/‾‾‾‾
//! ```
//!
//! Data changes while the clock is low and is sampled by the controller on
//! the rising edge. A falling data edge with the clock high starts a
//! transaction, a rising one ends it. After every byte the data line is
//! released and the controller pulls it low to acknowledge.

use duotherm_hal::{FlexPin, InputPin, OutputPin};
use duotherm_protocol::segment::bits_lsb_first;
use embedded_hal::delay::DelayNs;

/// Framing state of the lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// Both lines high, no transaction
    Idle,
    /// Start condition issued
    Start,
    /// Shifting a byte out
    Shifting,
    /// Byte sent, acknowledge clocked
    AckCheck,
    /// Stop condition issued
    Stop,
}

impl LineState {
    /// Check if `to` may follow this state
    pub fn can_transition(self, to: LineState) -> bool {
        use LineState::*;

        matches!(
            (self, to),
            (Idle, Start)
                | (Start, Shifting)
                | (Shifting, AckCheck)
                | (AckCheck, Shifting)
                | (AckCheck, Stop)
                | (Stop, Idle)
        )
    }
}

/// Acknowledge sampled after a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Controller pulled the data line low
    Acked,
    /// Data line stayed high
    Missing,
}

/// Segment line errors
///
/// A missing acknowledge is not an error; see [`SegmentBus::missed_acks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentError {
    /// Operation not allowed in the current framing state
    InvalidTransition { from: LineState, to: LineState },
}

/// Clock/data framing engine
pub struct SegmentBus<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    bit_delay_us: u32,
    state: LineState,
    missed_acks: u32,
    last_ack: Option<Ack>,
}

impl<CLK: OutputPin, DIO: FlexPin, D: DelayNs> SegmentBus<CLK, DIO, D> {
    /// Take the pins and park both lines high
    pub fn new(clk: CLK, dio: DIO, delay: D, bit_delay_us: u32) -> Self {
        let mut bus = Self {
            clk,
            dio,
            delay,
            bit_delay_us,
            state: LineState::Idle,
            missed_acks: 0,
            last_ack: None,
        };
        bus.dio.set_as_output();
        bus.dio.set_high();
        bus.clk.set_high();
        bus
    }

    /// Current framing state
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Acknowledges that were not seen since creation
    pub fn missed_acks(&self) -> u32 {
        self.missed_acks
    }

    /// Most recent acknowledge result
    pub fn last_ack(&self) -> Option<Ack> {
        self.last_ack
    }

    fn enter(&mut self, to: LineState) -> Result<(), SegmentError> {
        if !self.state.can_transition(to) {
            return Err(SegmentError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }

    fn settle(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    /// Start condition: data falls while the clock is high
    pub fn start(&mut self) -> Result<(), SegmentError> {
        self.enter(LineState::Start)?;
        self.clk.set_high();
        self.dio.set_as_output();
        self.dio.set_high();
        self.settle();
        self.dio.set_low();
        self.clk.set_low();
        Ok(())
    }

    /// Shift one byte out, least significant bit first, and clock the
    /// acknowledge
    pub fn write_byte(&mut self, byte: u8) -> Result<Ack, SegmentError> {
        self.enter(LineState::Shifting)?;
        self.dio.set_as_output();
        for bit in bits_lsb_first(byte) {
            self.clk.set_low();
            self.dio.set_state(bit);
            self.settle();
            self.clk.set_high();
            self.settle();
        }

        self.enter(LineState::AckCheck)?;
        self.dio.set_as_input();
        self.clk.set_low();
        self.settle();
        let ack = if self.dio.is_low() {
            Ack::Acked
        } else {
            Ack::Missing
        };
        // ninth clock releases the acknowledge
        self.clk.set_high();
        self.settle();
        self.clk.set_low();

        if ack == Ack::Missing {
            self.missed_acks = self.missed_acks.saturating_add(1);
        }
        self.last_ack = Some(ack);
        Ok(ack)
    }

    /// Stop condition: data rises while the clock is high
    pub fn stop(&mut self) -> Result<(), SegmentError> {
        self.enter(LineState::Stop)?;
        self.clk.set_low();
        self.dio.set_as_output();
        self.dio.set_low();
        self.settle();
        self.clk.set_high();
        self.dio.set_high();
        self.enter(LineState::Idle)
    }

    /// Send `bytes` as one framed transaction
    pub fn transaction(&mut self, bytes: &[u8]) -> Result<(), SegmentError> {
        self.start()?;
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        self.stop()
    }

    /// Force both lines high and return to [`LineState::Idle`]
    ///
    /// Recovery after a framing error; any half-sent transaction is
    /// terminated with a stop condition.
    pub fn reset(&mut self) {
        self.clk.set_low();
        self.dio.set_as_output();
        self.dio.set_low();
        self.settle();
        self.clk.set_high();
        self.dio.set_high();
        self.state = LineState::Idle;
    }

    /// Give the pins and delay back
    pub fn release(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }
}

#[cfg(test)]
pub(crate) mod sim {
    //! Simulated clock/data lines with a receiving controller

    use core::cell::RefCell;
    use std::vec::Vec;

    use duotherm_hal::{FlexPin, InputPin, OutputPin};

    /// Wire state plus what the simulated controller decoded
    #[derive(Debug)]
    pub struct SimWire {
        pub clk: bool,
        pub dio_out: bool,
        pub dio_output: bool,
        /// Controller acknowledges bytes
        pub responds: bool,
        in_frame: bool,
        ack_due: bool,
        acking: bool,
        bits: Vec<bool>,
        current: Vec<u8>,
        /// Bits sampled on rising clock edges, in order
        pub samples: Vec<bool>,
        /// Completed transactions
        pub frames: Vec<Vec<u8>>,
    }

    impl Default for SimWire {
        fn default() -> Self {
            Self {
                clk: true,
                dio_out: true,
                dio_output: true,
                responds: true,
                in_frame: false,
                ack_due: false,
                acking: false,
                bits: Vec::new(),
                current: Vec::new(),
                samples: Vec::new(),
                frames: Vec::new(),
            }
        }
    }

    impl SimWire {
        /// Lines with a controller that never acknowledges
        pub fn without_ack() -> Self {
            Self {
                responds: false,
                ..Default::default()
            }
        }

        fn dio_level(&self) -> bool {
            if self.dio_output {
                self.dio_out
            } else {
                // pulled up unless the controller is acknowledging
                !(self.acking && self.responds)
            }
        }

        fn set_clk(&mut self, level: bool) {
            let rising = !self.clk && level;
            let falling = self.clk && !level;
            self.clk = level;

            if rising && self.in_frame && self.dio_output {
                let bit = self.dio_out;
                self.samples.push(bit);
                self.bits.push(bit);
                if self.bits.len() == 8 {
                    let byte = self
                        .bits
                        .iter()
                        .enumerate()
                        .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << i));
                    self.current.push(byte);
                    self.bits.clear();
                    self.ack_due = true;
                }
            }

            if falling {
                if self.acking {
                    self.acking = false;
                } else if self.ack_due {
                    self.ack_due = false;
                    self.acking = true;
                }
            }
        }

        fn drive_dio(&mut self, level: bool) {
            let before = self.dio_level();
            self.dio_out = level;
            if !self.dio_output || !self.clk || before == level {
                return;
            }
            if !level {
                // start
                self.in_frame = true;
                self.bits.clear();
                self.current.clear();
            } else if self.in_frame {
                // stop
                self.in_frame = false;
                self.bits.clear();
                self.frames.push(core::mem::take(&mut self.current));
            }
        }
    }

    pub struct SimClk<'a>(pub &'a RefCell<SimWire>);

    impl OutputPin for SimClk<'_> {
        fn set_high(&mut self) {
            self.0.borrow_mut().set_clk(true);
        }

        fn set_low(&mut self) {
            self.0.borrow_mut().set_clk(false);
        }

        fn is_set_high(&self) -> bool {
            self.0.borrow().clk
        }
    }

    pub struct SimDio<'a>(pub &'a RefCell<SimWire>);

    impl OutputPin for SimDio<'_> {
        fn set_high(&mut self) {
            self.0.borrow_mut().drive_dio(true);
        }

        fn set_low(&mut self) {
            self.0.borrow_mut().drive_dio(false);
        }

        fn is_set_high(&self) -> bool {
            self.0.borrow().dio_out
        }
    }

    impl InputPin for SimDio<'_> {
        fn is_high(&self) -> bool {
            self.0.borrow().dio_level()
        }
    }

    impl FlexPin for SimDio<'_> {
        fn set_as_output(&mut self) {
            self.0.borrow_mut().dio_output = true;
        }

        fn set_as_input(&mut self) {
            self.0.borrow_mut().dio_output = false;
        }

        fn is_output(&self) -> bool {
            self.0.borrow().dio_output
        }
    }
}
