//! GPIO wrappers for STM32
//!
//! The TM1637 clock is a plain push-pull output. Its data line is a
//! [`Flex`] pin that the driver turns around for every acknowledge.

use duotherm_hal::gpio::{FlexPin, InputPin, OutputPin};
use embassy_stm32::gpio::{Flex, Output, Pull, Speed};

/// Push-pull output pin
pub struct PushPull<'d> {
    pin: Output<'d>,
}

impl<'d> PushPull<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PushPull<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Bidirectional pin
///
/// Released lines float up through `pull`; the module's own pull-ups keep
/// the line defined when `pull` is [`Pull::None`].
pub struct FlexLine<'d> {
    pin: Flex<'d>,
    pull: Pull,
    speed: Speed,
    output: bool,
}

impl<'d> FlexLine<'d> {
    /// Wrap a pin, starting as an output driven high (line idle)
    pub fn new(pin: Flex<'d>, pull: Pull, speed: Speed) -> Self {
        let mut line = Self {
            pin,
            pull,
            speed,
            output: false,
        };
        line.pin.set_high();
        line.set_as_output();
        line
    }
}

impl OutputPin for FlexLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl InputPin for FlexLine<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl FlexPin for FlexLine<'_> {
    fn set_as_output(&mut self) {
        self.pin.set_as_output(self.speed);
        self.output = true;
    }

    fn set_as_input(&mut self) {
        self.pin.set_as_input(self.pull);
        self.output = false;
    }

    fn is_output(&self) -> bool {
        self.output
    }
}
