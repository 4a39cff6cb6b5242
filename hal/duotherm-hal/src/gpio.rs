//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin that switches between driving and sensing at runtime
///
/// Used for bidirectional single-wire data lines: the controller drives the
/// line while shifting bits out, then releases it so the peripheral can pull
/// it low to acknowledge.
pub trait FlexPin: OutputPin + InputPin {
    /// Drive the line (push-pull output), keeping the last output level
    fn set_as_output(&mut self);

    /// Release the line (input, sense only)
    fn set_as_input(&mut self);

    /// Check if the pin is currently driving the line
    fn is_output(&self) -> bool;
}
