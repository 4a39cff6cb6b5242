//! Bit-banged seven-segment controller
//!
//! [`SegmentBus`] is the two-line framing engine (start, byte shift with
//! acknowledge, stop) as an explicit state machine over GPIO.
//! [`Tm1637`] builds display updates on top of it.

mod line;
mod tm1637;

pub use line::{Ack, LineState, SegmentBus, SegmentError};
pub use tm1637::Tm1637;
