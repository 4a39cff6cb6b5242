//! Seven-segment controller command set
//!
//! Byte-level view of a TM1637-style 4-digit controller. Each display
//! update is three independently framed transactions:
//!
//! 1. data command (write, auto-increment address)
//! 2. address command followed by the four segment bytes
//! 3. display control command carrying the brightness level
//!
//! Framing (start/stop conditions) and bit timing are the job of the
//! line driver in `duotherm-drivers`.

use heapless::Vec;

/// Data command: write to display registers, auto-increment address
pub const CMD_DATA_WRITE: u8 = 0x40;

/// Display control base: display on, brightness in the low 3 bits
pub const CMD_DISPLAY_CONTROL: u8 = 0x88;

/// Address command for the first digit
pub const CMD_ADDRESS: u8 = 0xC0;

/// Highest brightness level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Number of digits on the display
pub const DIGIT_COUNT: usize = 4;

/// Largest value that fits on four digits
pub const MAX_DISPLAY_VALUE: u16 = 9999;

/// Longest transaction: address byte plus one byte per digit
pub const MAX_TRANSACTION_LEN: usize = 1 + DIGIT_COUNT;

/// Segment patterns for digits 0-9 (bit 0 = segment a ... bit 6 = segment g)
pub const DIGIT_SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// One framed transaction's bytes
pub type Transaction = Vec<u8, MAX_TRANSACTION_LEN>;

/// Segment pattern for a decimal digit, `None` if `digit > 9`
pub fn encode_digit(digit: u8) -> Option<u8> {
    DIGIT_SEGMENTS.get(digit as usize).copied()
}

/// Split a value into four decimal digits, most significant first
///
/// Values above 9999 saturate to 9999.
pub fn split_digits(value: u16) -> [u8; DIGIT_COUNT] {
    let mut value = value.min(MAX_DISPLAY_VALUE);
    let mut digits = [0u8; DIGIT_COUNT];
    for slot in digits.iter_mut().rev() {
        *slot = (value % 10) as u8;
        value /= 10;
    }
    digits
}

/// Bits of a byte in wire order (least significant first)
pub fn bits_lsb_first(byte: u8) -> impl Iterator<Item = bool> {
    (0..8).map(move |i| (byte >> i) & 0x01 != 0)
}

/// Command bytes of the display protocol
///
/// Defaults match the TM1637 datasheet; boards with clones that remap the
/// command space can override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandSet {
    /// Data command (write mode)
    pub data_write: u8,
    /// Address command for digit 0
    pub address: u8,
    /// Display control base (brightness is added)
    pub display_control: u8,
}

impl CommandSet {
    /// Display control byte for a brightness level (clamped to 0-7)
    pub fn display_control_for(&self, brightness: u8) -> u8 {
        self.display_control.wrapping_add(brightness.min(MAX_BRIGHTNESS))
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            data_write: CMD_DATA_WRITE,
            address: CMD_ADDRESS,
            display_control: CMD_DISPLAY_CONTROL,
        }
    }
}

/// Four digits plus brightness, built fresh for every update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentFrame {
    digits: [u8; DIGIT_COUNT],
    brightness: u8,
}

impl SegmentFrame {
    /// Build a frame showing `value` (saturated to 0-9999)
    pub fn new(value: u16, brightness: u8) -> Self {
        Self {
            digits: split_digits(value),
            brightness: brightness.min(MAX_BRIGHTNESS),
        }
    }

    /// Decimal digits, most significant first
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        self.digits
    }

    /// Brightness level (0-7)
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Segment patterns for the four digits
    pub fn segments(&self) -> [u8; DIGIT_COUNT] {
        // digits are 0-9 by construction
        self.digits.map(|d| DIGIT_SEGMENTS[d as usize])
    }

    /// The three transactions of a display update, in wire order
    pub fn transactions(&self, commands: &CommandSet) -> [Transaction; 3] {
        let mut data = Transaction::new();
        let _ = data.push(commands.data_write);

        let mut digits = Transaction::new();
        let _ = digits.push(commands.address);
        let _ = digits.extend_from_slice(&self.segments());

        let mut control = Transaction::new();
        let _ = control.push(commands.display_control_for(self.brightness));

        [data, digits, control]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_digit() {
        assert_eq!(encode_digit(0), Some(0x3F));
        assert_eq!(encode_digit(7), Some(0x07));
        assert_eq!(encode_digit(8), Some(0x7F));
        assert_eq!(encode_digit(10), None);
    }

    #[test]
    fn test_split_digits_most_significant_first() {
        assert_eq!(split_digits(1234), [1, 2, 3, 4]);
        assert_eq!(split_digits(100), [0, 1, 0, 0]);
        assert_eq!(split_digits(0), [0, 0, 0, 0]);
        assert_eq!(split_digits(9999), [9, 9, 9, 9]);
    }

    #[test]
    fn test_split_digits_saturates() {
        assert_eq!(split_digits(12345), [9, 9, 9, 9]);
    }

    #[test]
    fn test_bits_lsb_first() {
        let mut bits = [false; 8];
        for (slot, bit) in bits.iter_mut().zip(bits_lsb_first(0b1011_0010)) {
            *slot = bit;
        }
        assert_eq!(bits, [false, true, false, false, true, true, false, true]);
    }

    #[test]
    fn test_frame_transactions() {
        let frame = SegmentFrame::new(390, 1);
        let [data, digits, control] = frame.transactions(&CommandSet::default());

        assert_eq!(data.as_slice(), &[0x40]);
        assert_eq!(digits.as_slice(), &[0xC0, 0x3F, 0x4F, 0x6F, 0x3F]);
        assert_eq!(control.as_slice(), &[0x89]);
    }

    #[test]
    fn test_brightness_clamped() {
        let frame = SegmentFrame::new(0, 12);
        assert_eq!(frame.brightness(), MAX_BRIGHTNESS);
        assert_eq!(CommandSet::default().display_control_for(12), 0x8F);
    }

    #[test]
    fn test_control_byte_follows_command_set() {
        let commands = CommandSet {
            display_control: 0x80,
            ..CommandSet::default()
        };
        let [_, _, control] = SegmentFrame::new(42, 3).transactions(&commands);
        assert_eq!(control.as_slice(), &[0x83]);
    }
}
