//! Display traits
//!
//! Two very different outputs: a small text screen (OLED) and a 4-digit
//! numeric display.

/// Errors that can occur when driving a display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or line failure
    Communication,
    /// Cursor outside the screen
    InvalidCoordinates,
    /// Text does not fit
    BufferOverflow,
}

/// Line-oriented text display
///
/// Drawing calls only touch a buffer; nothing is visible until
/// [`present`](TextDisplay::present).
pub trait TextDisplay {
    /// Blank the whole screen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Glyph scale factor (1 = base font)
    fn set_text_size(&mut self, size: u8) -> Result<(), DisplayError>;

    /// Move the cursor to a character cell
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write `text` at the cursor and move to the start of the next row
    fn print_line(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Push the buffer to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}

/// 4-digit numeric display
pub trait NumericDisplay {
    /// Show `value` (0-9999, larger values saturate)
    fn show_number(&mut self, value: u16) -> Result<(), DisplayError>;
}
