//! Display backend trait
//!
//! Defines the interface for different display panels.

use duotherm_core::traits::DisplayError;

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering text to a panel.
/// Implementations handle the specifics of the controller and its bus.
pub trait DisplayBackend {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number in base-font cells (0-based)
    /// - `col`: Column number in base-font cells (0-based)
    /// - `scale`: Glyph scale factor (1 = base font)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, scale: u8, text: &str) -> Result<(), DisplayError>;

    /// Flush buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in base-font cells
    fn dimensions(&self) -> (u8, u8);
}
