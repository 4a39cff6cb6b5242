//! Text display support
//!
//! [`TextScreen`] implements the cycle's [`TextDisplay`] as a character
//! buffer and renders it to any [`DisplayBackend`] on `present`.
//! [`Ssd1306`] is the backend for the 128x64 OLED panel.
//!
//! [`TextDisplay`]: duotherm_core::traits::TextDisplay

mod backend;
mod screen;
pub mod ssd1306;

pub use backend::DisplayBackend;
pub use screen::{TextScreen, MAX_COLS, MAX_ROWS};
pub use ssd1306::Ssd1306;
