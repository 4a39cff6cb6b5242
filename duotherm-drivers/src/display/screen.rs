//! Character screen buffer
//!
//! Holds what has been printed since the last clear and renders it to a
//! [`DisplayBackend`] on `present`.

use duotherm_core::traits::{DisplayError, TextDisplay};
use heapless::String;

use super::backend::DisplayBackend;

/// Most rows the buffer tracks
pub const MAX_ROWS: usize = 8;

/// Most characters per row
pub const MAX_COLS: usize = 32;

#[derive(Debug, Clone)]
struct Line {
    text: String<MAX_COLS>,
    col: u8,
    scale: u8,
}

/// Text buffer in front of a display backend
pub struct TextScreen<B> {
    backend: B,
    lines: [Option<Line>; MAX_ROWS],
    cursor: (u8, u8),
    scale: u8,
    cols: u8,
    rows: u8,
    dirty: bool,
}

impl<B: DisplayBackend> TextScreen<B> {
    /// Wrap a backend; the buffer starts empty
    pub fn new(backend: B) -> Self {
        let (cols, rows) = backend.dimensions();
        Self {
            backend,
            lines: core::array::from_fn(|_| None),
            cursor: (0, 0),
            scale: 1,
            cols: cols.min(MAX_COLS as u8),
            rows: rows.min(MAX_ROWS as u8),
            dirty: true,
        }
    }

    /// Text printed at a row, if any
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row)?.as_ref().map(|l| l.text.as_str())
    }

    /// Cursor as (column, row)
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Check if the buffer changed since the last `present`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: DisplayBackend> TextDisplay for TextScreen<B> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for line in &mut self.lines {
            *line = None;
        }
        self.cursor = (0, 0);
        self.dirty = true;
        Ok(())
    }

    fn set_text_size(&mut self, size: u8) -> Result<(), DisplayError> {
        if size == 0 || size > self.rows {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.scale = size;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.cols || row >= self.rows {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn print_line(&mut self, text: &str) -> Result<(), DisplayError> {
        let (col, row) = self.cursor;
        if row as u16 + self.scale as u16 > self.rows as u16 {
            return Err(DisplayError::BufferOverflow);
        }

        let room = ((self.cols - col) / self.scale) as usize;
        let mut line = String::new();
        for ch in text.chars().take(room) {
            if line.push(ch).is_err() {
                break;
            }
        }
        let truncated = line.len() < text.len();

        self.lines[row as usize] = Some(Line {
            text: line,
            col,
            scale: self.scale,
        });
        self.cursor = (0, row + self.scale);
        self.dirty = true;

        if truncated {
            return Err(DisplayError::BufferOverflow);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if let Some(line) = line {
                self.backend
                    .draw_text(row as u8, line.col, line.scale, &line.text)?;
            }
        }
        self.backend.flush()?;
        self.dirty = false;
        Ok(())
    }
}
