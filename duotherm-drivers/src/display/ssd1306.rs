//! SSD1306 OLED panel
//!
//! 128x64 monochrome panel on the two-wire bus. Text is rendered into a
//! page-organized frame buffer with embedded-graphics mono fonts and sent
//! to the panel one page at a time on `flush`.

use core::convert::Infallible;

use duotherm_core::traits::DisplayError;
use duotherm_hal::I2cBus;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use super::backend::DisplayBackend;

/// Usual address of the panel (0x3D with the address jumper moved)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Base character cell
const CELL_WIDTH: usize = 6;
const CELL_HEIGHT: usize = 10;

/// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const PAGE_ADDRESSING: u8 = 0x02;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<B> {
    bus: B,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<B: I2cBus> Ssd1306<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Initialize the display (internal charge pump, page addressing)
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,
            cmd::SET_MEMORY_MODE,
            cmd::PAGE_ADDRESSING,
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }
        Ok(())
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.bus
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Zero the frame buffer without touching the panel
    pub fn clear_buffer(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Check a pixel in the frame buffer
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let mask = 1 << (y % 8);
        if on {
            self.buffer[y / 8][x] |= mask;
        } else {
            self.buffer[y / 8][x] &= !mask;
        }
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}

fn font_for(scale: u8) -> &'static MonoFont<'static> {
    if scale <= 1 {
        &FONT_6X10
    } else {
        &FONT_10X20
    }
}

impl<B> OriginDimensions for Ssd1306<B> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<B: I2cBus> DrawTarget for Ssd1306<B> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl<B: I2cBus> DisplayBackend for Ssd1306<B> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, scale: u8, text: &str) -> Result<(), DisplayError> {
        let (cols, rows) = self.dimensions();
        if row >= rows || col >= cols {
            return Err(DisplayError::InvalidCoordinates);
        }

        let origin = Point::new(
            (col as usize * CELL_WIDTH) as i32,
            (row as usize * CELL_HEIGHT) as i32,
        );
        let style = MonoTextStyle::new(font_for(scale), BinaryColor::On);
        Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(self)
            .map_err(|e| match e {})?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.bus
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        ((WIDTH / CELL_WIDTH) as u8, (HEIGHT / CELL_HEIGHT) as u8)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use super::*;
    use crate::display::TextScreen;
    use crate::mock::{BusOp, MockBus};
    use duotherm_core::traits::TextDisplay;

    fn lit_pixels<B: I2cBus>(panel: &Ssd1306<B>) -> usize {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| panel.pixel(x, y))
            .count()
    }

    #[test]
    fn test_init_sends_one_command_per_write() {
        let mut panel = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        panel.init().unwrap();

        let bus = panel.release();
        assert_eq!(bus.ops.first(), Some(&BusOp::Write(0x3C, std::vec![0x00, 0xAE])));
        assert_eq!(bus.ops.last(), Some(&BusOp::Write(0x3C, std::vec![0x00, 0xAF])));
        assert!(bus
            .ops
            .iter()
            .all(|op| matches!(op, BusOp::Write(0x3C, d) if d.len() == 2 && d[0] == 0x00)));
    }

    #[test]
    fn test_text_grid() {
        let panel = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        assert_eq!(panel.dimensions(), (21, 6));
    }

    #[test]
    fn test_draw_text_lights_cell() {
        let mut panel = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        panel.draw_text(1, 2, 1, "8").unwrap();

        assert!(lit_pixels(&panel) > 0);
        // Nothing outside the 6x10 cell at column 2, row 1
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if panel.pixel(x, y) {
                    assert!((12..18).contains(&x), "x = {}", x);
                    assert!((10..20).contains(&y), "y = {}", y);
                }
            }
        }
    }

    #[test]
    fn test_scaled_text_uses_larger_font() {
        let mut small = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        let mut large = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        small.draw_text(0, 0, 1, "8").unwrap();
        large.draw_text(0, 0, 2, "8").unwrap();

        assert!(lit_pixels(&large) > lit_pixels(&small));
    }

    #[test]
    fn test_draw_out_of_range() {
        let mut panel = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        assert_eq!(
            panel.draw_text(6, 0, 1, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            panel.draw_text(0, 21, 1, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_clear_only_touches_buffer() {
        let mut panel = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        panel.draw_text(0, 0, 1, "Hi").unwrap();
        DisplayBackend::clear(&mut panel).unwrap();

        assert_eq!(lit_pixels(&panel), 0);
        assert!(panel.release().ops.is_empty());
    }

    #[test]
    fn test_flush_writes_every_page() {
        let mut panel = Ssd1306::new(MockBus::default(), DEFAULT_ADDRESS);
        panel.flush().unwrap();

        let bus = panel.release();
        assert_eq!(bus.ops.len(), PAGES * 4);
        assert_eq!(bus.ops[0], BusOp::Write(0x3C, std::vec![0x00, 0xB0]));
        assert_eq!(bus.ops[12], BusOp::Write(0x3C, std::vec![0x00, 0xB3]));
        match &bus.ops[3] {
            BusOp::Write(0x3C, data) => {
                assert_eq!(data.len(), WIDTH + 1);
                assert_eq!(data[0], 0x40);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_flush_failure_is_communication_error() {
        let bus = MockBus {
            fail_on: std::vec![3],
            ..Default::default()
        };
        let mut panel = Ssd1306::new(bus, DEFAULT_ADDRESS);

        assert_eq!(panel.flush(), Err(DisplayError::Communication));
        assert_eq!(panel.release().ops.len(), 4);
    }

    #[test]
    fn test_screen_on_shared_bus() {
        let bus = RefCell::new(MockBus::default());
        let mut screen = TextScreen::new(Ssd1306::new(&bus, DEFAULT_ADDRESS));

        screen.clear().unwrap();
        screen.print_line("AM2320 Temp: 25.60 C").unwrap();
        screen.print_line("NTC Temp: 24.60 C").unwrap();
        screen.present().unwrap();

        assert_eq!(bus.borrow().ops.len(), PAGES * 4);
        assert!(lit_pixels(screen.backend()) > 0);
    }
}
