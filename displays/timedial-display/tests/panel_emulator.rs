//! Drives the SSD1306 driver against an emulated panel
//!
//! The emulator interprets the command stream the way the controller does
//! (addressing windows, horizontal auto-increment) and keeps its own GDDRAM,
//! so tests compare what would actually be lit.

use core::cell::Cell;

use chrono::NaiveDate;
use embassy_futures::select::{select, Either};
use embassy_futures::{block_on, yield_now};
use timedial_core::{DialMode, DialView};
use timedial_display::font::{glyph, GLYPH_WIDTH};
use timedial_display::{Ssd1306, StatusScreen, PAGES, SSD1306_ADDR, WIDTH};
use timedial_hal::{I2cBus, I2cBusError};

struct Panel {
    ram: [[u8; WIDTH]; PAGES],
    col_window: (u8, u8),
    page_window: (u8, u8),
    col: u8,
    page: u8,
    on: bool,
    /// Hand control back to the executor once per transaction
    yielding: bool,
    transactions: usize,
}

impl Panel {
    fn new(fill: u8) -> Self {
        Self {
            ram: [[fill; WIDTH]; PAGES],
            col_window: (0, 127),
            page_window: (0, 7),
            col: 0,
            page: 0,
            on: false,
            yielding: false,
            transactions: 0,
        }
    }

    fn run_commands(&mut self, mut bytes: &[u8]) {
        while let Some((&op, rest)) = bytes.split_first() {
            let args = match op {
                0x21 | 0x22 => 2,
                0x20 | 0x81 | 0x8D | 0xA8 | 0xD3 | 0xD5 | 0xD9 | 0xDA | 0xDB => 1,
                _ => 0,
            };
            let (params, rest) = rest.split_at(args);
            match op {
                0x21 => {
                    self.col_window = (params[0], params[1]);
                    self.col = params[0];
                }
                0x22 => {
                    self.page_window = (params[0], params[1]);
                    self.page = params[0];
                }
                0xAE => self.on = false,
                0xAF => self.on = true,
                _ => {}
            }
            bytes = rest;
        }
    }

    fn run_data(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if usize::from(self.col) < WIDTH && usize::from(self.page) < PAGES {
                self.ram[usize::from(self.page)][usize::from(self.col)] = b;
            }
            if self.col >= self.col_window.1 {
                self.col = self.col_window.0;
                self.page = if self.page >= self.page_window.1 {
                    self.page_window.0
                } else {
                    self.page + 1
                };
            } else {
                self.col += 1;
            }
        }
    }
}

impl I2cBus for Panel {
    type Error = I2cBusError;

    async fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        if self.yielding {
            yield_now().await;
        }
        self.transactions += 1;
        if address != SSD1306_ADDR {
            return Err(I2cBusError::Nack);
        }
        match data.split_first() {
            Some((0x00, rest)) => self.run_commands(rest),
            Some((0x40, rest)) => self.run_data(rest),
            _ => return Err(I2cBusError::Other),
        }
        Ok(())
    }
}

async fn fresh() -> Ssd1306<Panel> {
    let mut display = Ssd1306::new(Panel::new(0));
    display.init().await.unwrap();
    display
}

fn view() -> DialView {
    DialView {
        date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        mode: DialMode::Month,
        dial_value: 0,
    }
}

#[test]
fn init_turns_panel_on() {
    block_on(async {
        let panel = fresh().await.release();
        assert!(panel.on);
        assert_eq!(panel.col_window, (0, 127));
        assert_eq!(panel.page_window, (0, 3));
    });
}

#[test]
fn clear_blanks_every_pixel_and_rewinds() {
    block_on(async {
        let mut display = Ssd1306::new(Panel::new(0xFF));
        display.clear().await.unwrap();
        let panel = display.release();
        assert!(panel.ram.iter().flatten().all(|&b| b == 0));
        assert_eq!((panel.col, panel.page), (0, 0));
    });
}

#[test]
fn clear_then_write_matches_init_then_write() {
    block_on(async {
        let mut reference = fresh().await;
        reference.write("Web Time Machine").await.unwrap();

        let mut display = fresh().await;
        display.set_cursor_position(3, 2).await.unwrap();
        display.write("garbage garbage").await.unwrap();
        display.clear().await.unwrap();
        display.write("Web Time Machine").await.unwrap();

        assert_eq!(display.release().ram, reference.release().ram);
    });
}

#[test]
fn cursor_places_text_on_requested_row() {
    block_on(async {
        let mut display = fresh().await;
        display.set_cursor_position(2, 1).await.unwrap();
        display.write("A").await.unwrap();
        let panel = display.release();

        let start = 2 * 16;
        assert_eq!(panel.ram[1][start..start + GLYPH_WIDTH], glyph('A').unwrap());
        assert!(panel.ram[0].iter().all(|&b| b == 0));
        assert!(panel.ram[2].iter().all(|&b| b == 0));
    });
}

#[test]
fn full_row_wraps_into_next_page() {
    block_on(async {
        let mut display = fresh().await;
        display.set_cursor_position(0, 0).await.unwrap();
        display.write("0123456789ABCDEFG").await.unwrap();
        let panel = display.release();

        assert_eq!(panel.ram[0][120..128], glyph('F').unwrap());
        assert_eq!(panel.ram[1][0..GLYPH_WIDTH], glyph('G').unwrap());
    });
}

#[test]
fn out_of_grid_cursor_keeps_pointer() {
    block_on(async {
        let mut display = fresh().await;
        display.set_cursor_position(0, 2).await.unwrap();
        display.set_cursor_position(16, 0).await.unwrap();
        display.set_cursor_position(0, 4).await.unwrap();
        display.write("X").await.unwrap();
        let panel = display.release();
        assert_eq!(panel.ram[2][0..GLYPH_WIDTH], glyph('X').unwrap());
    });
}

#[test]
fn status_screen_renders_three_rows() {
    block_on(async {
        let mut display = fresh().await;
        StatusScreen::new(&view()).render(&mut display).await.unwrap();
        let panel = display.release();

        let cell = |page: usize, index: usize| &panel.ram[page][index * GLYPH_WIDTH..(index + 1) * GLYPH_WIDTH];
        assert_eq!(cell(0, 0), glyph('W').unwrap());
        assert_eq!(cell(1, 0), glyph('J').unwrap());
        assert_eq!(cell(1, 5), glyph('2').unwrap());
        assert_eq!(cell(2, 0), glyph('M').unwrap());
        assert_eq!(cell(2, 6), glyph('M').unwrap());
        assert!(panel.ram[3].iter().all(|&b| b == 0));
    });
}

#[test]
fn rerender_after_mode_change_replaces_text() {
    block_on(async {
        let mut display = fresh().await;
        StatusScreen::new(&view()).render(&mut display).await.unwrap();

        let year = DialView {
            mode: DialMode::Year,
            ..view()
        };
        StatusScreen::new(&year).render(&mut display).await.unwrap();

        let mut reference = fresh().await;
        StatusScreen::new(&year).render(&mut reference).await.unwrap();
        assert_eq!(display.release().ram, reference.release().ram);
    });
}

#[test]
fn repaint_yields_between_transactions() {
    let mut panel = Panel::new(0);
    panel.yielding = true;
    let mut display = Ssd1306::new(panel);
    let polled = Cell::new(0usize);

    let repaint = async {
        display.init().await.unwrap();
        StatusScreen::new(&view()).render(&mut display).await.unwrap();
    };
    let other_task = async {
        loop {
            polled.set(polled.get() + 1);
            yield_now().await;
        }
    };
    let outcome = block_on(select(repaint, other_task));
    assert!(matches!(outcome, Either::First(())));

    let panel = display.release();
    assert!(panel.transactions > 0);
    assert!(polled.get() >= panel.transactions);
}
