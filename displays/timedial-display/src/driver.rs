//! SSD1306 OLED display driver
//!
//! Driver for 128x32 SSD1306-based OLED panels via I2C. There is no frame
//! buffer: text goes straight into the controller's GDDRAM, using the
//! horizontal addressing mode to advance the column pointer.

use timedial_hal::{I2cBus, I2cBusError};

use crate::command::{Command, INIT_SEQUENCE, MAX_COMMAND_LEN};
use crate::error::DisplayError;
use crate::font;
use crate::{PAGES, TEXT_COLS, TEXT_COLUMN_PITCH, TEXT_ROWS, WIDTH};

/// SSD1306 I2C address (0x3C, or 0x3D with SA0 high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Control byte: the rest of the transaction is commands
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: the rest of the transaction is GDDRAM data
const CONTROL_DATA: u8 = 0x40;

/// Data bytes per transaction
const MAX_DATA_CHUNK: usize = 16;

const LAST_COLUMN: u8 = (WIDTH - 1) as u8;
const LAST_PAGE: u8 = (PAGES - 1) as u8;

/// SSD1306 OLED driver
pub struct Ssd1306<B> {
    bus: B,
    address: u8,
}

impl<B> Ssd1306<B>
where
    B: I2cBus<Error = I2cBusError>,
{
    /// Create a driver at the default address
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, SSD1306_ADDR)
    }

    /// Create a driver at a specific address
    pub fn with_address(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Run the bring-up sequence
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        for cmd in INIT_SEQUENCE {
            self.command(cmd).await?;
        }
        Ok(())
    }

    /// Send one command
    pub async fn command(&mut self, cmd: Command) -> Result<(), DisplayError> {
        let mut encoded = [0u8; MAX_COMMAND_LEN];
        let len = cmd.encode(&mut encoded);

        let mut buf = [CONTROL_COMMAND; 1 + MAX_COMMAND_LEN];
        buf[1..=len].copy_from_slice(&encoded[..len]);
        self.bus.write(self.address, &buf[..=len]).await?;
        Ok(())
    }

    /// Stream bytes into GDDRAM at the current pointer
    pub async fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let mut buf = [CONTROL_DATA; 1 + MAX_DATA_CHUNK];
        for chunk in bytes.chunks(MAX_DATA_CHUNK) {
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.bus.write(self.address, &buf[..=chunk.len()]).await?;
        }
        Ok(())
    }

    /// Blank the whole panel
    ///
    /// Leaves the addressing windows covering the whole panel with the
    /// pointer back at column 0, page 0.
    pub async fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(Command::ColumnAddress {
            start: 0,
            end: LAST_COLUMN,
        })
        .await?;
        self.command(Command::PageAddress {
            start: 0,
            end: LAST_PAGE,
        })
        .await?;

        let zeros = [0u8; MAX_DATA_CHUNK];
        for _ in 0..(WIDTH * PAGES) / MAX_DATA_CHUNK {
            self.data(&zeros).await?;
        }
        Ok(())
    }

    /// Move the write pointer to a text grid cell
    ///
    /// Cells outside the 16x4 grid are ignored.
    pub async fn set_cursor_position(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= TEXT_COLS || row >= TEXT_ROWS {
            return Ok(());
        }
        self.command(Command::ColumnAddress {
            start: col * TEXT_COLUMN_PITCH,
            end: LAST_COLUMN,
        })
        .await?;
        self.command(Command::PageAddress {
            start: row,
            end: LAST_PAGE,
        })
        .await
    }

    /// Paint text at the current pointer
    ///
    /// The whole string is checked against the font before anything is
    /// sent. No wrapping or truncation: callers size the text to the panel.
    pub async fn write(&mut self, text: &str) -> Result<(), DisplayError> {
        if let Some(ch) = text.chars().find(|&ch| font::glyph(ch).is_none()) {
            return Err(DisplayError::UnsupportedGlyph(ch));
        }
        for ch in text.chars() {
            let glyph = font::glyph(ch).ok_or(DisplayError::UnsupportedGlyph(ch))?;
            self.data(&glyph).await?;
        }
        Ok(())
    }
}
