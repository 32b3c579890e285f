//! Dial status screen
//!
//! ```text
//! row 0  Web Time Machine
//! row 1  June 2024          (padded to the full row)
//! row 2  Mode: Month
//! ```
//!
//! Every refresh repaints the whole panel.

use core::fmt::Write;

use heapless::String;
use timedial_core::{date, DialView};
use timedial_hal::{I2cBus, I2cBusError};

use crate::driver::Ssd1306;
use crate::error::DisplayError;
use crate::TEXT_COLS;

/// Fixed first line
pub const TITLE: &str = "Web Time Machine";

/// Rows used by the status screen
pub const STATUS_ROWS: usize = 3;

const LINE_LEN: usize = TEXT_COLS as usize;

/// Text of the status screen for one dial view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusScreen {
    lines: [String<LINE_LEN>; STATUS_ROWS],
}

impl StatusScreen {
    /// Lay out the screen for `view`
    pub fn new(view: &DialView) -> Self {
        let mut title = String::new();
        let _ = title.push_str(TITLE);

        // Pad so a shorter label fully overwrites a longer one
        let mut label = date::month_year_label(view.date);
        while label.push(' ').is_ok() {}

        let mut mode = String::new();
        let _ = write!(mode, "Mode: {}", view.mode.label());

        Self {
            lines: [title, label, mode],
        }
    }

    /// Text of one row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Repaint the panel
    pub async fn render<B>(&self, display: &mut Ssd1306<B>) -> Result<(), DisplayError>
    where
        B: I2cBus<Error = I2cBusError>,
    {
        display.clear().await?;
        for (row, line) in self.lines.iter().enumerate() {
            display.set_cursor_position(0, row as u8).await?;
            display.write(line).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use timedial_core::DialMode;

    fn view(y: i32, m: u32, mode: DialMode) -> DialView {
        DialView {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            mode,
            dial_value: 0,
        }
    }

    #[test]
    fn test_layout() {
        let screen = StatusScreen::new(&view(2024, 6, DialMode::Month));
        assert_eq!(screen.line(0), Some("Web Time Machine"));
        assert_eq!(screen.line(1), Some("June 2024       "));
        assert_eq!(screen.line(2), Some("Mode: Month"));
        assert_eq!(screen.line(3), None);
    }

    #[test]
    fn test_long_label_fills_row() {
        let screen = StatusScreen::new(&view(1999, 9, DialMode::Year));
        assert_eq!(screen.line(1), Some("September 1999  "));
        assert_eq!(screen.line(2), Some("Mode: Year"));
    }
}
