//! SSD1306 text driver for the Timedial status panel
//!
//! This crate provides:
//! - [`Command`], the closed set of controller commands the panel needs,
//!   and [`INIT_SEQUENCE`], the bring-up order as data
//! - [`Ssd1306`], a write-only driver painting 8-pixel glyphs onto a
//!   page-addressed 128x32 panel over any [`timedial_hal::I2cBus`]
//! - [`StatusScreen`], the three-line dial status screen
//!
//! # Panel geometry
//!
//! The panel is 128 columns by 4 pages of 8 pixel rows. Text is addressed
//! on a 16x4 grid whose columns are 16 pixels apart; glyphs are 8 pixels
//! wide and advance the controller's column pointer on their own, so a
//! full line of 16 characters fills the row.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod driver;
pub mod error;
pub mod font;
pub mod screen;

// Re-export key types
pub use command::{AddressingMode, Command, INIT_SEQUENCE};
pub use driver::{Ssd1306, SSD1306_ADDR};
pub use error::DisplayError;
pub use screen::{StatusScreen, TITLE};

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Panel height in pixels
pub const HEIGHT: usize = 32;

/// Pages of 8 pixel rows
pub const PAGES: usize = HEIGHT / 8;

/// Text grid columns
pub const TEXT_COLS: u8 = 16;

/// Text grid rows
pub const TEXT_ROWS: u8 = 4;

/// Pixel distance between text grid columns
pub const TEXT_COLUMN_PITCH: u8 = 16;
