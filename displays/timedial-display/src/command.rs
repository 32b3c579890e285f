//! SSD1306 command set
//!
//! Only the commands the status panel uses. Each command encodes to one to
//! three bytes and is sent as its own bus transaction.

/// Longest encoded command
pub const MAX_COMMAND_LEN: usize = 3;

/// GDDRAM pointer advance after each data byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingMode {
    /// Column first, wrapping into the next page at the window edge
    Horizontal = 0x00,
    /// Page first, wrapping into the next column
    Vertical = 0x01,
    /// Column only, no wrap
    Page = 0x02,
}

/// Controller command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    DisplayOff,
    DisplayOn,
    /// Clock divide ratio (low nibble) and oscillator frequency (high nibble)
    ClockDivide(u8),
    /// Active rows minus one
    MultiplexRatio(u8),
    DisplayOffset(u8),
    /// RAM row shown at the top, 0..=63
    StartLine(u8),
    ChargePump(bool),
    AddressingMode(AddressingMode),
    /// Map column 127 to SEG0
    SegmentRemap(bool),
    /// Scan COM lines from the last one down
    ComScanReversed(bool),
    /// COM pins hardware configuration byte
    ComPins(u8),
    Contrast(u8),
    /// Phase 1 period (low nibble) and phase 2 period (high nibble)
    PreCharge(u8),
    VcomDeselect(u8),
    /// Light every pixel regardless of RAM (test mode)
    EntireDisplayOn(bool),
    Inverted(bool),
    /// Column window for the addressing pointer
    ColumnAddress { start: u8, end: u8 },
    /// Page window for the addressing pointer
    PageAddress { start: u8, end: u8 },
}

impl Command {
    /// Encode into `out`, returning the number of bytes used
    pub fn encode(self, out: &mut [u8; MAX_COMMAND_LEN]) -> usize {
        let mut put = |bytes: &[u8]| {
            out[..bytes.len()].copy_from_slice(bytes);
            bytes.len()
        };
        match self {
            Command::DisplayOff => put(&[0xAE]),
            Command::DisplayOn => put(&[0xAF]),
            Command::ClockDivide(v) => put(&[0xD5, v]),
            Command::MultiplexRatio(v) => put(&[0xA8, v]),
            Command::DisplayOffset(v) => put(&[0xD3, v]),
            Command::StartLine(line) => put(&[0x40 | (line & 0x3F)]),
            Command::ChargePump(on) => put(&[0x8D, if on { 0x14 } else { 0x10 }]),
            Command::AddressingMode(mode) => put(&[0x20, mode as u8]),
            Command::SegmentRemap(remap) => put(&[0xA0 | u8::from(remap)]),
            Command::ComScanReversed(rev) => put(&[if rev { 0xC8 } else { 0xC0 }]),
            Command::ComPins(v) => put(&[0xDA, v]),
            Command::Contrast(v) => put(&[0x81, v]),
            Command::PreCharge(v) => put(&[0xD9, v]),
            Command::VcomDeselect(v) => put(&[0xDB, v]),
            Command::EntireDisplayOn(on) => put(&[0xA4 | u8::from(on)]),
            Command::Inverted(inv) => put(&[0xA6 | u8::from(inv)]),
            Command::ColumnAddress { start, end } => put(&[0x21, start, end]),
            Command::PageAddress { start, end } => put(&[0x22, start, end]),
        }
    }
}

/// Bring-up order for the 128x32 panel
///
/// The charge pump and addressing mode must be configured before the panel
/// is switched on. The sequence ends with the addressing windows covering
/// the whole panel, the same state [`crate::Ssd1306::clear`] leaves behind.
pub const INIT_SEQUENCE: [Command; 18] = [
    Command::DisplayOff,
    Command::ClockDivide(0x80),
    Command::MultiplexRatio(0x1F),
    Command::DisplayOffset(0x00),
    Command::StartLine(0),
    Command::ChargePump(true),
    Command::AddressingMode(AddressingMode::Horizontal),
    Command::SegmentRemap(true),
    Command::ComScanReversed(true),
    Command::ComPins(0x02),
    Command::Contrast(0x8F),
    Command::PreCharge(0xF1),
    Command::VcomDeselect(0x40),
    Command::EntireDisplayOn(false),
    Command::Inverted(false),
    Command::DisplayOn,
    Command::ColumnAddress { start: 0, end: 127 },
    Command::PageAddress { start: 0, end: 3 },
];
