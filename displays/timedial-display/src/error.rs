//! Display errors

use timedial_hal::I2cBusError;

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The bus write failed
    Bus(I2cBusError),
    /// The text contains a character the font does not have
    ///
    /// Nothing of the offending write reaches the panel.
    UnsupportedGlyph(char),
}

impl From<I2cBusError> for DisplayError {
    fn from(e: I2cBusError) -> Self {
        DisplayError::Bus(e)
    }
}
