//! I2C bus abstractions
//!
//! The display panel is write-only: commands and pixel data go out, nothing
//! is ever read back. The trait therefore only carries `write`. Writes are
//! async so a full repaint yields to the input tasks between transactions.

use core::future::Future;

use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};
use embedded_hal_async::i2c::I2c;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Device did not acknowledge its address or a data byte
    Nack,
    /// Arbitration lost to another master
    ArbitrationLost,
    /// Bus error (misplaced start/stop)
    Bus,
    /// Controller FIFO overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => I2cBusError::Nack,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Write-only I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as a single transaction
    fn write(
        &mut self,
        address: u8,
        data: &[u8],
    ) -> impl Future<Output = Result<(), Self::Error>>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Fast mode (400 kHz), what SSD1306 modules are usually run at
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// Adapter exposing any `embedded-hal-async` I2C master as an [`I2cBus`]
///
/// Chip HALs (embassy-rp and friends) implement `embedded_hal_async::i2c::I2c`;
/// wrapping them here maps their error types onto [`I2cBusError`].
pub struct EmbeddedHalBus<T> {
    inner: T,
}

impl<T> EmbeddedHalBus<T> {
    /// Wrap an async I2C master
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: I2c> I2cBus for EmbeddedHalBus<T> {
    type Error = I2cBusError;

    async fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(address, data)
            .await
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            I2cBusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            I2cBusError::Nack
        );
        assert_eq!(
            I2cBusError::from(ErrorKind::ArbitrationLoss),
            I2cBusError::ArbitrationLost
        );
        assert_eq!(I2cBusError::from(ErrorKind::Other), I2cBusError::Other);
    }

    #[test]
    fn test_default_is_fast_mode() {
        assert_eq!(I2cConfig::default().frequency, 400_000);
    }
}
