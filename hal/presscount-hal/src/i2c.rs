//! I2C bus abstractions
//!
//! Provides the master-mode write primitive the display driver sends its
//! nibble frames through.

/// I2C bus master
///
/// Only writes are needed: the PCF8574 backpack is driven output-only and
/// the LCD's read/write line is tied low.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// Blocks until the transfer completes, fails, or the bus timeout
    /// configured on the peripheral expires.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Upper bound on a single blocking transfer, in milliseconds
    pub timeout_ms: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz) with a 100 ms transfer timeout
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        timeout_ms: 100,
    };
}
