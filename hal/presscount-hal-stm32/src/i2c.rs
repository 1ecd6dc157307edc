//! I2C bus driver for STM32
//!
//! Wraps embassy's blocking I2C master so the LCD driver can use it through
//! [`presscount_hal::I2cBus`].

use embassy_stm32::i2c::{self, Error as I2cError, I2c, Master};
use embassy_stm32::mode::Blocking;
use embassy_stm32::time::Hertz;
use embassy_time::Duration;

use presscount_hal::{I2cBus, I2cConfig};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Transfer did not finish within the configured timeout
    Timeout,
    /// CRC error
    Crc,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<I2cError> for I2cBusError {
    fn from(e: I2cError) -> Self {
        match e {
            I2cError::Bus => I2cBusError::Bus,
            I2cError::Arbitration => I2cBusError::ArbitrationLost,
            I2cError::Nack => I2cBusError::Nack,
            I2cError::Timeout => I2cBusError::Timeout,
            I2cError::Crc => I2cBusError::Crc,
            I2cError::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Build the embassy peripheral config from the board-agnostic one
pub fn peripheral_config(config: &I2cConfig) -> i2c::Config {
    let mut cfg = i2c::Config::default();
    cfg.frequency = Hertz(config.frequency);
    cfg.timeout = Duration::from_millis(config.timeout_ms as u64);
    cfg
}

/// Blocking I2C master
///
/// Every write blocks until the peripheral finishes, reports an error, or
/// the timeout from [`I2cConfig`] expires.
pub struct BlockingI2c<'d> {
    i2c: I2c<'d, Blocking, Master>,
}

impl<'d> BlockingI2c<'d> {
    /// Wrap an already configured embassy I2C peripheral
    pub fn new(i2c: I2c<'d, Blocking, Master>) -> Self {
        Self { i2c }
    }
}

impl I2cBus for BlockingI2c<'_> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_write(address, data)?;
        Ok(())
    }
}
