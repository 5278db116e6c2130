pub mod delay;
pub mod hal;
pub mod lcd;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt::{Debug, Display, Formatter};
use std::ops::RangeInclusive;
use embedded_hal::i2c::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),
    #[error("transport error: {0}")]
    Transport(ErrorKind),
    #[error("invalid argument")]
    InvalidArgument,
    #[error("character {0:?} is not in the controller character ROM")]
    UnsupportedCharacter(char),
    #[error("the display has not finished initialization")]
    NotReady,
}

pub type LcdResult<T> = Result<T, LcdError>;

/// A 7-bit I²C device address.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// The highest address representable in 7 bits.
    pub const MAX: u8 = 0x7F;

    /// Creates a new address.
    ///
    /// # Errors
    /// - `LcdError::InvalidArgument` if the value does not fit in 7 bits.
    pub fn new(address: u8) -> LcdResult<Self> {
        if address > Self::MAX {
            return Err(LcdError::InvalidArgument);
        }
        Ok(I2cAddress(address))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for I2cAddress {
    type Error = LcdError;

    fn try_from(value: u8) -> LcdResult<Self> {
        I2cAddress::new(value)
    }
}

impl Display for I2cAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Write-only access to devices on an I²C bus, plus presence probing.
///
/// This is the only thing the LCD driver needs from the bus. See [hal::HalI2cBus] for the
/// implementation over any `embedded-hal` bus, and [hal::open_linux_bus] for `/dev/i2c-N`.
pub trait I2cBus: Debug {
    /// Writes a single byte to the device at `address`.
    fn write_byte(&mut self, address: I2cAddress, value: u8) -> LcdResult<()>;

    /// Checks whether a device acknowledges `address`.
    ///
    /// Returns `Ok(false)` if nothing answers, and an error only if the bus itself failed.
    fn probe(&mut self, address: I2cAddress) -> LcdResult<bool>;

    /// Probes every address in `addresses` and returns the ones that answered.
    ///
    /// Values above [I2cAddress::MAX] are skipped.
    fn scan(&mut self, addresses: RangeInclusive<u8>) -> LcdResult<Vec<I2cAddress>> {
        let mut found = Vec::new();
        for address in addresses.filter_map(|a| I2cAddress::new(a).ok()) {
            if self.probe(address)? {
                found.push(address);
            }
        }
        Ok(found)
    }
}
