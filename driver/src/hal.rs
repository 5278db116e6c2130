//! [I2cBus] implementation over the `embedded-hal` 1.0 I²C traits.
use crate::{I2cAddress, I2cBus, LcdError, LcdResult};
use embedded_hal::i2c::{Error, ErrorKind, I2c};
use log::trace;
use std::fmt::{Debug, Formatter};

/// Adapts any [embedded_hal::i2c::I2c] bus to the [I2cBus] interface.
pub struct HalI2cBus<I> {
    i2c: I,
    name: String,
}

impl<I: I2c> HalI2cBus<I> {
    pub fn new(i2c: I) -> Self {
        Self::named(i2c, "i2c")
    }

    /// Same as [HalI2cBus::new], but the given name is used in debug output.
    pub fn named(i2c: I, name: impl Into<String>) -> Self {
        HalI2cBus {
            i2c,
            name: name.into(),
        }
    }

    /// Gives back the wrapped bus.
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I> Debug for HalI2cBus<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "HalI2cBus({})", self.name)
    }
}

impl<I: I2c> I2cBus for HalI2cBus<I> {
    fn write_byte(&mut self, address: I2cAddress, value: u8) -> LcdResult<()> {
        trace!("{:?} {} <- {:08b}", self, address, value);
        self.i2c
            .write(address.get(), &[value])
            .map_err(|e| LcdError::Transport(e.kind()))
    }

    /// Probes by reading a single byte. PCF8574-style expanders answer reads with their pin
    /// state, so this has no effect on the outputs.
    fn probe(&mut self, address: I2cAddress) -> LcdResult<bool> {
        let mut buffer = [0u8; 1];
        match self.i2c.read(address.get(), &mut buffer) {
            Ok(()) => Ok(true),
            Err(e) => match e.kind() {
                ErrorKind::NoAcknowledge(_) => Ok(false),
                kind => Err(LcdError::Transport(kind)),
            },
        }
    }
}

/// The `/dev/i2c-N` bus type returned by [open_linux_bus].
#[cfg(target_os = "linux")]
pub type LinuxI2cBus = HalI2cBus<linux_embedded_hal::I2cdev>;

/// Opens `/dev/i2c-{bus_id}`.
///
/// # Errors
/// - `LcdError::TransportUnavailable` if the device node cannot be opened.
#[cfg(target_os = "linux")]
pub fn open_linux_bus(bus_id: u8) -> LcdResult<LinuxI2cBus> {
    let path = format!("/dev/i2c-{}", bus_id);
    let i2c = linux_embedded_hal::I2cdev::new(&path)
        .map_err(|e| LcdError::TransportUnavailable(format!("{}: {}", path, e)))?;
    Ok(HalI2cBus::named(i2c, path))
}
