//! HD44780 character LCD behind a PCF8574-style I²C expander.
//!
//! [driver::I2cHD44780Driver] is the device. Low-level commands come from the
//! [driver::HD44780Driver] trait, text output from [DisplayExt], and the configuration toggles
//! (cursor, blink, backlight, ...) are methods of the driver itself.
//!
//! ```no_run
//! use lcdpcf_driver::lcd::hd44780::DisplayExt;
//! use lcdpcf_driver::lcd::hd44780::driver::I2cHD44780Driver;
//!
//! # fn main() -> lcdpcf_driver::LcdResult<()> {
//! let mut lcd = I2cHD44780Driver::open(1, 0x27)?;
//! lcd.cursor_off()?;
//! lcd.set_cursor(0, 1)?;
//! lcd.print("Hello")?;
//! # Ok(())
//! # }
//! ```

pub mod driver;
pub mod registers;
mod display;
mod ext;
mod state;

pub use ext::*;
pub use state::*;
