use crate::lcd::hd44780::driver::HD44780Driver;
use crate::{LcdError, LcdResult};
use log::warn;

/// DDRAM address of the first column of each line. Lines 2 and 3 continue lines 0 and 1 in
/// memory, which is how 20x4 modules are wired.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Highest column the controller can address on a line.
pub const MAX_COLUMN: u8 = 39;

/// Number of user-definable characters in CGRAM.
pub const GLYPH_SLOTS: u8 = 8;

/// Bitmap of a custom character, one byte per pixel row, the low 5 bits used.
pub type GlyphPattern = [u8; 8];

/// Text-level operations available on every [HD44780Driver].
pub trait DisplayExt {
    /// Prints the string at the cursor position.
    ///
    /// Every character must fit the controller's 8-bit character ROM. If one doesn't, nothing is
    /// sent at all and the call fails with the first offending character.
    fn print(&mut self, s: &str) -> LcdResult<()>;

    /// Like [DisplayExt::print], but characters outside the character ROM are shown as `?`.
    fn print_lossy(&mut self, s: &str) -> LcdResult<()>;

    /// Moves the cursor to `column` (0–39) on `line` (0–3).
    fn set_cursor(&mut self, column: u8, line: u8) -> LcdResult<()>;

    /// Defines custom character `slot` (0–7), printable afterwards as that character code.
    ///
    /// The address pointer is moved back to the start of DDRAM afterwards, so the next print
    /// goes to the display rather than into CGRAM.
    fn create_char(&mut self, slot: u8, pattern: &GlyphPattern) -> LcdResult<()>;
}

fn rom_code(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok()
}

impl<T: ?Sized + HD44780Driver> DisplayExt for T {
    fn print(&mut self, s: &str) -> LcdResult<()> {
        if let Some(c) = s.chars().find(|&c| rom_code(c).is_none()) {
            return Err(LcdError::UnsupportedCharacter(c));
        }
        for code in s.chars().filter_map(rom_code) {
            self.send_data(code)?;
        }
        Ok(())
    }

    fn print_lossy(&mut self, s: &str) -> LcdResult<()> {
        for c in s.chars() {
            match rom_code(c) {
                Some(code) => self.send_data(code)?,
                None => {
                    warn!("Unsupported character: {}", c);
                    self.send_data(b'?')?
                }
            }
        }
        Ok(())
    }

    fn set_cursor(&mut self, column: u8, line: u8) -> LcdResult<()> {
        if column > MAX_COLUMN {
            return Err(LcdError::InvalidArgument);
        }
        let offset = ROW_OFFSETS
            .get(line as usize)
            .ok_or(LcdError::InvalidArgument)?;
        self.set_ddram_address(offset + column)
    }

    fn create_char(&mut self, slot: u8, pattern: &GlyphPattern) -> LcdResult<()> {
        if slot >= GLYPH_SLOTS {
            return Err(LcdError::InvalidArgument);
        }
        self.set_cgram_address(slot << 3)?;
        for &row in pattern {
            self.send_data(row)?;
        }
        self.set_ddram_address(0)
    }
}
