//! Configuration toggles of [I2cHD44780Driver].
//!
//! Each toggle changes one field of the [DisplayState] and rewrites the whole register the field
//! belongs to, since the controller has no way to change a single flag.
use crate::lcd::hd44780::driver::{CursorDirection, HD44780Driver, I2cHD44780Driver};
use crate::lcd::hd44780::ext::DisplayExt;
use crate::lcd::hd44780::registers::CursorShiftFlags;
use crate::lcd::hd44780::state::{EntryDirection, EntryShift, Font, LineCount};
use crate::{I2cBus, LcdResult};
use embedded_hal::delay::DelayNs;
use log::debug;
use std::fmt;

impl<B: I2cBus, D: DelayNs> I2cHD44780Driver<B, D> {
    /// Sends the function set register built from the current state.
    pub fn write_function_set(&mut self) -> LcdResult<()> {
        let flags = self.state().function_set_flags();
        debug!("Function set {:08b}", flags.command());
        self.function_set(flags)
    }

    /// Sends the display control register built from the current state.
    pub fn write_display_control(&mut self) -> LcdResult<()> {
        let flags = self.state().display_control_flags();
        debug!("Display control {:08b}", flags.command());
        self.set_display_control(flags)
    }

    /// Sends the entry mode register built from the current state.
    pub fn write_entry_set(&mut self) -> LcdResult<()> {
        let flags = self.state().entry_mode_flags();
        debug!("Entry mode {:08b}", flags.command());
        self.set_entry_mode(flags)
    }

    pub fn clear(&mut self) -> LcdResult<()> {
        self.clear_display()
    }

    pub fn home(&mut self) -> LcdResult<()> {
        self.return_home()
    }

    pub fn blink_on(&mut self) -> LcdResult<()> {
        self.state_mut().blink_on = true;
        self.write_display_control()
    }

    pub fn blink_off(&mut self) -> LcdResult<()> {
        self.state_mut().blink_on = false;
        self.write_display_control()
    }

    pub fn cursor_on(&mut self) -> LcdResult<()> {
        self.state_mut().cursor_on = true;
        self.write_display_control()
    }

    pub fn cursor_off(&mut self) -> LcdResult<()> {
        self.state_mut().cursor_on = false;
        self.write_display_control()
    }

    /// Shows the display contents. DDRAM is kept while the display is off.
    pub fn display_on(&mut self) -> LcdResult<()> {
        self.state_mut().display_on = true;
        self.write_display_control()
    }

    pub fn display_off(&mut self) -> LcdResult<()> {
        self.state_mut().display_on = false;
        self.write_display_control()
    }

    pub fn backlight_on(&mut self) -> LcdResult<()> {
        self.set_backlight(true)
    }

    pub fn backlight_off(&mut self) -> LcdResult<()> {
        self.set_backlight(false)
    }

    /// Turns on the display and the backlight, in one display control write.
    pub fn turn_on(&mut self) -> LcdResult<()> {
        let state = self.state_mut();
        state.backlight_on = true;
        state.display_on = true;
        self.write_display_control()
    }

    /// Turns off the display and the backlight, in one display control write.
    pub fn turn_off(&mut self) -> LcdResult<()> {
        let state = self.state_mut();
        state.backlight_on = false;
        state.display_on = false;
        self.write_display_control()
    }

    pub fn set_entry_direction(&mut self, direction: EntryDirection) -> LcdResult<()> {
        self.state_mut().entry_direction = direction;
        self.write_entry_set()
    }

    pub fn set_entry_shift(&mut self, shift: EntryShift) -> LcdResult<()> {
        self.state_mut().entry_shift = shift;
        self.write_entry_set()
    }

    /// Changes the number of display lines.
    ///
    /// The datasheet only allows function set right after initialization, so call this before
    /// writing anything to the display.
    pub fn set_line_count(&mut self, line_count: LineCount) -> LcdResult<()> {
        self.state_mut().line_count = line_count;
        self.write_function_set()
    }

    /// Changes the font. Same restriction as [I2cHD44780Driver::set_line_count]; the 5x10 font
    /// only works in one-line mode.
    pub fn set_font(&mut self, font: Font) -> LcdResult<()> {
        self.state_mut().font = font;
        self.write_function_set()
    }

    /// Moves the cursor one position without writing anything.
    pub fn move_cursor(&mut self, direction: CursorDirection) -> LcdResult<()> {
        self.cursor_shift(CursorShiftFlags::CURSOR_MOVE | direction.shift_flag())
    }

    /// Scrolls the whole display one position; the cursor follows.
    pub fn scroll_display(&mut self, direction: CursorDirection) -> LcdResult<()> {
        self.cursor_shift(CursorShiftFlags::DISPLAY_MOVE | direction.shift_flag())
    }
}

impl<B: I2cBus, D: DelayNs> fmt::Write for I2cHD44780Driver<B, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LcdError;
    use crate::testing::{RecordingBus, Transfer};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use std::fmt::Write;

    fn lcd() -> I2cHD44780Driver<RecordingBus, NoopDelay> {
        let mut lcd = I2cHD44780Driver::new(RecordingBus::new(), NoopDelay::new(), 0x27).unwrap();
        lcd.bus_mut().clear();
        lcd
    }

    #[test]
    fn blink_toggle_keeps_other_display_flags() {
        let mut lcd = lcd();
        lcd.cursor_off().unwrap();
        lcd.blink_on().unwrap();
        lcd.blink_off().unwrap();

        assert!(!lcd.state().blink_on);
        let transfers = lcd.bus().transfers();
        let last = transfers.last().unwrap();
        assert_eq!(last.byte & 0x01, 0);
        assert_eq!(last, &Transfer::command(0x08 | 0x04));
        assert_eq!(
            transfers,
            vec![
                Transfer::command(0x08 | 0x04 | 0x01),
                Transfer::command(0x08 | 0x04 | 0x01),
                Transfer::command(0x08 | 0x04),
            ]
        );
    }

    #[test]
    fn display_toggles_rewrite_whole_register() {
        let mut lcd = lcd();
        lcd.display_off().unwrap();
        lcd.cursor_on().unwrap();
        lcd.display_on().unwrap();
        assert_eq!(
            lcd.bus().transfers(),
            vec![
                Transfer::command(0x08 | 0x02 | 0x01),
                Transfer::command(0x08 | 0x02 | 0x01),
                Transfer::command(0x08 | 0x04 | 0x02 | 0x01),
            ]
        );
    }

    #[test]
    fn entry_setters_rewrite_entry_register() {
        let mut lcd = lcd();
        lcd.set_entry_direction(EntryDirection::Right).unwrap();
        lcd.set_entry_shift(EntryShift::Increment).unwrap();
        lcd.set_entry_direction(EntryDirection::Left).unwrap();
        assert_eq!(
            lcd.bus().transfers(),
            vec![
                Transfer::command(0x04),
                Transfer::command(0x04 | 0x01),
                Transfer::command(0x04 | 0x02 | 0x01),
            ]
        );
    }

    #[test]
    fn function_set_setters_keep_four_bit_mode() {
        let mut lcd = lcd();
        lcd.set_line_count(LineCount::One).unwrap();
        lcd.set_font(Font::FiveByTen).unwrap();
        assert_eq!(
            lcd.bus().transfers(),
            vec![Transfer::command(0x20), Transfer::command(0x20 | 0x04)]
        );
        assert_eq!(lcd.state().line_count, LineCount::One);
        assert_eq!(lcd.state().font, Font::FiveByTen);
    }

    #[test]
    fn turn_off_folds_backlight_into_display_control() {
        let mut lcd = lcd();
        lcd.turn_off().unwrap();
        let nibbles = lcd.bus().nibbles();
        assert!(nibbles.iter().all(|n| !n.backlight));
        assert_eq!(
            lcd.bus().transfers(),
            vec![Transfer {
                backlight: false,
                ..Transfer::command(0x08 | 0x02 | 0x01)
            }]
        );

        lcd.bus_mut().clear();
        lcd.turn_on().unwrap();
        assert_eq!(
            lcd.bus().transfers(),
            vec![Transfer::command(0x08 | 0x04 | 0x02 | 0x01)]
        );
        assert!(lcd.state().backlight_on && lcd.state().display_on);
    }

    #[test]
    fn backlight_toggles_latch_nothing() {
        let mut lcd = lcd();
        lcd.backlight_off().unwrap();
        lcd.backlight_on().unwrap();
        assert_eq!(lcd.bus().values().len(), 2);
        assert!(lcd.bus().nibbles().is_empty());
    }

    #[test]
    fn shift_commands() {
        let mut lcd = lcd();
        lcd.move_cursor(CursorDirection::Right).unwrap();
        lcd.move_cursor(CursorDirection::Left).unwrap();
        lcd.scroll_display(CursorDirection::Left).unwrap();
        lcd.scroll_display(CursorDirection::Right).unwrap();
        assert_eq!(
            lcd.bus().transfers(),
            vec![
                Transfer::command(0x14),
                Transfer::command(0x10),
                Transfer::command(0x18),
                Transfer::command(0x1C),
            ]
        );
    }

    #[test]
    fn clear_and_home_send_fixed_opcodes() {
        let mut lcd = lcd();
        lcd.clear().unwrap();
        lcd.home().unwrap();
        assert_eq!(
            lcd.bus().transfers(),
            vec![Transfer::command(0x01), Transfer::command(0x02)]
        );
    }

    #[test]
    fn write_macro_prints() {
        let mut lcd = lcd();
        write!(lcd, "{}", 42).unwrap();
        assert_eq!(
            lcd.bus().transfers(),
            vec![Transfer::data(b'4'), Transfer::data(b'2')]
        );
        assert!(write!(lcd, "€").is_err());
    }

    #[test]
    fn toggle_state_survives_failed_write() {
        let mut lcd = lcd();
        lcd.bus_mut().fail_writes = true;
        assert!(matches!(lcd.cursor_off(), Err(LcdError::Transport(_))));
        assert!(!lcd.state().cursor_on);
    }
}
