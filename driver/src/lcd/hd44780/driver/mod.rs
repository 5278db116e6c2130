mod init;
mod pcf8574;

use crate::lcd::hd44780::registers::{
    Command, CursorShiftFlags, DisplayControlFlags, EntryModeFlags, FunctionSetFlags,
};
use crate::{LcdError, LcdResult};
pub use init::*;
pub use pcf8574::*;
use std::fmt::Debug;

/// Low-level HD44780 command interface.
///
/// Only writes are supported: behind an I²C expander the R/W line is tied to write, so the busy
/// flag and address counter can never be read. Implementations wait out each command's execution
/// time instead.
pub trait HD44780Driver: Debug {
    /// Runs the power-on initialization sequence.
    fn init(&mut self) -> LcdResult<()>;

    /// Clears the display and sets the cursor to the home position.
    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(Command::ClearDisplay.opcode())
    }

    /// Sets the cursor to the home position and undoes any display shift.
    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(Command::ReturnHome.opcode())
    }

    /// Sets the text direction and display shift.
    fn set_entry_mode(&mut self, flags: EntryModeFlags) -> LcdResult<()> {
        self.send_command(flags.command())
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    fn set_display_control(&mut self, flags: DisplayControlFlags) -> LcdResult<()> {
        self.send_command(flags.command())
    }

    /// Moves the cursor or shifts the display by one position.
    fn cursor_shift(&mut self, flags: CursorShiftFlags) -> LcdResult<()> {
        self.send_command(flags.command())
    }

    /// Sets the interface width, number of lines and font.
    fn function_set(&mut self, flags: FunctionSetFlags) -> LcdResult<()> {
        self.send_command(flags.command())
    }

    /// Sets the CGRAM address.
    fn set_cgram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b00111111 {
            return Err(LcdError::InvalidArgument);
        }
        self.send_command(Command::SetCgramAddr.opcode() | address)
    }

    /// Sets the DDRAM address.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b01111111 {
            return Err(LcdError::InvalidArgument);
        }
        self.send_command(Command::SetDdramAddr.opcode() | address)
    }

    // Low-level commands, used by everything above.

    /// Sends a command to the HD44780 controller with RS cleared.
    fn send_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends data to the HD44780 controller with RS set.
    fn send_data(&mut self, data: u8) -> LcdResult<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    Left,
    Right,
}

impl CursorDirection {
    pub(crate) fn shift_flag(self) -> CursorShiftFlags {
        match self {
            CursorDirection::Left => CursorShiftFlags::MOVE_LEFT,
            CursorDirection::Right => CursorShiftFlags::MOVE_RIGHT,
        }
    }
}
