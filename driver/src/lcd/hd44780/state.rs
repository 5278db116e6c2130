use crate::lcd::hd44780::registers::{DisplayControlFlags, EntryModeFlags, FunctionSetFlags};

/// Which way text flows after a write. Matches the ENTRY_LEFT/ENTRY_RIGHT flags.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum EntryDirection {
    /// Text flows left to right, the address counter increments.
    #[default]
    Left,
    /// Text flows right to left, the address counter decrements.
    Right,
}

/// Whether the whole display shifts after a write.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum EntryShift {
    Increment,
    /// The display stays put, only the cursor moves.
    #[default]
    Decrement,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LineCount {
    One,
    #[default]
    Two,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Font {
    #[default]
    FiveByEight,
    FiveByTen,
}

/// Software mirror of the controller configuration.
///
/// The expander cannot be read back, so this is the only record of what the controller was told.
/// The controller has no per-bit writes either: the `*_flags` methods always produce the complete
/// register from every field of its group.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DisplayState {
    pub backlight_on: bool,
    pub entry_direction: EntryDirection,
    pub entry_shift: EntryShift,
    pub display_on: bool,
    pub cursor_on: bool,
    pub blink_on: bool,
    pub line_count: LineCount,
    pub font: Font,
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState {
            backlight_on: true,
            entry_direction: EntryDirection::default(),
            entry_shift: EntryShift::default(),
            display_on: true,
            cursor_on: true,
            blink_on: true,
            line_count: LineCount::default(),
            font: Font::default(),
        }
    }
}

impl DisplayState {
    /// Function set register. The interface is always 4-bit once initialized.
    pub fn function_set_flags(&self) -> FunctionSetFlags {
        let lines = match self.line_count {
            LineCount::One => FunctionSetFlags::ONE_LINE,
            LineCount::Two => FunctionSetFlags::TWO_LINE,
        };
        let font = match self.font {
            Font::FiveByEight => FunctionSetFlags::FIVE_BY_EIGHT,
            Font::FiveByTen => FunctionSetFlags::FIVE_BY_TEN,
        };
        FunctionSetFlags::FOUR_BIT | lines | font
    }

    pub fn display_control_flags(&self) -> DisplayControlFlags {
        let display = if self.display_on {
            DisplayControlFlags::DISPLAY_ON
        } else {
            DisplayControlFlags::DISPLAY_OFF
        };
        let cursor = if self.cursor_on {
            DisplayControlFlags::CURSOR_ON
        } else {
            DisplayControlFlags::CURSOR_OFF
        };
        let blink = if self.blink_on {
            DisplayControlFlags::BLINK_ON
        } else {
            DisplayControlFlags::BLINK_OFF
        };
        display | cursor | blink
    }

    pub fn entry_mode_flags(&self) -> EntryModeFlags {
        let direction = match self.entry_direction {
            EntryDirection::Left => EntryModeFlags::ENTRY_LEFT,
            EntryDirection::Right => EntryModeFlags::ENTRY_RIGHT,
        };
        let shift = match self.entry_shift {
            EntryShift::Increment => EntryModeFlags::SHIFT_INCREMENT,
            EntryShift::Decrement => EntryModeFlags::SHIFT_DECREMENT,
        };
        direction | shift
    }
}
