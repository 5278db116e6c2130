//! HD44780 command opcodes, register flags and the expander pin assignment.
//!
//! Flags of each register group have their own type, so e.g. a display control flag can never be
//! OR-ed into a function set command.
use std::ops::BitOr;

/// Command opcodes. The low bits of every opcode carry the flags of its register.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    ClearDisplay = 0b00000001,
    ReturnHome = 0b00000010,
    EntryModeSet = 0b00000100,
    DisplayControl = 0b00001000,
    CursorShift = 0b00010000,
    FunctionSet = 0b00100000,
    SetCgramAddr = 0b01000000,
    SetDdramAddr = 0b10000000,
}

impl Command {
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

macro_rules! register_flags {
    ($(#[$meta:meta])* $name:ident => $command:ident { $($(#[$flag_meta:meta])* $flag:ident = $value:expr,)* }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
        pub struct $name(u8);

        impl $name {
            $($(#[$flag_meta])* pub const $flag: $name = $name($value);)*

            /// The raw flag bits.
            pub const fn bits(self) -> u8 {
                self.0
            }

            /// The full command byte: the opcode OR-ed with all the flags.
            pub const fn command(self) -> u8 {
                Command::$command.opcode() | self.0
            }
        }

        impl BitOr for $name {
            type Output = $name;

            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }
    };
}

register_flags! {
    /// Flags of the entry mode set command.
    EntryModeFlags => EntryModeSet {
        ENTRY_RIGHT = 0b00000000,
        ENTRY_LEFT = 0b00000010,
        SHIFT_INCREMENT = 0b00000001,
        SHIFT_DECREMENT = 0b00000000,
    }
}

register_flags! {
    /// Flags of the display on/off control command.
    DisplayControlFlags => DisplayControl {
        DISPLAY_ON = 0b00000100,
        DISPLAY_OFF = 0b00000000,
        CURSOR_ON = 0b00000010,
        CURSOR_OFF = 0b00000000,
        BLINK_ON = 0b00000001,
        BLINK_OFF = 0b00000000,
    }
}

register_flags! {
    /// Flags of the cursor/display shift command.
    CursorShiftFlags => CursorShift {
        DISPLAY_MOVE = 0b00001000,
        CURSOR_MOVE = 0b00000000,
        MOVE_RIGHT = 0b00000100,
        MOVE_LEFT = 0b00000000,
    }
}

register_flags! {
    /// Flags of the function set command.
    FunctionSetFlags => FunctionSet {
        EIGHT_BIT = 0b00010000,
        FOUR_BIT = 0b00000000,
        TWO_LINE = 0b00001000,
        ONE_LINE = 0b00000000,
        FIVE_BY_TEN = 0b00000100,
        FIVE_BY_EIGHT = 0b00000000,
    }
}

/// Pin assignment of the expander: `[D7 D6 D5 D4][BL][EN][RW][RS]`.
pub mod pins {
    /// Register select. Set for data, clear for commands.
    pub const RS: u8 = 0b00000001;
    /// Read/write. Always clear, the interface is only written.
    pub const RW: u8 = 0b00000010;
    /// Enable. The controller latches the data nibble on its falling edge.
    pub const EN: u8 = 0b00000100;
    /// Backlight transistor.
    pub const BACKLIGHT: u8 = 0b00001000;
    /// Position of the data nibble.
    pub const DATA_SHIFT: u32 = 4;
    /// Mask of the data nibble.
    pub const DATA: u8 = 0b11110000;
}

/// Whether a transfer goes to the instruction register or the data register.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Command = 0,
    Data = pins::RS,
}

impl Mode {
    pub const fn bits(self) -> u8 {
        self as u8
    }
}
