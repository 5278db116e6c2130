use crate::delay::Wait;

/// Steps of the power-on initialization, in the order they run.
///
/// The controller may power up in 8-bit mode, or be stuck half way through a 4-bit transfer after
/// an unclean restart. Sending `0x3` three times with the right spacing brings it to 8-bit mode
/// from any of those, after which `0x2` switches it to 4-bit mode for good.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InitState {
    PowerOnWait,
    ResyncNibble1,
    ResyncNibble2,
    ResyncNibble3,
    Set4BitMode,
    FunctionSet,
    DisplayControl,
    EntrySet,
    Clear,
    Home,
    Ready,
}

impl InitState {
    /// The step after this one. [InitState::Ready] is terminal.
    pub fn next(self) -> InitState {
        match self {
            InitState::PowerOnWait => InitState::ResyncNibble1,
            InitState::ResyncNibble1 => InitState::ResyncNibble2,
            InitState::ResyncNibble2 => InitState::ResyncNibble3,
            InitState::ResyncNibble3 => InitState::Set4BitMode,
            InitState::Set4BitMode => InitState::FunctionSet,
            InitState::FunctionSet => InitState::DisplayControl,
            InitState::DisplayControl => InitState::EntrySet,
            InitState::EntrySet => InitState::Clear,
            InitState::Clear => InitState::Home,
            InitState::Home | InitState::Ready => InitState::Ready,
        }
    }

    /// The wait after the step's transfer, on top of the per-nibble settle time.
    pub fn wait(self) -> Option<Wait> {
        match self {
            InitState::PowerOnWait => Some(Wait::PowerOn),
            InitState::ResyncNibble1 => Some(Wait::FirstResync),
            InitState::ResyncNibble2 | InitState::ResyncNibble3 | InitState::Set4BitMode => {
                Some(Wait::Resync)
            }
            InitState::Clear | InitState::Home => Some(Wait::ClearOrHome),
            InitState::FunctionSet
            | InitState::DisplayControl
            | InitState::EntrySet
            | InitState::Ready => None,
        }
    }

    pub fn is_ready(self) -> bool {
        self == InitState::Ready
    }
}
