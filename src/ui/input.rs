use crate::core::{Decision, Mode};

/// Raw user intent, independent of where it came from (mouse or keyboard)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    ChooseLeft,
    ChooseRight,
    Neither,
}

impl InputAction {
    /// Interpret the action for the mode currently on screen.
    /// Returns `None` when the action means nothing in that mode.
    pub fn to_decision(self, mode: Mode) -> Option<Decision> {
        match (mode, self) {
            (Mode::Pair, InputAction::ChooseLeft) => Some(Decision::KeepLeft),
            (Mode::Pair, InputAction::ChooseRight) => Some(Decision::KeepRight),
            (Mode::Pair, InputAction::Neither) => Some(Decision::DiscardBoth),
            (Mode::Single, InputAction::ChooseLeft) => Some(Decision::Keep),
            (Mode::Single, InputAction::Neither) => Some(Decision::Discard),
            (Mode::Single, InputAction::ChooseRight) => None,
            (Mode::Terminated, _) => None,
        }
    }
}
