//! Remote-control input.

use roomlink_core::Direction;

/// Raw key codes some TV platforms send for their Back button.
const PLATFORM_BACK_CODES: [u32; 2] = [461, 10009];

/// Remote-control key, independent of where it came from.
///
/// Decouples the launcher from terminal libraries and from the naming
/// conventions of individual TV platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Enter, OK or Select.
    Select,
    /// Escape, Backspace or a platform Back button.
    Back,
    /// Home.
    Home,
    /// End.
    End,
    /// Printable character.
    Char(char),
    /// Anything else.
    Other,
}

impl KeyInput {
    /// Classify a key by name, and by raw key code when the platform sends
    /// one.
    ///
    /// The Back class covers `Escape`, `Backspace`, `BrowserBack`, `GoBack`
    /// and raw codes 461 and 10009. The Select class covers `Enter`, `OK`,
    /// `Select` and `NumpadEnter`.
    pub fn from_key_name(name: &str, code: Option<u32>) -> Self {
        if code.is_some_and(|c| PLATFORM_BACK_CODES.contains(&c)) {
            return Self::Back;
        }
        match name {
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Enter" | "OK" | "Select" | "NumpadEnter" => Self::Select,
            "Escape" | "Backspace" | "BrowserBack" | "GoBack" => Self::Back,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            },
        }
    }

    /// Directional meaning, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Keys that scroll or activate page chrome by default. The launcher
    /// claims these wherever it navigates; see [`crate::App::claims_key`].
    pub fn claims_default(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right | Self::Select)
    }
}
