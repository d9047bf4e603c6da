// crates/engine_shared/src/input_types.rs
//! Compact input types shared between the platform layer and the game loop.

use bitflags::bitflags;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Maximum number of simultaneous touch points tracked per frame.
pub const MAX_TOUCH_POINTERS: usize = 4;

/// Portable key code. Printable keys keep their ASCII value, so
/// `KeyCode::A as u16 == b'A' as u16`. Mouse buttons live at the top of the
/// same space, which lets one state array index both keys and buttons.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum KeyCode {
    #[default]
    Unknown = 0,

    Backspace = 8,
    Tab = 9,
    Linefeed = 10,
    Enter = 13,
    Escape = 21,
    Space = 32,

    Apostrophe = 39,

    Plus = 43,
    Comma = 44,
    Dash = 45,
    Dot = 46,
    ForwardSlash = 47,

    Number0 = 48,
    Number1 = 49,
    Number2 = 50,
    Number3 = 51,
    Number4 = 52,
    Number5 = 53,
    Number6 = 54,
    Number7 = 55,
    Number8 = 56,
    Number9 = 57,

    Colon = 58,
    SemiColon = 59,

    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,

    LeftBracket = 91,
    BackSlash = 92,
    RightBracket = 93,

    BackTick = 96,

    Delete = 127,

    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,

    Shift,
    Ctrl,
    Alt,
    /// Command on macOS, Windows key on Windows, Meta elsewhere.
    Cmd,

    Pause,
    CapsLock,

    PageUp,
    PageDown,
    Home,
    End,

    PrintScreen,
    Insert,

    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,

    NumpadMultiply,
    NumpadAdd,
    NumpadSubtract,
    NumpadDecimal,
    NumpadDivide,
    NumpadEnter,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,

    NumLock,
    ScrollLock,

    MouseLeft,
    MouseMiddle,
    MouseRight,
    MouseX1,
    MouseX2,
}

impl KeyCode {
    /// Size of any array indexed by `KeyCode`.
    pub const COUNT: usize = KeyCode::MouseX2 as usize + 1;

    /// Every assigned key code, `Unknown` excluded, in ascending order.
    pub const ALL: [KeyCode; 118] = [
        KeyCode::Backspace,
        KeyCode::Tab,
        KeyCode::Linefeed,
        KeyCode::Enter,
        KeyCode::Escape,
        KeyCode::Space,
        KeyCode::Apostrophe,
        KeyCode::Plus,
        KeyCode::Comma,
        KeyCode::Dash,
        KeyCode::Dot,
        KeyCode::ForwardSlash,
        KeyCode::Number0,
        KeyCode::Number1,
        KeyCode::Number2,
        KeyCode::Number3,
        KeyCode::Number4,
        KeyCode::Number5,
        KeyCode::Number6,
        KeyCode::Number7,
        KeyCode::Number8,
        KeyCode::Number9,
        KeyCode::Colon,
        KeyCode::SemiColon,
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
        KeyCode::LeftBracket,
        KeyCode::BackSlash,
        KeyCode::RightBracket,
        KeyCode::BackTick,
        KeyCode::Delete,
        KeyCode::ArrowLeft,
        KeyCode::ArrowUp,
        KeyCode::ArrowRight,
        KeyCode::ArrowDown,
        KeyCode::Shift,
        KeyCode::Ctrl,
        KeyCode::Alt,
        KeyCode::Cmd,
        KeyCode::Pause,
        KeyCode::CapsLock,
        KeyCode::PageUp,
        KeyCode::PageDown,
        KeyCode::Home,
        KeyCode::End,
        KeyCode::PrintScreen,
        KeyCode::Insert,
        KeyCode::Numpad0,
        KeyCode::Numpad1,
        KeyCode::Numpad2,
        KeyCode::Numpad3,
        KeyCode::Numpad4,
        KeyCode::Numpad5,
        KeyCode::Numpad6,
        KeyCode::Numpad7,
        KeyCode::Numpad8,
        KeyCode::Numpad9,
        KeyCode::NumpadMultiply,
        KeyCode::NumpadAdd,
        KeyCode::NumpadSubtract,
        KeyCode::NumpadDecimal,
        KeyCode::NumpadDivide,
        KeyCode::NumpadEnter,
        KeyCode::F1,
        KeyCode::F2,
        KeyCode::F3,
        KeyCode::F4,
        KeyCode::F5,
        KeyCode::F6,
        KeyCode::F7,
        KeyCode::F8,
        KeyCode::F9,
        KeyCode::F10,
        KeyCode::F11,
        KeyCode::F12,
        KeyCode::F13,
        KeyCode::F14,
        KeyCode::F15,
        KeyCode::F16,
        KeyCode::F17,
        KeyCode::F18,
        KeyCode::F19,
        KeyCode::F20,
        KeyCode::F21,
        KeyCode::F22,
        KeyCode::F23,
        KeyCode::F24,
        KeyCode::NumLock,
        KeyCode::ScrollLock,
        KeyCode::MouseLeft,
        KeyCode::MouseMiddle,
        KeyCode::MouseRight,
        KeyCode::MouseX1,
        KeyCode::MouseX2,
    ];

    /// The four keys tracked by modifier latches.
    pub const MODIFIERS: [KeyCode; 4] = [KeyCode::Alt, KeyCode::Cmd, KeyCode::Ctrl, KeyCode::Shift];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_mouse_button(self) -> bool {
        matches!(
            self,
            KeyCode::MouseLeft
                | KeyCode::MouseMiddle
                | KeyCode::MouseRight
                | KeyCode::MouseX1
                | KeyCode::MouseX2
        )
    }

    pub fn is_modifier(self) -> bool {
        Self::MODIFIERS.contains(&self)
    }

    /// Looks a raw discriminant back up. Holes in the ASCII range return `None`.
    pub fn from_u16(value: u16) -> Option<KeyCode> {
        if value == 0 {
            return Some(KeyCode::Unknown);
        }
        Self::ALL
            .binary_search_by_key(&value, |k| *k as u16)
            .ok()
            .map(|i| Self::ALL[i])
    }
}

bitflags! {
    /// Edge-triggered per-key state for one frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ButtonState: u8 {
        /// Held right now.
        const DOWN  = 0x1;
        /// Went down during this frame.
        const START = 0x2;
        /// Went up during this frame.
        const END   = 0x4;
    }
}

bitflags! {
    /// Modifier snapshot attached to keyboard events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const ALT   = 0x1;
        const CMD   = 0x2;
        const CTRL  = 0x4;
        const SHIFT = 0x8;
    }
}

impl Modifiers {
    pub fn alt(self) -> bool {
        self.contains(Modifiers::ALT)
    }
    pub fn cmd(self) -> bool {
        self.contains(Modifiers::CMD)
    }
    pub fn ctrl(self) -> bool {
        self.contains(Modifiers::CTRL)
    }
    pub fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchType {
    Pressed = 1,
    Released = 2,
    Moved = 3,
}

/// One tracked touch point, in window-client coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchPointer {
    pub position: IVec2,
    pub touch_type: TouchType,
}

/// Wheel movement accumulated over one frame, in native wheel units.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    pub vertical: i32,
    pub horizontal: i32,
}
