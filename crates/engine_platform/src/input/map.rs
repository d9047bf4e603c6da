// crates/engine_platform/src/input/map.rs
//! Native virtual-key <-> portable `KeyCode` tables.
//!
//! Native codes follow the Win32 virtual-key numbering. Backends on other
//! systems translate into that numbering first so the tables stay single.

use engine_shared::KeyCode;

/// Win32 virtual-key codes the tables know about.
pub mod vk {
    pub const LBUTTON: u8 = 0x01;
    pub const RBUTTON: u8 = 0x02;
    pub const MBUTTON: u8 = 0x04;
    pub const XBUTTON1: u8 = 0x05;
    pub const XBUTTON2: u8 = 0x06;
    pub const BACK: u8 = 0x08;
    pub const TAB: u8 = 0x09;
    /// Reserved by Win32, used here for line feed.
    pub const LINEFEED: u8 = 0x0A;
    pub const RETURN: u8 = 0x0D;
    pub const SHIFT: u8 = 0x10;
    pub const CONTROL: u8 = 0x11;
    pub const MENU: u8 = 0x12;
    pub const PAUSE: u8 = 0x13;
    pub const CAPITAL: u8 = 0x14;
    pub const ESCAPE: u8 = 0x1B;
    pub const SPACE: u8 = 0x20;
    pub const PRIOR: u8 = 0x21;
    pub const NEXT: u8 = 0x22;
    pub const END: u8 = 0x23;
    pub const HOME: u8 = 0x24;
    pub const LEFT: u8 = 0x25;
    pub const UP: u8 = 0x26;
    pub const RIGHT: u8 = 0x27;
    pub const DOWN: u8 = 0x28;
    pub const SNAPSHOT: u8 = 0x2C;
    pub const INSERT: u8 = 0x2D;
    pub const DELETE: u8 = 0x2E;
    pub const KEY_0: u8 = 0x30;
    pub const KEY_9: u8 = 0x39;
    pub const KEY_A: u8 = 0x41;
    pub const KEY_Z: u8 = 0x5A;
    pub const LWIN: u8 = 0x5B;
    pub const RWIN: u8 = 0x5C;
    pub const APPS: u8 = 0x5D;
    pub const NUMPAD0: u8 = 0x60;
    pub const NUMPAD9: u8 = 0x69;
    pub const MULTIPLY: u8 = 0x6A;
    pub const ADD: u8 = 0x6B;
    pub const SUBTRACT: u8 = 0x6D;
    pub const DECIMAL: u8 = 0x6E;
    pub const DIVIDE: u8 = 0x6F;
    pub const F1: u8 = 0x70;
    pub const F24: u8 = 0x87;
    pub const NUMLOCK: u8 = 0x90;
    pub const SCROLL: u8 = 0x91;
    pub const LSHIFT: u8 = 0xA0;
    pub const RSHIFT: u8 = 0xA1;
    pub const LCONTROL: u8 = 0xA2;
    pub const RCONTROL: u8 = 0xA3;
    pub const LMENU: u8 = 0xA4;
    pub const RMENU: u8 = 0xA5;
    pub const OEM_1: u8 = 0xBA;
    pub const OEM_PLUS: u8 = 0xBB;
    pub const OEM_COMMA: u8 = 0xBC;
    pub const OEM_MINUS: u8 = 0xBD;
    pub const OEM_PERIOD: u8 = 0xBE;
    pub const OEM_2: u8 = 0xBF;
    pub const OEM_3: u8 = 0xC0;
    pub const OEM_4: u8 = 0xDB;
    pub const OEM_5: u8 = 0xDC;
    pub const OEM_6: u8 = 0xDD;
    pub const OEM_7: u8 = 0xDE;
}

/// Native key identity: virtual-key code plus the extended-key bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeKey {
    pub vk: u8,
    pub extended: bool,
}

const fn key_for_vk(code: u8) -> KeyCode {
    use KeyCode as K;
    match code {
        vk::LBUTTON => K::MouseLeft,
        vk::RBUTTON => K::MouseRight,
        vk::MBUTTON => K::MouseMiddle,
        vk::XBUTTON1 => K::MouseX1,
        vk::XBUTTON2 => K::MouseX2,
        vk::BACK => K::Backspace,
        vk::TAB => K::Tab,
        vk::LINEFEED => K::Linefeed,
        vk::RETURN => K::Enter,
        vk::SHIFT | vk::LSHIFT | vk::RSHIFT => K::Shift,
        vk::CONTROL | vk::LCONTROL | vk::RCONTROL => K::Ctrl,
        vk::MENU | vk::LMENU | vk::RMENU => K::Alt,
        vk::LWIN | vk::RWIN | vk::APPS => K::Cmd,
        vk::PAUSE => K::Pause,
        vk::CAPITAL => K::CapsLock,
        vk::ESCAPE => K::Escape,
        vk::SPACE => K::Space,
        vk::PRIOR => K::PageUp,
        vk::NEXT => K::PageDown,
        vk::END => K::End,
        vk::HOME => K::Home,
        vk::LEFT => K::ArrowLeft,
        vk::UP => K::ArrowUp,
        vk::RIGHT => K::ArrowRight,
        vk::DOWN => K::ArrowDown,
        vk::SNAPSHOT => K::PrintScreen,
        vk::INSERT => K::Insert,
        vk::DELETE => K::Delete,
        0x30 => K::Number0,
        0x31 => K::Number1,
        0x32 => K::Number2,
        0x33 => K::Number3,
        0x34 => K::Number4,
        0x35 => K::Number5,
        0x36 => K::Number6,
        0x37 => K::Number7,
        0x38 => K::Number8,
        0x39 => K::Number9,
        0x41 => K::A,
        0x42 => K::B,
        0x43 => K::C,
        0x44 => K::D,
        0x45 => K::E,
        0x46 => K::F,
        0x47 => K::G,
        0x48 => K::H,
        0x49 => K::I,
        0x4A => K::J,
        0x4B => K::K,
        0x4C => K::L,
        0x4D => K::M,
        0x4E => K::N,
        0x4F => K::O,
        0x50 => K::P,
        0x51 => K::Q,
        0x52 => K::R,
        0x53 => K::S,
        0x54 => K::T,
        0x55 => K::U,
        0x56 => K::V,
        0x57 => K::W,
        0x58 => K::X,
        0x59 => K::Y,
        0x5A => K::Z,
        0x60 => K::Numpad0,
        0x61 => K::Numpad1,
        0x62 => K::Numpad2,
        0x63 => K::Numpad3,
        0x64 => K::Numpad4,
        0x65 => K::Numpad5,
        0x66 => K::Numpad6,
        0x67 => K::Numpad7,
        0x68 => K::Numpad8,
        0x69 => K::Numpad9,
        vk::MULTIPLY => K::NumpadMultiply,
        vk::ADD => K::NumpadAdd,
        vk::SUBTRACT => K::NumpadSubtract,
        vk::DECIMAL => K::NumpadDecimal,
        vk::DIVIDE => K::NumpadDivide,
        0x70 => K::F1,
        0x71 => K::F2,
        0x72 => K::F3,
        0x73 => K::F4,
        0x74 => K::F5,
        0x75 => K::F6,
        0x76 => K::F7,
        0x77 => K::F8,
        0x78 => K::F9,
        0x79 => K::F10,
        0x7A => K::F11,
        0x7B => K::F12,
        0x7C => K::F13,
        0x7D => K::F14,
        0x7E => K::F15,
        0x7F => K::F16,
        0x80 => K::F17,
        0x81 => K::F18,
        0x82 => K::F19,
        0x83 => K::F20,
        0x84 => K::F21,
        0x85 => K::F22,
        0x86 => K::F23,
        0x87 => K::F24,
        vk::NUMLOCK => K::NumLock,
        vk::SCROLL => K::ScrollLock,
        vk::OEM_1 => K::SemiColon,
        vk::OEM_PLUS => K::Plus,
        vk::OEM_COMMA => K::Comma,
        vk::OEM_MINUS => K::Dash,
        vk::OEM_PERIOD => K::Dot,
        vk::OEM_2 => K::ForwardSlash,
        vk::OEM_3 => K::BackTick,
        vk::OEM_4 => K::LeftBracket,
        vk::OEM_5 => K::BackSlash,
        vk::OEM_6 => K::RightBracket,
        vk::OEM_7 => K::Apostrophe,
        _ => K::Unknown,
    }
}

const fn build_native_to_key() -> [KeyCode; 256] {
    let mut table = [KeyCode::Unknown; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = key_for_vk(i as u8);
        i += 1;
    }
    table
}

// The first native code that yields a key wins, so the generic VK_SHIFT /
// VK_CONTROL / VK_MENU and VK_LWIN are the reverse entries.
const fn build_key_to_native() -> [u8; KeyCode::COUNT] {
    let forward = build_native_to_key();
    let mut table = [0u8; KeyCode::COUNT];
    let mut i = 0;
    while i < 256 {
        let key = forward[i] as usize;
        if key != 0 && table[key] == 0 {
            table[key] = i as u8;
        }
        i += 1;
    }
    table[KeyCode::NumpadEnter as usize] = vk::RETURN;
    table
}

static NATIVE_TO_KEY: [KeyCode; 256] = build_native_to_key();
static KEY_TO_NATIVE: [u8; KeyCode::COUNT] = build_key_to_native();

/// Translates a native virtual key. Out-of-range codes are `Unknown`.
/// The extended bit only distinguishes the numpad Enter from the main one.
pub fn key_from_native(code: u32, extended: bool) -> KeyCode {
    let Some(&key) = usize::try_from(code).ok().and_then(|i| NATIVE_TO_KEY.get(i)) else {
        return KeyCode::Unknown;
    };
    if key == KeyCode::Enter && extended {
        KeyCode::NumpadEnter
    } else {
        key
    }
}

/// Reverse lookup. `None` for keys with no native equivalent (`Unknown`,
/// `Colon`).
pub fn native_from_key(key: KeyCode) -> Option<NativeKey> {
    let code = *KEY_TO_NATIVE.get(key.index())?;
    if code == 0 {
        return None;
    }
    Some(NativeKey {
        vk: code,
        extended: key == KeyCode::NumpadEnter,
    })
}

const TOUCH_SIGNATURE_MASK: u32 = 0xFFFF_FF00;
const TOUCH_SIGNATURE: u32 = 0xFF51_5700;

/// True when a mouse message's extra info marks it as synthesized from touch
/// or pen input.
pub fn is_touch_synthesized(extra_info: u32) -> bool {
    extra_info & TOUCH_SIGNATURE_MASK == TOUCH_SIGNATURE
}
