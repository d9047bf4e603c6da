// crates/engine_platform/src/message.rs
//! Native window messages, already lifted out of the OS representation but
//! not yet interpreted. Backends produce these; the poller consumes them.

use bitflags::bitflags;
use std::path::PathBuf;

/// Backend-specific window identity (an HWND, a winit window id, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeWindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeMouseButton {
    Left,
    Middle,
    Right,
}

/// What a size message reports about the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Minimized,
    Maximized,
    Restored,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TouchFlags: u32 {
        const MOVE = 0x1;
        const DOWN = 0x2;
        const UP   = 0x4;
    }
}

/// One contact point of a touch batch, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTouchPoint {
    pub flags: TouchFlags,
    pub x: i32,
    pub y: i32,
}

/// Raw X-button word: the high word of the native parameter selects the button.
pub const XBUTTON2_THRESHOLD: u32 = 1 << 17;

#[derive(Debug, Clone, PartialEq)]
pub enum NativeMessage {
    KeyDown {
        window: NativeWindowId,
        vk: u32,
        /// The key was already down before this message (auto-repeat).
        was_down: bool,
        extended: bool,
    },
    KeyUp {
        window: NativeWindowId,
        vk: u32,
        extended: bool,
    },
    /// One UTF-16 code unit of typed text.
    Char {
        window: NativeWindowId,
        unit: u16,
    },
    MouseButton {
        window: NativeWindowId,
        button: NativeMouseButton,
        pressed: bool,
        extra_info: u32,
    },
    XButton {
        window: NativeWindowId,
        wparam: u32,
        pressed: bool,
        extra_info: u32,
    },
    Wheel {
        window: NativeWindowId,
        delta: i32,
    },
    HWheel {
        window: NativeWindowId,
        delta: i32,
    },
    RawMouseMotion {
        window: NativeWindowId,
        dx: i32,
        dy: i32,
        from_touch: bool,
    },
    /// `None` when the batch could not be read from the OS.
    Touch {
        window: NativeWindowId,
        points: Option<Vec<NativeTouchPoint>>,
    },
    Close {
        window: NativeWindowId,
    },
    Quit,
    SetFocus {
        window: NativeWindowId,
    },
    KillFocus {
        window: NativeWindowId,
    },
    Activate {
        window: NativeWindowId,
        active: bool,
    },
    ActivateApp {
        window: NativeWindowId,
        active: bool,
    },
    EnterSizeMove {
        window: NativeWindowId,
    },
    Size {
        window: NativeWindowId,
        kind: SizeKind,
        width: i32,
        height: i32,
    },
    ExitSizeMove {
        window: NativeWindowId,
    },
    DropFiles {
        window: NativeWindowId,
        paths: Vec<PathBuf>,
    },
    /// Alt + key with no matching menu mnemonic.
    MenuChar {
        window: NativeWindowId,
    },
}

impl NativeMessage {
    pub fn window(&self) -> Option<NativeWindowId> {
        use NativeMessage::*;
        match self {
            Quit => None,
            KeyDown { window, .. }
            | KeyUp { window, .. }
            | Char { window, .. }
            | MouseButton { window, .. }
            | XButton { window, .. }
            | Wheel { window, .. }
            | HWheel { window, .. }
            | RawMouseMotion { window, .. }
            | Touch { window, .. }
            | Close { window }
            | SetFocus { window }
            | KillFocus { window }
            | Activate { window, .. }
            | ActivateApp { window, .. }
            | EnterSizeMove { window }
            | Size { window, .. }
            | ExitSizeMove { window }
            | DropFiles { window, .. }
            | MenuChar { window } => Some(*window),
        }
    }
}
