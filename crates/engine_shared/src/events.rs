// crates/engine_shared/src/events.rs

use crate::input_types::{KeyCode, Modifiers, TouchType};
use crate::window_types::WindowHandle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One normalized input event, produced during `pump_events` and read back
/// in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Window the event originated from. `None` for process-wide events or
    /// messages aimed at a window the registry does not know.
    pub window: Option<WindowHandle>,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Quit,
    WindowResize {
        width: i32,
        height: i32,
    },
    Keyboard {
        key: KeyCode,
        pressed: bool,
        repeat: bool,
        modifiers: Modifiers,
    },
    TextInput {
        codepoint: char,
    },
    MouseWheel {
        delta: i32,
    },
    MouseHWheel {
        delta: i32,
    },
    Touch {
        index: usize,
        touch_type: TouchType,
        x: i32,
        y: i32,
    },
    DragAndDrop {
        files: Vec<PathBuf>,
    },
}

impl Event {
    pub fn new(window: Option<WindowHandle>, kind: EventKind) -> Self {
        Self { window, kind }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self.kind, EventKind::Quit)
    }

    /// Key and press state for keyboard events.
    pub fn key(&self) -> Option<(KeyCode, bool)> {
        match self.kind {
            EventKind::Keyboard { key, pressed, .. } => Some((key, pressed)),
            _ => None,
        }
    }
}
