// crates/engine_shared/src/window_types.rs

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Opaque, stable identifier for a window created by the platform layer.
/// Handles are assigned from 1 upward and never reused.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowHandle(NonZeroU32);

impl WindowHandle {
    /// `None` for 0, which is never a valid handle.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WindowCreationFlags: u32 {
        /// Show the window maximized.
        const MAXIMIZED     = 0x1;
        /// Popup style with no caption or frame.
        const BORDERLESS    = 0x2;
        /// Accept files dropped from the shell.
        const DRAG_AND_DROP = 0x4;
    }
}

/// Answer to an abort/retry/ignore dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogResponse {
    Abort,
    Retry,
    Ignore,
}
