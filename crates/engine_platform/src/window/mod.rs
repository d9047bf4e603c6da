// crates/engine_platform/src/window/mod.rs
pub mod fullscreen;
pub mod registry;
pub mod style;

pub use registry::{SavedPlacement, WindowRecord, WindowRegistry};
pub use style::{ExStyleFlags, StyleFlags, WindowStyle};

use engine_shared::{WindowCreationFlags, WindowHandle};

/// Screen-space rectangle, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Placement in the z-order applied together with a rect change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// Above all non-topmost windows, and stays there.
    TopMost,
    /// Top of the normal band; clears top-most.
    Top,
}

/// What the caller asks for in `create_window`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDesc {
    pub title: String,
    pub width: i32,
    pub height: i32,
    /// `-1` places the window at the work area's top-left corner.
    pub x: i32,
    pub y: i32,
    pub parent: Option<WindowHandle>,
    pub flags: WindowCreationFlags,
    /// RGB in 0..=1; `None` uses the configured default. Only the first
    /// created window's color reaches the shared window class.
    pub background_color: Option<[f32; 3]>,
}

impl WindowDesc {
    pub fn new(title: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            x: -1,
            y: -1,
            parent: None,
            flags: WindowCreationFlags::empty(),
            background_color: None,
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_parent(mut self, parent: WindowHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_flags(mut self, flags: WindowCreationFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_background(mut self, rgb: [f32; 3]) -> Self {
        self.background_color = Some(rgb);
        self
    }
}

/// Fully resolved request handed to the backend: final client size,
/// position, style and parent.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeWindowDesc {
    pub title: String,
    pub client_width: i32,
    pub client_height: i32,
    pub x: i32,
    pub y: i32,
    pub style: WindowStyle,
    pub parent: Option<crate::message::NativeWindowId>,
    pub maximized: bool,
}
