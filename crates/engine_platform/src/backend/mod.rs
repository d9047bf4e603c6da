// crates/engine_platform/src/backend/mod.rs
//! The seam between the platform layer and the OS windowing subsystem.
//!
//! Everything the layer needs from the OS goes through [`Platform`]. Query
//! methods return `Option` so callers can degrade to zeroed values on
//! failure; none of them are expected to block.

pub mod headless;
pub mod winit_platform;

pub use self::headless::HeadlessPlatform;
pub use self::winit_platform::WinitPlatform;

use crate::error::PlatformResult;
use crate::message::{NativeMessage, NativeWindowId};
use crate::window::{NativeWindowDesc, Rect, WindowStyle, ZOrder};
use bitflags::bitflags;
use glam::IVec2;

/// Win32's `WHEEL_DELTA`.
pub const DEFAULT_WHEEL_STEP: i32 = 120;

/// Class-level settings shared by every window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClass {
    pub name: String,
    pub background_rgb: [u8; 3],
}

bitflags! {
    /// Digitizer capabilities, `SM_DIGITIZER` values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DigitizerCaps: u32 {
        const INTEGRATED_TOUCH = 0x01;
        const EXTERNAL_TOUCH   = 0x02;
        const INTEGRATED_PEN   = 0x04;
        const EXTERNAL_PEN     = 0x08;
        const MULTI_INPUT      = 0x40;
        const READY            = 0x80;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxKind {
    /// Single OK button.
    Info,
    /// Yes / No.
    Confirm,
    /// Abort / Retry / Ignore, system modal.
    AbortRetryIgnore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxAnswer {
    Ok,
    Yes,
    No,
    Abort,
    Retry,
    Ignore,
    /// The dialog could not be shown or was dismissed.
    Dismissed,
}

pub trait Platform {
    /// Native window object handed to renderers.
    type Window;

    /// One-time setup, including window class registration.
    fn init(&mut self, class: &WindowClass) -> PlatformResult<()>;

    fn create_window(&mut self, desc: &NativeWindowDesc) -> PlatformResult<NativeWindowId>;

    /// Appends every message queued right now to `out`, without blocking.
    fn poll_messages(&mut self, out: &mut Vec<NativeMessage>);

    /// Client area, origin at (0, 0).
    fn client_rect(&self, window: NativeWindowId) -> Option<Rect>;
    /// Outer rect in screen coordinates.
    fn window_rect(&self, window: NativeWindowId) -> Option<Rect>;
    fn work_area(&self) -> Option<Rect>;
    fn desktop_rect(&self) -> Option<Rect>;
    /// Bounds of the monitor nearest to `window`.
    fn monitor_rect(&self, window: NativeWindowId) -> Option<Rect>;

    /// Cursor in screen coordinates.
    fn cursor_position(&self) -> Option<IVec2>;
    fn screen_to_client(&self, window: NativeWindowId, point: IVec2) -> Option<IVec2>;

    /// Physical state of a native virtual key, independent of the message queue.
    fn is_key_down(&self, vk: u8) -> bool;

    fn set_capture(&mut self, window: NativeWindowId, captured: bool);

    fn digitizer_caps(&self) -> DigitizerCaps;
    fn register_touch_window(&mut self, window: NativeWindowId) -> bool;

    fn window_style(&self, window: NativeWindowId) -> Option<WindowStyle>;
    fn set_window_style(&mut self, window: NativeWindowId, style: WindowStyle);
    fn set_window_rect(&mut self, window: NativeWindowId, rect: Rect, z_order: ZOrder);

    /// Wheel units per notch.
    fn typical_wheel_step(&self) -> i32 {
        DEFAULT_WHEEL_STEP
    }

    fn message_box(&mut self, kind: MessageBoxKind, title: &str, message: &str) -> MessageBoxAnswer;

    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }

    fn window(&self, window: NativeWindowId) -> Option<&Self::Window>;
}
