// crates/engine_platform/src/lib.rs
//! Native windows in, normalized per-frame input out.
//!
//! Call [`PlatformContext::pump_events`] once per frame, drain
//! [`PlatformContext::next_event`], then read ambient state through
//! [`PlatformContext::input`].

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod message;
pub mod window;

pub use backend::{HeadlessPlatform, Platform, WinitPlatform};
pub use config::PlatformConfig;
pub use context::PlatformContext;
pub use error::{InputError, PlatformError, PlatformResult};
pub use input::InputState;
pub use message::{NativeMessage, NativeWindowId};
pub use window::WindowDesc;

pub use engine_shared::{
    ButtonState, DialogResponse, Event, EventKind, KeyCode, Modifiers, TouchPointer, TouchType,
    WheelDelta, WindowCreationFlags, WindowHandle, MAX_TOUCH_POINTERS,
};
