// crates/engine_shared/src/lib.rs
//! Plain data shared by the platform layer and whoever consumes its events.
//! Nothing in here talks to the OS.

pub mod events;
pub mod input_types;
pub mod window_types;

pub use events::{Event, EventKind};
pub use input_types::{
    ButtonState, KeyCode, Modifiers, TouchPointer, TouchType, WheelDelta, MAX_TOUCH_POINTERS,
};
pub use window_types::{DialogResponse, WindowCreationFlags, WindowHandle};
