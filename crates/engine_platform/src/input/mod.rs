// crates/engine_platform/src/input/mod.rs
pub mod map;
pub mod poller;
pub mod queue;
pub mod state;
pub mod text;

// Re-export core types to keep the API at `crate::input::InputState`
pub use map::{is_touch_synthesized, key_from_native, native_from_key, NativeKey};
pub use poller::InputPoller;
pub use queue::EventQueue;
pub use state::InputState;
pub use text::SurrogateAssembler;
