// crates/engine_platform/src/error.rs

use crate::message::NativeWindowId;
use engine_shared::WindowHandle;
use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the native windowing subsystem. Public entry points
/// log these and degrade to `None` / zeroed values.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("window class `{class}` registration failed: {reason}")]
    ClassRegistration { class: String, reason: String },

    #[error("native window creation failed for `{title}`: {reason}")]
    WindowCreation { title: String, reason: String },

    #[error("invalid window handle {0:?}")]
    InvalidWindowHandle(Option<WindowHandle>),

    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("config `{}`: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

/// Recoverable problems found while translating one native message.
/// The pump logs them and keeps draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("low surrogate {0:#06x} without a preceding high surrogate")]
    UnpairedLowSurrogate(u16),

    #[error("high surrogate {0:#06x} not followed by a low surrogate")]
    UnpairedHighSurrogate(u16),

    #[error("message for unregistered native window {0:?}")]
    UnknownWindow(NativeWindowId),
}

pub type PlatformResult<T> = Result<T, PlatformError>;
