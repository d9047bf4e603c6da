// crates/engine_platform/src/window/fullscreen.rs

use super::{SavedPlacement, WindowRecord, ZOrder};
use crate::backend::Platform;

/// Moves a window in or out of borderless fullscreen on its monitor.
/// Returns whether the window is fullscreen afterwards.
pub fn set_fullscreen<P: Platform>(platform: &mut P, record: &mut WindowRecord, want: bool) -> bool {
    if record.fullscreen == want {
        // A second enter would overwrite the snapshot with fullscreen geometry.
        return record.fullscreen;
    }

    let native = record.native;
    if want {
        let Some(style) = platform.window_style(native) else {
            tracing::warn!(?native, "fullscreen: style query failed");
            return false;
        };
        let Some(monitor) = platform.monitor_rect(native) else {
            tracing::warn!(?native, "fullscreen: monitor query failed, not resizing");
            return false;
        };
        let Some(rect) = platform.window_rect(native) else {
            tracing::warn!(?native, "fullscreen: window rect query failed");
            return false;
        };

        record.saved = Some(SavedPlacement { style, rect });
        platform.set_window_style(native, style.without_decorations());
        platform.set_window_rect(native, monitor, ZOrder::TopMost);
        record.fullscreen = true;
        tracing::info!(
            ?native,
            width = monitor.width(),
            height = monitor.height(),
            "entered fullscreen"
        );
    } else {
        let Some(saved) = record.saved.take() else {
            tracing::debug!(?native, "leave fullscreen without a saved placement");
            record.fullscreen = false;
            return false;
        };
        platform.set_window_style(native, saved.style);
        platform.set_window_rect(native, saved.rect, ZOrder::Top);
        record.fullscreen = false;
        tracing::info!(?native, "left fullscreen");
    }
    record.fullscreen
}
