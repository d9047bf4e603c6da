// crates/engine_platform/src/config.rs

use crate::error::{PlatformError, PlatformResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Tunables for the platform layer. Every field has a default, so a partial
/// TOML table (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_window_class_name")]
    pub window_class_name: String,

    /// Capacity of the per-frame event queue.
    #[serde(default = "default_max_events_per_frame")]
    pub max_events_per_frame: usize,

    /// Windows taller than this fraction of the desktop are scaled down.
    #[serde(default = "default_desktop_height_ratio")]
    pub desktop_height_ratio: f32,

    /// RGB in 0..=1, used for the window class brush.
    #[serde(default = "default_background_color")]
    pub default_background_color: [f32; 3],

    /// Replaces the backend's typical wheel step when set.
    #[serde(default)]
    pub typical_wheel_step_override: Option<i32>,
}

fn default_window_class_name() -> String {
    "EnginePlatformWindow".to_string()
}
fn default_max_events_per_frame() -> usize {
    1024
}
fn default_desktop_height_ratio() -> f32 {
    0.9
}
fn default_background_color() -> [f32; 3] {
    [0.15, 0.15, 0.15]
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            window_class_name: default_window_class_name(),
            max_events_per_frame: default_max_events_per_frame(),
            desktop_height_ratio: default_desktop_height_ratio(),
            default_background_color: default_background_color(),
            typical_wheel_step_override: None,
        }
    }
}

impl PlatformConfig {
    /// Reads `path` as TOML. A missing file yields the defaults; anything
    /// else that goes wrong is a `PlatformError::Config`.
    pub fn load_or_default(path: impl AsRef<Path>) -> PlatformResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s).map_err(|reason| PlatformError::Config {
                path: path.to_path_buf(),
                reason,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PlatformError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        let cfg: PlatformConfig = toml::from_str(s).map_err(|e| e.to_string())?;
        Ok(cfg.sanitized())
    }

    /// Clamps values that would break the layer into range.
    pub fn sanitized(mut self) -> Self {
        if self.max_events_per_frame == 0 {
            tracing::warn!("max_events_per_frame = 0, using default");
            self.max_events_per_frame = default_max_events_per_frame();
        }
        if !(self.desktop_height_ratio > 0.0 && self.desktop_height_ratio <= 1.0) {
            tracing::warn!(
                ratio = self.desktop_height_ratio,
                "desktop_height_ratio out of (0, 1], using default"
            );
            self.desktop_height_ratio = default_desktop_height_ratio();
        }
        self
    }

    /// Background color as 8-bit channels, clamped.
    pub fn background_rgb8(color: [f32; 3]) -> [u8; 3] {
        color.map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }
}
