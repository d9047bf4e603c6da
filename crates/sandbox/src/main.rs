// crates/sandbox/src/main.rs
//! Opens one window and logs everything the platform layer reports.
//! Escape or closing the window quits; F11 toggles fullscreen.

use engine_platform::{
    EventKind, KeyCode, PlatformConfig, PlatformContext, WindowCreationFlags, WindowDesc,
    WinitPlatform,
};
use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fs;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "crates/sandbox/sandbox.toml";
const FRAME_SLEEP_MS: u32 = 16;

#[derive(Debug, Deserialize)]
struct SandboxConfig {
    #[serde(default)]
    window: WindowSection,
    #[serde(default)]
    platform: PlatformConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WindowSection {
    title: String,
    width: i32,
    height: i32,
    drag_and_drop: bool,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "Platform Sandbox".to_string(),
            width: 1280,
            height: 720,
            drag_and_drop: false,
        }
    }
}

fn load_config(path: &str) -> Result<SandboxConfig, Box<dyn Error>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path, "no sandbox config, using defaults");
            Ok(SandboxConfig {
                window: WindowSection::default(),
                platform: PlatformConfig::default(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(|s| s.as_str()).unwrap_or(DEFAULT_CONFIG);
    let config = load_config(config_path)?;

    let mut ctx = PlatformContext::new(WinitPlatform::new()?, config.platform);

    let mut flags = WindowCreationFlags::empty();
    if config.window.drag_and_drop {
        flags |= WindowCreationFlags::DRAG_AND_DROP;
    }
    let desc = WindowDesc::new(config.window.title.as_str(), config.window.width, config.window.height)
        .with_flags(flags);
    let Some(window) = ctx.create_window(&desc) else {
        ctx.messagebox_info("Sandbox", "Could not create the sandbox window.");
        return Err("window creation failed".into());
    };

    let mut fullscreen = false;
    'frames: loop {
        ctx.pump_events();

        while let Some(event) = ctx.next_event() {
            match event.kind {
                EventKind::Quit => break 'frames,
                EventKind::Keyboard { key: KeyCode::Escape, pressed: true, .. } => break 'frames,
                EventKind::Keyboard { key: KeyCode::F11, pressed: true, repeat: false, .. } => {
                    fullscreen = !fullscreen;
                    ctx.toggle_fullscreen(window, fullscreen);
                }
                EventKind::Keyboard { key, pressed: true, modifiers, .. } if modifiers.ctrl() => {
                    match key {
                        KeyCode::C => tracing::info!("copy"),
                        KeyCode::V => tracing::info!("paste"),
                        _ => tracing::debug!(?key, "ctrl shortcut"),
                    }
                }
                EventKind::Keyboard { key, pressed, .. } if key.is_mouse_button() => {
                    tracing::debug!(?key, pressed, "mouse button");
                }
                EventKind::Keyboard { key, pressed, repeat, .. } => {
                    tracing::debug!(?key, pressed, repeat, "key");
                }
                EventKind::TextInput { codepoint } => tracing::info!(%codepoint, "text"),
                EventKind::WindowResize { width, height } => tracing::info!(width, height, "resized"),
                EventKind::MouseWheel { delta } | EventKind::MouseHWheel { delta } => {
                    tracing::debug!(delta, "wheel");
                }
                EventKind::Touch { index, touch_type, x, y } => {
                    tracing::debug!(index, ?touch_type, x, y, "touch");
                }
                EventKind::DragAndDrop { files } => {
                    for file in &files {
                        tracing::info!(path = %file.display(), "dropped");
                    }
                }
            }
        }

        let input = ctx.input();
        if input.started(KeyCode::MouseLeft) {
            let (x, y) = ctx.mouse_position(window);
            tracing::info!(x, y, "click");
        }
        if input.is_paused() {
            ctx.sleep_ms(FRAME_SLEEP_MS * 4);
        } else {
            ctx.sleep_ms(FRAME_SLEEP_MS);
        }
    }

    tracing::info!("sandbox closed");
    Ok(())
}
