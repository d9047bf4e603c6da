// crates/engine_platform/src/context.rs

use crate::backend::{DigitizerCaps, MessageBoxAnswer, MessageBoxKind, Platform, WindowClass};
use crate::config::PlatformConfig;
use crate::error::PlatformError;
use crate::input::{InputPoller, InputState};
use crate::message::NativeWindowId;
use crate::window::{
    fullscreen, NativeWindowDesc, WindowDesc, WindowRecord, WindowRegistry, WindowStyle,
};
use engine_shared::{DialogResponse, Event, WindowCreationFlags, WindowHandle};

/// Owns the backend, the window table and the input state. One per process
/// in practice, but nothing stops tests from running several side by side.
pub struct PlatformContext<P: Platform> {
    platform: P,
    config: PlatformConfig,
    registry: WindowRegistry,
    input: InputState,
    poller: InputPoller,
    initialized: bool,
}

impl<P: Platform> PlatformContext<P> {
    pub fn new(platform: P, config: PlatformConfig) -> Self {
        let config = config.sanitized();
        Self {
            input: InputState::new(config.max_events_per_frame),
            poller: InputPoller::new(config.typical_wheel_step_override),
            platform,
            config,
            registry: WindowRegistry::new(),
            initialized: false,
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Direct backend access, for injecting messages in tests and tools.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    /// Creates and shows a native window. The first call also initializes
    /// the backend and registers the window class; failures are logged and
    /// reported as `None`.
    pub fn create_window(&mut self, desc: &WindowDesc) -> Option<WindowHandle> {
        if !self.initialized {
            let class = WindowClass {
                name: self.config.window_class_name.clone(),
                background_rgb: PlatformConfig::background_rgb8(
                    desc.background_color
                        .unwrap_or(self.config.default_background_color),
                ),
            };
            if let Err(err) = self.platform.init(&class) {
                tracing::error!(%err, "platform initialization failed");
                return None;
            }
            self.initialized = true;
        }

        let parent = match desc.parent {
            Some(handle) => match self.registry.get(handle) {
                Some(record) => Some(record.native),
                None => {
                    debug_assert!(false, "create_window: unknown parent {handle}");
                    tracing::error!(err = %PlatformError::InvalidWindowHandle(Some(handle)), "create_window");
                    return None;
                }
            },
            None => None,
        };

        let (client_width, client_height) = self.fit_to_desktop(desc.width, desc.height);
        let (x, y) = if desc.x == -1 {
            self.platform
                .work_area()
                .map_or((desc.x, desc.y), |area| (area.left, area.top))
        } else {
            (desc.x, desc.y)
        };

        let style = WindowStyle::for_creation(desc.flags, parent.is_some());
        let native_desc = NativeWindowDesc {
            title: desc.title.clone(),
            client_width,
            client_height,
            x,
            y,
            style,
            parent,
            maximized: desc.flags.contains(WindowCreationFlags::MAXIMIZED),
        };
        let native = match self.platform.create_window(&native_desc) {
            Ok(native) => native,
            Err(err) => {
                tracing::error!(%err, title = %desc.title, "create_window failed");
                return None;
            }
        };

        let Some(handle) = self.registry.insert(WindowRecord::new(native, style)) else {
            tracing::error!(title = %desc.title, "window handle space exhausted");
            return None;
        };
        self.setup_touch(native, &desc.title);

        tracing::info!(
            %handle,
            title = %desc.title,
            width = client_width,
            height = client_height,
            x,
            y,
            "window created"
        );
        Some(handle)
    }

    fn fit_to_desktop(&self, width: i32, height: i32) -> (i32, i32) {
        let height = height.max(1);
        let Some(desktop) = self.platform.desktop_rect() else {
            return (width, height);
        };
        let limit = (desktop.height() as f32 * self.config.desktop_height_ratio) as i32;
        if limit > 0 && height > limit {
            let ratio = limit as f32 / height as f32;
            let scaled = ((width as f32 * ratio) as i32, (height as f32 * ratio) as i32);
            tracing::debug!(width, height, ?scaled, "window taller than desktop limit, scaled");
            (scaled.0, scaled.1.max(1))
        } else {
            (width, height)
        }
    }

    fn setup_touch(&mut self, native: NativeWindowId, title: &str) {
        let caps = self.platform.digitizer_caps();
        let found = [
            (DigitizerCaps::INTEGRATED_TOUCH, "integrated touch digitizer"),
            (DigitizerCaps::EXTERNAL_TOUCH, "external touch digitizer"),
            (DigitizerCaps::INTEGRATED_PEN, "integrated pen digitizer"),
            (DigitizerCaps::EXTERNAL_PEN, "external pen digitizer"),
            (DigitizerCaps::MULTI_INPUT, "multi-input digitizer"),
        ];
        for (flag, what) in found {
            if caps.contains(flag) {
                tracing::debug!(title = %title, "found {what}");
            }
        }
        if caps.contains(DigitizerCaps::READY) {
            tracing::debug!(title = %title, "digitizer ready for input");
            if self.platform.register_touch_window(native) {
                tracing::debug!(title = %title, "registered for touch input");
            } else {
                tracing::warn!(title = %title, "touch registration failed");
            }
        }
    }

    /// Starts a frame: resets per-frame state and applies every pending
    /// native message. Events from the previous frame are discarded.
    pub fn pump_events(&mut self) {
        self.poller
            .pump(&mut self.input, &mut self.platform, &self.registry);
    }

    /// Next event of the current frame, in arrival order.
    pub fn next_event(&mut self) -> Option<Event> {
        self.input.events.pop()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    fn native(&self, handle: WindowHandle) -> Option<NativeWindowId> {
        let native = self.registry.get(handle).map(|r| r.native);
        debug_assert!(native.is_some(), "unknown window handle {handle}");
        if native.is_none() {
            tracing::error!(err = %PlatformError::InvalidWindowHandle(Some(handle)), "window lookup");
        }
        native
    }

    /// Client area size, `(0, 0)` if it cannot be queried.
    pub fn window_size(&self, handle: WindowHandle) -> (i32, i32) {
        self.native(handle)
            .and_then(|native| self.platform.client_rect(native))
            .map_or((0, 0), |r| (r.width(), r.height()))
    }

    /// Cursor in client coordinates, origin top-left.
    pub fn mouse_position(&self, handle: WindowHandle) -> (i32, i32) {
        let Some(native) = self.native(handle) else {
            return (0, 0);
        };
        self.platform
            .cursor_position()
            .and_then(|screen| self.platform.screen_to_client(native, screen))
            .map_or((0, 0), |p| (p.x, p.y))
    }

    /// Cursor in client coordinates, origin bottom-left. `(0, 0)` when the
    /// cursor cannot be queried; the flip needs the client rect.
    pub fn mouse_position_right_handed(&self, handle: WindowHandle) -> (i32, i32) {
        let Some(native) = self.native(handle) else {
            return (0, 0);
        };
        let Some(p) = self
            .platform
            .cursor_position()
            .and_then(|screen| self.platform.screen_to_client(native, screen))
        else {
            return (0, 0);
        };
        match self.platform.client_rect(native) {
            Some(rect) => (p.x, rect.height() - p.y),
            None => (p.x, p.y),
        }
    }

    /// Enters or leaves borderless fullscreen on the window's monitor.
    /// Asking for the current state does nothing.
    pub fn toggle_fullscreen(&mut self, handle: WindowHandle, want_fullscreen: bool) {
        let Some(record) = self.registry.get_mut(handle) else {
            debug_assert!(false, "toggle_fullscreen: unknown window handle {handle}");
            tracing::error!(err = %PlatformError::InvalidWindowHandle(Some(handle)), "toggle_fullscreen");
            return;
        };
        fullscreen::set_fullscreen(&mut self.platform, record, want_fullscreen);
    }

    pub fn is_fullscreen(&self, handle: WindowHandle) -> bool {
        self.registry.get(handle).is_some_and(|r| r.fullscreen)
    }

    /// Backend window object, for building a render surface.
    pub fn native_window(&self, handle: WindowHandle) -> Option<&P::Window> {
        let native = self.native(handle)?;
        self.platform.window(native)
    }

    pub fn sleep_ms(&mut self, ms: u32) {
        self.platform.sleep_ms(ms);
    }

    pub fn messagebox_info(&mut self, title: &str, message: &str) {
        self.platform.message_box(MessageBoxKind::Info, title, message);
    }

    /// `true` when the user answers yes.
    pub fn messagebox_confirm(&mut self, title: &str, message: &str) -> bool {
        self.platform.message_box(MessageBoxKind::Confirm, title, message) == MessageBoxAnswer::Yes
    }

    /// Anything other than abort or retry counts as ignore.
    pub fn messagebox_abort(&mut self, title: &str, message: &str) -> DialogResponse {
        match self
            .platform
            .message_box(MessageBoxKind::AbortRetryIgnore, title, message)
        {
            MessageBoxAnswer::Abort => DialogResponse::Abort,
            MessageBoxAnswer::Retry => DialogResponse::Retry,
            _ => DialogResponse::Ignore,
        }
    }
}
