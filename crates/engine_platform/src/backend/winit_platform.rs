// crates/engine_platform/src/backend/winit_platform.rs
//! Real windows through winit's pump-events API.
//!
//! winit owns the OS message loop, so this backend translates winit events
//! into [`NativeMessage`]s. Native key codes use the Win32 numbering on every
//! system. The event loop must live on the main thread.

use super::{DigitizerCaps, MessageBoxAnswer, MessageBoxKind, Platform, WindowClass};
use crate::error::{PlatformError, PlatformResult};
use crate::input::map::vk;
use crate::message::{
    NativeMessage, NativeMouseButton, NativeTouchPoint, NativeWindowId, SizeKind, TouchFlags,
};
use crate::window::{NativeWindowDesc, Rect, WindowStyle, ZOrder};
use glam::IVec2;
use std::collections::HashMap;
use std::time::Duration;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{
    DeviceEvent, ElementState, Event, Ime, KeyEvent, MouseButton, MouseScrollDelta, Touch,
    TouchPhase, WindowEvent,
};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder, WindowId, WindowLevel};

/// Wheel units per line, matching Win32.
const LINE_DELTA: f64 = 120.0;

/// Everything the event translation touches, kept apart from the event
/// loop so both can be borrowed during a pump.
struct WinitState {
    windows: HashMap<NativeWindowId, TrackedWindow>,
    queue: Vec<NativeMessage>,
    /// Keys and buttons seen down, by native code. Windows asks the OS instead.
    #[cfg_attr(windows, allow(dead_code))]
    pressed: [bool; 256],
    /// Last cursor position in screen coordinates.
    cursor: Option<IVec2>,
    focused: Option<NativeWindowId>,
}

struct TrackedWindow {
    window: Window,
    style: WindowStyle,
}

pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    state: WinitState,
}

impl WinitPlatform {
    pub fn new() -> PlatformResult<Self> {
        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        Ok(Self {
            event_loop,
            state: WinitState {
                windows: HashMap::new(),
                queue: Vec::new(),
                pressed: [false; 256],
                cursor: None,
                focused: None,
            },
        })
    }

    fn tracked(&self, id: NativeWindowId) -> Option<&TrackedWindow> {
        self.state.windows.get(&id)
    }
}

fn native_id(id: WindowId) -> NativeWindowId {
    NativeWindowId(u64::from(id))
}

fn to_rect(position: PhysicalPosition<i32>, size: PhysicalSize<u32>) -> Rect {
    Rect::from_size(
        position.x,
        position.y,
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}

fn utf16_units(text: &str, window: NativeWindowId, out: &mut Vec<NativeMessage>) {
    out.extend(text.encode_utf16().map(|unit| NativeMessage::Char { window, unit }));
}

impl WinitState {
    fn translate(&mut self, event: Event<()>) {
        match event {
            Event::WindowEvent { window_id, event } => self.window_event(native_id(window_id), event),
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                ..
            } => {
                if let Some(window) = self.focused {
                    self.queue.push(NativeMessage::RawMouseMotion {
                        window,
                        dx: dx as i32,
                        dy: dy as i32,
                        from_touch: false,
                    });
                }
            }
            _ => {}
        }
    }

    fn window_event(&mut self, window: NativeWindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.queue.push(NativeMessage::Close { window }),
            WindowEvent::Focused(active) => {
                if active {
                    self.focused = Some(window);
                    self.queue.push(NativeMessage::SetFocus { window });
                } else {
                    if self.focused == Some(window) {
                        self.focused = None;
                    }
                    self.queue.push(NativeMessage::KillFocus { window });
                }
                self.queue.push(NativeMessage::ActivateApp { window, active });
                self.queue.push(NativeMessage::Activate { window, active });
            }
            WindowEvent::Resized(size) => {
                let kind = match self.windows.get(&window) {
                    Some(t) if t.window.is_minimized() == Some(true) => SizeKind::Minimized,
                    Some(t) if t.window.is_maximized() => SizeKind::Maximized,
                    _ => SizeKind::Restored,
                };
                self.queue.push(NativeMessage::Size {
                    window,
                    kind,
                    width: i32::try_from(size.width).unwrap_or(i32::MAX),
                    height: i32::try_from(size.height).unwrap_or(i32::MAX),
                });
            }
            WindowEvent::KeyboardInput { event, .. } => self.keyboard(window, event),
            WindowEvent::Ime(Ime::Commit(text)) => utf16_units(&text, window, &mut self.queue),
            WindowEvent::CursorMoved { position, .. } => {
                let origin = self.client_origin(window).unwrap_or(IVec2::ZERO);
                self.cursor = Some(origin + IVec2::new(position.x as i32, position.y as i32));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                let (message, code) = match button {
                    MouseButton::Left => (Some(NativeMouseButton::Left), vk::LBUTTON),
                    MouseButton::Right => (Some(NativeMouseButton::Right), vk::RBUTTON),
                    MouseButton::Middle => (Some(NativeMouseButton::Middle), vk::MBUTTON),
                    MouseButton::Back => (None, vk::XBUTTON1),
                    MouseButton::Forward => (None, vk::XBUTTON2),
                    MouseButton::Other(_) => return,
                };
                self.pressed[usize::from(code)] = pressed;
                self.queue.push(match message {
                    Some(button) => NativeMessage::MouseButton {
                        window,
                        button,
                        pressed,
                        extra_info: 0,
                    },
                    None => NativeMessage::XButton {
                        window,
                        wparam: if code == vk::XBUTTON1 { 1 << 16 } else { 2 << 16 },
                        pressed,
                        extra_info: 0,
                    },
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (f64::from(x) * LINE_DELTA, f64::from(y) * LINE_DELTA),
                    MouseScrollDelta::PixelDelta(p) => (p.x, p.y),
                };
                if y != 0.0 {
                    self.queue.push(NativeMessage::Wheel { window, delta: y as i32 });
                }
                if x != 0.0 {
                    self.queue.push(NativeMessage::HWheel { window, delta: x as i32 });
                }
            }
            WindowEvent::Touch(Touch { phase, location, .. }) => {
                let flags = match phase {
                    TouchPhase::Started => TouchFlags::DOWN,
                    TouchPhase::Moved => TouchFlags::MOVE,
                    TouchPhase::Ended | TouchPhase::Cancelled => TouchFlags::UP,
                };
                // Points travel in screen coordinates like the native batches.
                let origin = self.client_origin(window).unwrap_or(IVec2::ZERO);
                self.queue.push(NativeMessage::Touch {
                    window,
                    points: Some(vec![NativeTouchPoint {
                        flags,
                        x: origin.x + location.x as i32,
                        y: origin.y + location.y as i32,
                    }]),
                });
            }
            WindowEvent::DroppedFile(path) => self.queue.push(NativeMessage::DropFiles {
                window,
                paths: vec![path],
            }),
            _ => {}
        }
    }

    fn keyboard(&mut self, window: NativeWindowId, event: KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some((native, extended)) = vk_from_winit(code) else {
            tracing::trace!(?code, "key without a native code");
            return;
        };
        let pressed = event.state == ElementState::Pressed;
        self.pressed[usize::from(native)] = pressed;

        if pressed {
            self.queue.push(NativeMessage::KeyDown {
                window,
                vk: u32::from(native),
                was_down: event.repeat,
                extended,
            });
            if let Some(text) = event.text.as_deref() {
                utf16_units(text, window, &mut self.queue);
            }
        } else {
            self.queue.push(NativeMessage::KeyUp {
                window,
                vk: u32::from(native),
                extended,
            });
        }
    }

    fn client_origin(&self, window: NativeWindowId) -> Option<IVec2> {
        let position = self.windows.get(&window)?.window.inner_position().ok()?;
        Some(IVec2::new(position.x, position.y))
    }
}

impl Platform for WinitPlatform {
    type Window = Window;

    fn init(&mut self, class: &WindowClass) -> PlatformResult<()> {
        // winit registers its own window class, so ours is only logged.
        tracing::debug!(class = %class.name, rgb = ?class.background_rgb, "winit backend initialized");
        Ok(())
    }

    fn create_window(&mut self, desc: &NativeWindowDesc) -> PlatformResult<NativeWindowId> {
        if desc.parent.is_some() {
            tracing::debug!(title = %desc.title, "winit backend creates child windows top-level");
        }
        let width = u32::try_from(desc.client_width.max(1)).unwrap_or(1);
        let height = u32::try_from(desc.client_height.max(1)).unwrap_or(1);
        let window = WindowBuilder::new()
            .with_title(desc.title.as_str())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_position(PhysicalPosition::new(desc.x, desc.y))
            .with_decorations(desc.style.has_frame())
            .with_maximized(desc.maximized)
            .build(&self.event_loop)
            .map_err(|e| PlatformError::WindowCreation {
                title: desc.title.clone(),
                reason: e.to_string(),
            })?;
        window.set_ime_allowed(true);

        let id = native_id(window.id());
        self.state.windows.insert(
            id,
            TrackedWindow {
                window,
                style: desc.style,
            },
        );
        Ok(id)
    }

    fn poll_messages(&mut self, out: &mut Vec<NativeMessage>) {
        let state = &mut self.state;
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _target| state.translate(event));
        if let PumpStatus::Exit(code) = status {
            tracing::info!(code, "event loop exited");
            state.queue.push(NativeMessage::Quit);
        }
        out.append(&mut state.queue);
    }

    fn client_rect(&self, window: NativeWindowId) -> Option<Rect> {
        let size = self.tracked(window)?.window.inner_size();
        Some(to_rect(PhysicalPosition::new(0, 0), size))
    }

    fn window_rect(&self, window: NativeWindowId) -> Option<Rect> {
        let w = &self.tracked(window)?.window;
        Some(to_rect(w.outer_position().ok()?, w.outer_size()))
    }

    fn work_area(&self) -> Option<Rect> {
        // winit has no work area query; the primary monitor is the closest match.
        self.desktop_rect()
    }

    fn desktop_rect(&self) -> Option<Rect> {
        let monitor = self.event_loop.primary_monitor()?;
        Some(to_rect(monitor.position(), monitor.size()))
    }

    fn monitor_rect(&self, window: NativeWindowId) -> Option<Rect> {
        let monitor = self.tracked(window)?.window.current_monitor()?;
        Some(to_rect(monitor.position(), monitor.size()))
    }

    fn cursor_position(&self) -> Option<IVec2> {
        self.state.cursor
    }

    fn screen_to_client(&self, window: NativeWindowId, point: IVec2) -> Option<IVec2> {
        Some(point - self.state.client_origin(window)?)
    }

    fn is_key_down(&self, code: u8) -> bool {
        #[cfg(windows)]
        {
            win32::async_key_down(code)
        }
        #[cfg(not(windows))]
        {
            let down = |c: u8| self.state.pressed[usize::from(c)];
            match code {
                vk::SHIFT => down(vk::LSHIFT) || down(vk::RSHIFT),
                vk::CONTROL => down(vk::LCONTROL) || down(vk::RCONTROL),
                vk::MENU => down(vk::LMENU) || down(vk::RMENU),
                _ => down(code),
            }
        }
    }

    fn set_capture(&mut self, window: NativeWindowId, captured: bool) {
        // winit keeps button-down capture implicitly on every platform.
        tracing::trace!(?window, captured, "mouse capture");
    }

    fn digitizer_caps(&self) -> DigitizerCaps {
        #[cfg(windows)]
        {
            win32::digitizer_caps()
        }
        #[cfg(not(windows))]
        {
            DigitizerCaps::empty()
        }
    }

    fn register_touch_window(&mut self, window: NativeWindowId) -> bool {
        // winit delivers touch for every window it creates.
        self.tracked(window).is_some()
    }

    fn window_style(&self, window: NativeWindowId) -> Option<WindowStyle> {
        self.tracked(window).map(|t| t.style)
    }

    fn set_window_style(&mut self, window: NativeWindowId, style: WindowStyle) {
        if let Some(tracked) = self.state.windows.get_mut(&window) {
            tracked.window.set_decorations(style.has_frame());
            tracked.style = style;
        }
    }

    fn set_window_rect(&mut self, window: NativeWindowId, rect: Rect, z_order: ZOrder) {
        let Some(tracked) = self.state.windows.get(&window) else {
            return;
        };
        let w = &tracked.window;
        w.set_window_level(match z_order {
            ZOrder::TopMost => WindowLevel::AlwaysOnTop,
            ZOrder::Top => WindowLevel::Normal,
        });
        w.set_outer_position(PhysicalPosition::new(rect.left, rect.top));
        let width = u32::try_from(rect.width().max(1)).unwrap_or(1);
        let height = u32::try_from(rect.height().max(1)).unwrap_or(1);
        let _ = w.request_inner_size(PhysicalSize::new(width, height));
        if z_order == ZOrder::Top {
            w.focus_window();
        }
    }

    fn message_box(&mut self, kind: MessageBoxKind, title: &str, message: &str) -> MessageBoxAnswer {
        #[cfg(windows)]
        {
            win32::message_box(kind, title, message)
        }
        #[cfg(not(windows))]
        {
            tracing::warn!(?kind, title, message, "no native dialogs on this platform");
            match kind {
                MessageBoxKind::Info => MessageBoxAnswer::Ok,
                MessageBoxKind::Confirm => MessageBoxAnswer::No,
                MessageBoxKind::AbortRetryIgnore => MessageBoxAnswer::Ignore,
            }
        }
    }

    fn window(&self, window: NativeWindowId) -> Option<&Window> {
        self.tracked(window).map(|t| &t.window)
    }
}

/// winit physical key -> Win32 virtual key, plus the extended bit.
fn vk_from_winit(code: KeyCode) -> Option<(u8, bool)> {
    use KeyCode as K;
    let native = match code {
        K::Backspace => vk::BACK,
        K::Tab => vk::TAB,
        K::Enter => vk::RETURN,
        K::NumpadEnter => return Some((vk::RETURN, true)),
        K::Escape => vk::ESCAPE,
        K::Space => vk::SPACE,
        K::Quote => vk::OEM_7,
        K::Equal => vk::OEM_PLUS,
        K::Comma => vk::OEM_COMMA,
        K::Minus => vk::OEM_MINUS,
        K::Period => vk::OEM_PERIOD,
        K::Slash => vk::OEM_2,
        K::Semicolon => vk::OEM_1,
        K::BracketLeft => vk::OEM_4,
        K::Backslash => vk::OEM_5,
        K::BracketRight => vk::OEM_6,
        K::Backquote => vk::OEM_3,
        K::Delete => vk::DELETE,
        K::ArrowLeft => vk::LEFT,
        K::ArrowUp => vk::UP,
        K::ArrowRight => vk::RIGHT,
        K::ArrowDown => vk::DOWN,
        K::ShiftLeft => vk::LSHIFT,
        K::ShiftRight => vk::RSHIFT,
        K::ControlLeft => vk::LCONTROL,
        K::ControlRight => return Some((vk::RCONTROL, true)),
        K::AltLeft => vk::LMENU,
        K::AltRight => return Some((vk::RMENU, true)),
        K::SuperLeft => vk::LWIN,
        K::SuperRight => vk::RWIN,
        K::ContextMenu => vk::APPS,
        K::Pause => vk::PAUSE,
        K::CapsLock => vk::CAPITAL,
        K::PageUp => vk::PRIOR,
        K::PageDown => vk::NEXT,
        K::Home => vk::HOME,
        K::End => vk::END,
        K::PrintScreen => vk::SNAPSHOT,
        K::Insert => vk::INSERT,
        K::NumpadMultiply => vk::MULTIPLY,
        K::NumpadAdd => vk::ADD,
        K::NumpadSubtract => vk::SUBTRACT,
        K::NumpadDecimal => vk::DECIMAL,
        K::NumpadDivide => vk::DIVIDE,
        K::NumLock => vk::NUMLOCK,
        K::ScrollLock => vk::SCROLL,
        K::Digit0 => vk::KEY_0,
        K::Digit1 => vk::KEY_0 + 1,
        K::Digit2 => vk::KEY_0 + 2,
        K::Digit3 => vk::KEY_0 + 3,
        K::Digit4 => vk::KEY_0 + 4,
        K::Digit5 => vk::KEY_0 + 5,
        K::Digit6 => vk::KEY_0 + 6,
        K::Digit7 => vk::KEY_0 + 7,
        K::Digit8 => vk::KEY_0 + 8,
        K::Digit9 => vk::KEY_9,
        K::Numpad0 => vk::NUMPAD0,
        K::Numpad1 => vk::NUMPAD0 + 1,
        K::Numpad2 => vk::NUMPAD0 + 2,
        K::Numpad3 => vk::NUMPAD0 + 3,
        K::Numpad4 => vk::NUMPAD0 + 4,
        K::Numpad5 => vk::NUMPAD0 + 5,
        K::Numpad6 => vk::NUMPAD0 + 6,
        K::Numpad7 => vk::NUMPAD0 + 7,
        K::Numpad8 => vk::NUMPAD0 + 8,
        K::Numpad9 => vk::NUMPAD9,
        K::KeyA => vk::KEY_A,
        K::KeyB => vk::KEY_A + 1,
        K::KeyC => vk::KEY_A + 2,
        K::KeyD => vk::KEY_A + 3,
        K::KeyE => vk::KEY_A + 4,
        K::KeyF => vk::KEY_A + 5,
        K::KeyG => vk::KEY_A + 6,
        K::KeyH => vk::KEY_A + 7,
        K::KeyI => vk::KEY_A + 8,
        K::KeyJ => vk::KEY_A + 9,
        K::KeyK => vk::KEY_A + 10,
        K::KeyL => vk::KEY_A + 11,
        K::KeyM => vk::KEY_A + 12,
        K::KeyN => vk::KEY_A + 13,
        K::KeyO => vk::KEY_A + 14,
        K::KeyP => vk::KEY_A + 15,
        K::KeyQ => vk::KEY_A + 16,
        K::KeyR => vk::KEY_A + 17,
        K::KeyS => vk::KEY_A + 18,
        K::KeyT => vk::KEY_A + 19,
        K::KeyU => vk::KEY_A + 20,
        K::KeyV => vk::KEY_A + 21,
        K::KeyW => vk::KEY_A + 22,
        K::KeyX => vk::KEY_A + 23,
        K::KeyY => vk::KEY_A + 24,
        K::KeyZ => vk::KEY_Z,
        K::F1 => vk::F1,
        K::F2 => vk::F1 + 1,
        K::F3 => vk::F1 + 2,
        K::F4 => vk::F1 + 3,
        K::F5 => vk::F1 + 4,
        K::F6 => vk::F1 + 5,
        K::F7 => vk::F1 + 6,
        K::F8 => vk::F1 + 7,
        K::F9 => vk::F1 + 8,
        K::F10 => vk::F1 + 9,
        K::F11 => vk::F1 + 10,
        K::F12 => vk::F1 + 11,
        K::F13 => vk::F1 + 12,
        K::F14 => vk::F1 + 13,
        K::F15 => vk::F1 + 14,
        K::F16 => vk::F1 + 15,
        K::F17 => vk::F1 + 16,
        K::F18 => vk::F1 + 17,
        K::F19 => vk::F1 + 18,
        K::F20 => vk::F1 + 19,
        K::F21 => vk::F1 + 20,
        K::F22 => vk::F1 + 21,
        K::F23 => vk::F1 + 22,
        K::F24 => vk::F24,
        _ => return None,
    };
    Some((native, false))
}

#[cfg(windows)]
mod win32 {
    use super::{DigitizerCaps, MessageBoxAnswer, MessageBoxKind};
    use windows_sys::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        GetSystemMetrics, MessageBoxW, IDABORT, IDIGNORE, IDNO, IDOK, IDRETRY, IDYES,
        MB_ABORTRETRYIGNORE, MB_ICONERROR, MB_ICONINFORMATION, MB_OK, MB_SYSTEMMODAL, MB_YESNO,
        SM_DIGITIZER,
    };

    pub(super) fn async_key_down(code: u8) -> bool {
        // SAFETY: plain query with no pointers.
        let state = unsafe { GetAsyncKeyState(i32::from(code)) };
        (state as u16 & 0x8000) != 0
    }

    pub(super) fn digitizer_caps() -> DigitizerCaps {
        // SAFETY: plain query with no pointers.
        let caps = unsafe { GetSystemMetrics(SM_DIGITIZER) };
        DigitizerCaps::from_bits_truncate(caps as u32)
    }

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    pub(super) fn message_box(kind: MessageBoxKind, title: &str, message: &str) -> MessageBoxAnswer {
        let flags = match kind {
            MessageBoxKind::Info => MB_OK | MB_ICONINFORMATION,
            MessageBoxKind::Confirm => MB_YESNO | MB_ICONINFORMATION,
            MessageBoxKind::AbortRetryIgnore => MB_ABORTRETRYIGNORE | MB_ICONERROR | MB_SYSTEMMODAL,
        };
        let title = wide(title);
        let message = wide(message);
        // SAFETY: both strings are NUL-terminated and outlive the call.
        let result = unsafe { MessageBoxW(std::ptr::null_mut(), message.as_ptr(), title.as_ptr(), flags) };
        match result {
            IDOK => MessageBoxAnswer::Ok,
            IDYES => MessageBoxAnswer::Yes,
            IDNO => MessageBoxAnswer::No,
            IDABORT => MessageBoxAnswer::Abort,
            IDRETRY => MessageBoxAnswer::Retry,
            IDIGNORE => MessageBoxAnswer::Ignore,
            _ => MessageBoxAnswer::Dismissed,
        }
    }
}
