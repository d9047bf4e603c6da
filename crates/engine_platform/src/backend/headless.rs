// crates/engine_platform/src/backend/headless.rs
//! In-memory backend. No OS windows; messages are injected by the caller.
//! Used by tests and by tools that want the input pipeline without a display.

use super::{DigitizerCaps, MessageBoxAnswer, MessageBoxKind, Platform, WindowClass, DEFAULT_WHEEL_STEP};
use crate::error::{PlatformError, PlatformResult};
use crate::input::map::vk;
use crate::message::{NativeMessage, NativeMouseButton, NativeWindowId};
use crate::window::{NativeWindowDesc, Rect, WindowStyle, ZOrder};
use glam::IVec2;
use std::collections::VecDeque;

/// Decoration sizes used to turn client sizes into outer rects.
const FRAME_BORDER: i32 = 8;
const CAPTION_HEIGHT: i32 = 31;

/// Switches that make the matching native call fail.
#[derive(Debug, Clone, Default)]
pub struct HeadlessFailures {
    pub class_registration: bool,
    pub window_creation: bool,
    pub cursor: bool,
    pub client_rect: bool,
    pub monitor: bool,
    pub work_area: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub id: NativeWindowId,
    pub title: String,
    pub style: WindowStyle,
    /// Outer rect in screen coordinates.
    pub rect: Rect,
    pub client_width: i32,
    pub client_height: i32,
    pub parent: Option<NativeWindowId>,
    pub maximized: bool,
    pub z_order: Option<ZOrder>,
    pub touch_registered: bool,
}

impl HeadlessWindow {
    fn frame(&self) -> (i32, i32, i32) {
        if self.style.has_frame() {
            (FRAME_BORDER, CAPTION_HEIGHT, FRAME_BORDER)
        } else {
            (0, 0, 0)
        }
    }

    fn client_origin(&self) -> IVec2 {
        let (border, caption, _) = self.frame();
        IVec2::new(self.rect.left + border, self.rect.top + caption)
    }

    fn fit_client_to_rect(&mut self) {
        let (border, caption, bottom) = self.frame();
        self.client_width = (self.rect.width() - 2 * border).max(0);
        self.client_height = (self.rect.height() - caption - bottom).max(0);
    }
}

/// A dialog that was shown, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownDialog {
    pub kind: MessageBoxKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug)]
pub struct HeadlessPlatform {
    pub failures: HeadlessFailures,
    pub desktop: Rect,
    pub work_area: Rect,
    pub digitizer: DigitizerCaps,
    pub wheel_step: i32,

    class: Option<WindowClass>,
    init_calls: usize,
    windows: Vec<HeadlessWindow>,
    next_id: u64,
    queue: VecDeque<NativeMessage>,
    physical_keys: [bool; 256],
    cursor: IVec2,
    captured: Option<NativeWindowId>,
    dialog_answers: VecDeque<MessageBoxAnswer>,
    dialogs: Vec<ShownDialog>,
    slept_ms: u64,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            failures: HeadlessFailures::default(),
            desktop: Rect::new(0, 0, 1920, 1080),
            work_area: Rect::new(0, 0, 1920, 1040),
            digitizer: DigitizerCaps::empty(),
            wheel_step: DEFAULT_WHEEL_STEP,
            class: None,
            init_calls: 0,
            windows: Vec::new(),
            next_id: 0x1000,
            queue: VecDeque::new(),
            physical_keys: [false; 256],
            cursor: IVec2::ZERO,
            captured: None,
            dialog_answers: VecDeque::new(),
            dialogs: Vec::new(),
            slept_ms: 0,
        }
    }

    pub fn push_message(&mut self, message: NativeMessage) {
        self.queue.push_back(message);
    }

    pub fn pending_messages(&self) -> usize {
        self.queue.len()
    }

    /// Key goes down physically and a key-down is queued.
    pub fn press_key(&mut self, window: NativeWindowId, code: u8) {
        self.physical_keys[usize::from(code)] = true;
        self.push_message(NativeMessage::KeyDown {
            window,
            vk: u32::from(code),
            was_down: false,
            extended: false,
        });
    }

    /// Auto-repeat key-down for a key that is already held.
    pub fn repeat_key(&mut self, window: NativeWindowId, code: u8) {
        self.physical_keys[usize::from(code)] = true;
        self.push_message(NativeMessage::KeyDown {
            window,
            vk: u32::from(code),
            was_down: true,
            extended: false,
        });
    }

    pub fn release_key(&mut self, window: NativeWindowId, code: u8) {
        self.physical_keys[usize::from(code)] = false;
        self.push_message(NativeMessage::KeyUp {
            window,
            vk: u32::from(code),
            extended: false,
        });
    }

    /// Changes physical state without queuing anything, as when the OS
    /// swallows a message.
    pub fn set_physical_key(&mut self, code: u8, down: bool) {
        self.physical_keys[usize::from(code)] = down;
    }

    pub fn click(&mut self, window: NativeWindowId, button: NativeMouseButton, pressed: bool) {
        let code = match button {
            NativeMouseButton::Left => vk::LBUTTON,
            NativeMouseButton::Middle => vk::MBUTTON,
            NativeMouseButton::Right => vk::RBUTTON,
        };
        self.physical_keys[usize::from(code)] = pressed;
        self.push_message(NativeMessage::MouseButton {
            window,
            button,
            pressed,
            extra_info: 0,
        });
    }

    /// Queues one character message per UTF-16 unit of `text`.
    pub fn type_text(&mut self, window: NativeWindowId, text: &str) {
        for unit in text.encode_utf16() {
            self.push_message(NativeMessage::Char { window, unit });
        }
    }

    /// Moves the cursor, in screen coordinates.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = IVec2::new(x, y);
    }

    /// Resizes the client area in place, as a user drag would.
    pub fn set_client_size(&mut self, window: NativeWindowId, width: i32, height: i32) {
        if let Some(w) = self.find_mut(window) {
            let (border, caption, bottom) = w.frame();
            w.client_width = width;
            w.client_height = height;
            w.rect.right = w.rect.left + width + 2 * border;
            w.rect.bottom = w.rect.top + height + caption + bottom;
        }
    }

    /// Answer returned by the next dialog instead of the default one.
    pub fn script_dialog(&mut self, answer: MessageBoxAnswer) {
        self.dialog_answers.push_back(answer);
    }

    pub fn dialogs(&self) -> &[ShownDialog] {
        &self.dialogs
    }

    pub fn captured(&self) -> Option<NativeWindowId> {
        self.captured
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls
    }

    pub fn class(&self) -> Option<&WindowClass> {
        self.class.as_ref()
    }

    pub fn windows(&self) -> &[HeadlessWindow] {
        &self.windows
    }

    pub fn slept_ms(&self) -> u64 {
        self.slept_ms
    }

    fn find(&self, id: NativeWindowId) -> Option<&HeadlessWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn find_mut(&mut self, id: NativeWindowId) -> Option<&mut HeadlessWindow> {
        self.windows.iter_mut().find(|w| w.id == id)
    }
}

impl Platform for HeadlessPlatform {
    type Window = HeadlessWindow;

    fn init(&mut self, class: &WindowClass) -> PlatformResult<()> {
        self.init_calls += 1;
        if self.failures.class_registration {
            return Err(PlatformError::ClassRegistration {
                class: class.name.clone(),
                reason: "registration disabled".into(),
            });
        }
        self.class = Some(class.clone());
        Ok(())
    }

    fn create_window(&mut self, desc: &NativeWindowDesc) -> PlatformResult<NativeWindowId> {
        if self.failures.window_creation {
            return Err(PlatformError::WindowCreation {
                title: desc.title.clone(),
                reason: "creation disabled".into(),
            });
        }
        let id = NativeWindowId(self.next_id);
        self.next_id += 1;

        let mut window = HeadlessWindow {
            id,
            title: desc.title.clone(),
            style: desc.style,
            rect: Rect::default(),
            client_width: desc.client_width,
            client_height: desc.client_height,
            parent: desc.parent,
            maximized: desc.maximized,
            z_order: None,
            touch_registered: false,
        };
        let (border, caption, bottom) = window.frame();
        window.rect = Rect::from_size(
            desc.x,
            desc.y,
            desc.client_width + 2 * border,
            desc.client_height + caption + bottom,
        );
        if desc.maximized {
            window.rect = self.work_area;
            window.fit_client_to_rect();
        }
        self.windows.push(window);
        Ok(id)
    }

    fn poll_messages(&mut self, out: &mut Vec<NativeMessage>) {
        out.extend(self.queue.drain(..));
    }

    fn client_rect(&self, window: NativeWindowId) -> Option<Rect> {
        if self.failures.client_rect {
            return None;
        }
        let w = self.find(window)?;
        Some(Rect::new(0, 0, w.client_width, w.client_height))
    }

    fn window_rect(&self, window: NativeWindowId) -> Option<Rect> {
        self.find(window).map(|w| w.rect)
    }

    fn work_area(&self) -> Option<Rect> {
        (!self.failures.work_area).then_some(self.work_area)
    }

    fn desktop_rect(&self) -> Option<Rect> {
        Some(self.desktop)
    }

    fn monitor_rect(&self, window: NativeWindowId) -> Option<Rect> {
        if self.failures.monitor {
            return None;
        }
        self.find(window).map(|_| self.desktop)
    }

    fn cursor_position(&self) -> Option<IVec2> {
        (!self.failures.cursor).then_some(self.cursor)
    }

    fn screen_to_client(&self, window: NativeWindowId, point: IVec2) -> Option<IVec2> {
        self.find(window).map(|w| point - w.client_origin())
    }

    fn is_key_down(&self, code: u8) -> bool {
        let down = |c: u8| self.physical_keys[usize::from(c)];
        match code {
            vk::SHIFT => down(vk::SHIFT) || down(vk::LSHIFT) || down(vk::RSHIFT),
            vk::CONTROL => down(vk::CONTROL) || down(vk::LCONTROL) || down(vk::RCONTROL),
            vk::MENU => down(vk::MENU) || down(vk::LMENU) || down(vk::RMENU),
            _ => down(code),
        }
    }

    fn set_capture(&mut self, window: NativeWindowId, captured: bool) {
        self.captured = captured.then_some(window);
    }

    fn digitizer_caps(&self) -> DigitizerCaps {
        self.digitizer
    }

    fn register_touch_window(&mut self, window: NativeWindowId) -> bool {
        match self.find_mut(window) {
            Some(w) => {
                w.touch_registered = true;
                true
            }
            None => false,
        }
    }

    fn window_style(&self, window: NativeWindowId) -> Option<WindowStyle> {
        self.find(window).map(|w| w.style)
    }

    fn set_window_style(&mut self, window: NativeWindowId, style: WindowStyle) {
        if let Some(w) = self.find_mut(window) {
            w.style = style;
        }
    }

    fn set_window_rect(&mut self, window: NativeWindowId, rect: Rect, z_order: ZOrder) {
        if let Some(w) = self.find_mut(window) {
            w.rect = rect;
            w.z_order = Some(z_order);
            w.fit_client_to_rect();
        }
    }

    fn typical_wheel_step(&self) -> i32 {
        self.wheel_step
    }

    fn message_box(&mut self, kind: MessageBoxKind, title: &str, message: &str) -> MessageBoxAnswer {
        self.dialogs.push(ShownDialog {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
        self.dialog_answers.pop_front().unwrap_or(match kind {
            MessageBoxKind::Info => MessageBoxAnswer::Ok,
            MessageBoxKind::Confirm => MessageBoxAnswer::No,
            MessageBoxKind::AbortRetryIgnore => MessageBoxAnswer::Ignore,
        })
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.slept_ms += u64::from(ms);
    }

    fn window(&self, window: NativeWindowId) -> Option<&HeadlessWindow> {
        self.find(window)
    }
}
