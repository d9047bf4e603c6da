// crates/engine_platform/src/input/poller.rs

use super::map::{key_from_native, native_from_key, vk};
use super::state::InputState;
use crate::backend::Platform;
use crate::error::InputError;
use crate::input::map::is_touch_synthesized;
use crate::message::{
    NativeMessage, NativeMouseButton, NativeTouchPoint, NativeWindowId, SizeKind, TouchFlags,
    XBUTTON2_THRESHOLD,
};
use crate::window::{ExStyleFlags, WindowRegistry};
use engine_shared::{EventKind, KeyCode, TouchPointer, TouchType, WindowHandle, MAX_TOUCH_POINTERS};
use glam::IVec2;

/// Turns native messages into events and per-frame input state.
/// This is the only writer of `InputState`.
pub struct InputPoller {
    messages: Vec<NativeMessage>,
    wheel_step_override: Option<i32>,
}

impl InputPoller {
    pub fn new(wheel_step_override: Option<i32>) -> Self {
        Self {
            messages: Vec::new(),
            wheel_step_override,
        }
    }

    /// One frame: reset, then drain and apply everything the backend has
    /// queued. Errors are logged and never stop the drain.
    pub fn pump<P: Platform>(
        &mut self,
        state: &mut InputState,
        platform: &mut P,
        registry: &WindowRegistry,
    ) {
        self.begin_frame(state, platform);

        let mut messages = std::mem::take(&mut self.messages);
        messages.clear();
        platform.poll_messages(&mut messages);

        for message in messages.drain(..) {
            if let Err(err) = self.apply(state, platform, registry, message) {
                tracing::warn!(%err, "input message not fully handled");
            }
        }
        self.messages = messages;
    }

    /// Start-of-frame reset plus the modifier re-check. Releases that the
    /// OS swallowed (Alt+Tab and friends) surface here.
    pub fn begin_frame<P: Platform>(&mut self, state: &mut InputState, platform: &P) {
        state.begin_frame();

        for key in KeyCode::MODIFIERS {
            if (state.is_latched(key) || state.is_down(key)) && !is_physically_down(platform, key) {
                tracing::debug!(?key, "modifier released behind our back");
                state.key_up(state.active_window, key);
            }
        }
    }

    /// Applies one message. Messages for windows the registry does not know
    /// still update state; their events carry no window and the call
    /// reports `InputError::UnknownWindow`.
    pub fn apply<P: Platform>(
        &self,
        state: &mut InputState,
        platform: &mut P,
        registry: &WindowRegistry,
        message: NativeMessage,
    ) -> Result<(), InputError> {
        let native = message.window();
        let handle = native.and_then(|id| registry.handle_for(id));
        let mut result = match (native, handle) {
            (Some(id), None) => Err(InputError::UnknownWindow(id)),
            _ => Ok(()),
        };

        match message {
            NativeMessage::KeyDown { vk: code, was_down, extended, .. } => {
                if handle.is_some() {
                    state.active_window = handle;
                }
                state.key_down(handle, key_from_native(code, extended), was_down);
            }
            NativeMessage::KeyUp { vk: code, extended, .. } => {
                state.key_up(handle, key_from_native(code, extended));
            }
            NativeMessage::Char { unit, .. } => {
                let out = state.text.push(unit);
                if let Some(codepoint) = out.text {
                    state.push_event(handle, EventKind::TextInput { codepoint });
                }
                if let Some(err) = out.error {
                    result = Err(err);
                }
            }
            NativeMessage::MouseButton { window, button, pressed, extra_info } => {
                if is_touch_synthesized(extra_info) {
                    return result;
                }
                let key = match button {
                    NativeMouseButton::Left => KeyCode::MouseLeft,
                    NativeMouseButton::Middle => KeyCode::MouseMiddle,
                    NativeMouseButton::Right => KeyCode::MouseRight,
                };
                mouse_button(state, platform, window, handle, key, pressed);
            }
            NativeMessage::XButton { window, wparam, pressed, extra_info } => {
                if is_touch_synthesized(extra_info) {
                    return result;
                }
                let key = if wparam < XBUTTON2_THRESHOLD {
                    KeyCode::MouseX1
                } else {
                    KeyCode::MouseX2
                };
                mouse_button(state, platform, window, handle, key, pressed);
            }
            NativeMessage::Wheel { delta, .. } => {
                state.typical_wheel_delta = Some(self.wheel_step(platform));
                state.wheel.vertical += delta;
                state.push_event(handle, EventKind::MouseWheel { delta });
            }
            NativeMessage::HWheel { delta, .. } => {
                state.typical_wheel_delta = Some(self.wheel_step(platform));
                state.wheel.horizontal += delta;
                state.push_event(handle, EventKind::MouseHWheel { delta });
            }
            NativeMessage::RawMouseMotion { dx, dy, from_touch, .. } => {
                if !from_touch {
                    state.mouse_delta += IVec2::new(dx, dy);
                }
            }
            NativeMessage::Touch { window, points } => match points {
                Some(points) => touch_batch(state, platform, window, handle, &points),
                None => tracing::debug!(?window, "touch batch unreadable, ignored"),
            },
            NativeMessage::Close { .. } | NativeMessage::Quit => {
                state.push_event(handle, EventKind::Quit);
            }
            NativeMessage::SetFocus { .. } => {
                state.has_focus = true;
                if handle.is_some() {
                    state.active_window = handle;
                }
            }
            NativeMessage::KillFocus { window } => {
                state.has_focus = false;
                sync_physical_keys(state, platform, handle);
                if state.is_user_resizing {
                    // The drag never got its exit message; flush what we have.
                    state.is_user_resizing = false;
                    push_client_resize(state, platform, window, handle);
                }
            }
            NativeMessage::Activate { active, .. } => state.is_paused = !active,
            NativeMessage::ActivateApp { .. } => sync_physical_keys(state, platform, handle),
            NativeMessage::EnterSizeMove { .. } => {
                state.is_paused = true;
                state.is_user_resizing = true;
            }
            NativeMessage::Size { kind, width, height, .. } => {
                resize(state, handle, kind, width, height);
            }
            NativeMessage::ExitSizeMove { window } => {
                state.is_paused = false;
                state.is_user_resizing = false;
                push_client_resize(state, platform, window, handle);
            }
            NativeMessage::DropFiles { window, paths } => {
                let accepts = handle
                    .and_then(|h| registry.get(h))
                    .is_some_and(|r| r.style.ex_style.contains(ExStyleFlags::ACCEPT_FILES));
                if accepts {
                    state.push_event(handle, EventKind::DragAndDrop { files: paths });
                } else {
                    tracing::debug!(?window, count = paths.len(), "drop on a window without drag and drop");
                }
            }
            NativeMessage::MenuChar { .. } => {}
        }
        result
    }

    fn wheel_step<P: Platform>(&self, platform: &P) -> i32 {
        self.wheel_step_override
            .unwrap_or_else(|| platform.typical_wheel_step())
    }
}

fn is_physically_down<P: Platform>(platform: &P, key: KeyCode) -> bool {
    match key {
        KeyCode::Cmd => [vk::LWIN, vk::RWIN, vk::APPS]
            .into_iter()
            .any(|code| platform.is_key_down(code)),
        // Nothing to ask about; leave the key alone.
        _ => native_from_key(key).map_or(true, |native| platform.is_key_down(native.vk)),
    }
}

/// Releases every held key the OS says is no longer down.
pub fn sync_physical_keys<P: Platform>(
    state: &mut InputState,
    platform: &P,
    window: Option<WindowHandle>,
) {
    for key in KeyCode::ALL {
        let held = state.is_down(key) && !state.ended(key);
        let latched = key.is_modifier() && state.is_latched(key);
        if (held || latched) && !is_physically_down(platform, key) {
            state.key_up(window, key);
        }
    }
}

fn mouse_button<P: Platform>(
    state: &mut InputState,
    platform: &mut P,
    window: NativeWindowId,
    handle: Option<WindowHandle>,
    key: KeyCode,
    pressed: bool,
) {
    if pressed {
        state.key_down(handle, key, false);
    } else {
        state.key_up(handle, key);
    }
    platform.set_capture(window, pressed);
}

fn touch_type(flags: TouchFlags) -> TouchType {
    if flags.contains(TouchFlags::MOVE) {
        TouchType::Moved
    } else if flags.contains(TouchFlags::DOWN) {
        TouchType::Pressed
    } else if flags.contains(TouchFlags::UP) {
        TouchType::Released
    } else {
        TouchType::Moved
    }
}

fn touch_batch<P: Platform>(
    state: &mut InputState,
    platform: &P,
    window: NativeWindowId,
    handle: Option<WindowHandle>,
    points: &[NativeTouchPoint],
) {
    if points.len() > MAX_TOUCH_POINTERS {
        tracing::warn!(
            count = points.len(),
            max = MAX_TOUCH_POINTERS,
            "touch batch too large, extra points dropped"
        );
    }
    let count = points.len().min(MAX_TOUCH_POINTERS);
    for (index, point) in points.iter().take(count).enumerate() {
        let screen = IVec2::new(point.x, point.y);
        let position = platform.screen_to_client(window, screen).unwrap_or(screen);
        let touch_type = touch_type(point.flags);
        state.push_event(
            handle,
            EventKind::Touch {
                index,
                touch_type,
                x: position.x,
                y: position.y,
            },
        );
        state.touch_pointers[index] = Some(TouchPointer { position, touch_type });
    }
    state.touch_pointer_count = count;
}

fn push_client_resize<P: Platform>(
    state: &mut InputState,
    platform: &P,
    window: NativeWindowId,
    handle: Option<WindowHandle>,
) {
    let (width, height) = platform
        .client_rect(window)
        .map_or((0, 0), |r| (r.width(), r.height()));
    state.push_event(handle, EventKind::WindowResize { width, height });
}

fn resize(state: &mut InputState, handle: Option<WindowHandle>, kind: SizeKind, width: i32, height: i32) {
    let event = EventKind::WindowResize { width, height };
    match kind {
        SizeKind::Minimized => {
            state.is_paused = true;
            state.is_minimized = true;
            state.is_maximized = false;
        }
        SizeKind::Maximized => {
            state.is_paused = false;
            state.is_minimized = false;
            state.is_maximized = true;
            state.push_event(handle, event);
        }
        SizeKind::Restored => {
            if state.is_minimized {
                state.is_paused = false;
                state.is_minimized = false;
                state.push_event(handle, event);
            } else if state.is_maximized {
                state.is_paused = false;
                state.is_maximized = false;
                state.push_event(handle, event);
            } else if state.is_user_resizing {
                // Drag in progress; the exit message reports the final size.
            } else {
                state.push_event(handle, event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessPlatform;
    use crate::window::{NativeWindowDesc, WindowRecord, WindowStyle};
    use engine_shared::{ButtonState, Event};

    struct Rig {
        poller: InputPoller,
        state: InputState,
        platform: HeadlessPlatform,
        registry: WindowRegistry,
        window: NativeWindowId,
        handle: WindowHandle,
    }

    impl Rig {
        fn new() -> Self {
            Self::with_style(WindowStyle::default())
        }

        fn with_style(style: WindowStyle) -> Self {
            let mut platform = HeadlessPlatform::new();
            let window = platform
                .create_window(&NativeWindowDesc {
                    title: "test".into(),
                    client_width: 640,
                    client_height: 480,
                    x: 0,
                    y: 0,
                    style,
                    parent: None,
                    maximized: false,
                })
                .unwrap();
            let mut registry = WindowRegistry::new();
            let handle = registry.insert(WindowRecord::new(window, style)).unwrap();
            Self {
                poller: InputPoller::new(None),
                state: InputState::new(64),
                platform,
                registry,
                window,
                handle,
            }
        }

        fn frame(&mut self) -> Vec<Event> {
            self.poller.pump(&mut self.state, &mut self.platform, &self.registry);
            std::iter::from_fn(|| self.state.events.pop()).collect()
        }

        fn apply(&mut self, message: NativeMessage) -> Result<(), InputError> {
            self.poller
                .apply(&mut self.state, &mut self.platform, &self.registry, message)
        }
    }

    fn kinds(events: &[Event]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn holding_a_key_sets_start_once() {
        let mut rig = Rig::new();
        let w = rig.window;
        rig.platform.press_key(w, vk::KEY_A);
        rig.frame();
        assert_eq!(rig.state.button(KeyCode::A), ButtonState::DOWN | ButtonState::START);

        for _ in 0..3 {
            rig.platform.repeat_key(w, vk::KEY_A);
            let events = rig.frame();
            assert_eq!(events.len(), 1);
            assert_eq!(rig.state.button(KeyCode::A), ButtonState::DOWN);
        }

        rig.platform.release_key(w, vk::KEY_A);
        rig.frame();
        assert_eq!(rig.state.button(KeyCode::A), ButtonState::DOWN | ButtonState::END);
        rig.frame();
        assert_eq!(rig.state.button(KeyCode::A), ButtonState::empty());
    }

    #[test]
    fn events_carry_the_window_handle() {
        let mut rig = Rig::new();
        rig.platform.press_key(rig.window, vk::SPACE);
        let events = rig.frame();
        assert_eq!(events[0].window, Some(rig.handle));
    }

    #[test]
    fn unknown_window_still_applies() {
        let mut rig = Rig::new();
        let err = rig
            .apply(NativeMessage::Wheel { window: NativeWindowId(999), delta: 120 })
            .unwrap_err();
        assert_eq!(err, InputError::UnknownWindow(NativeWindowId(999)));
        assert_eq!(rig.state.wheel_delta().vertical, 120);
        assert_eq!(rig.state.events.pop().map(|e| e.window), Some(None));
    }

    #[test]
    fn touch_synthesized_clicks_are_dropped() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.apply(NativeMessage::MouseButton {
            window,
            button: NativeMouseButton::Left,
            pressed: true,
            extra_info: 0xFF51_5701,
        })
        .unwrap();
        assert_eq!(rig.state.pending_events(), 0);
        assert!(!rig.state.is_down(KeyCode::MouseLeft));
        assert!(rig.platform.captured().is_none());

        rig.apply(NativeMessage::MouseButton {
            window,
            button: NativeMouseButton::Left,
            pressed: true,
            extra_info: 0,
        })
        .unwrap();
        assert!(rig.state.started(KeyCode::MouseLeft));
        assert_eq!(rig.platform.captured(), Some(window));

        rig.apply(NativeMessage::MouseButton {
            window,
            button: NativeMouseButton::Left,
            pressed: false,
            extra_info: 0,
        })
        .unwrap();
        assert!(rig.state.ended(KeyCode::MouseLeft));
        assert!(rig.platform.captured().is_none());
    }

    #[test]
    fn x_buttons_pick_by_high_word() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.apply(NativeMessage::XButton { window, wparam: 1 << 16, pressed: true, extra_info: 0 })
            .unwrap();
        rig.apply(NativeMessage::XButton { window, wparam: 2 << 16, pressed: true, extra_info: 0 })
            .unwrap();
        assert!(rig.state.is_down(KeyCode::MouseX1));
        assert!(rig.state.is_down(KeyCode::MouseX2));
    }

    #[test]
    fn wheel_accumulates_and_learns_step() {
        let mut rig = Rig::new();
        let window = rig.window;
        assert_eq!(rig.state.typical_wheel_delta(), None);
        rig.platform.push_message(NativeMessage::Wheel { window, delta: 120 });
        rig.platform.push_message(NativeMessage::Wheel { window, delta: 240 });
        rig.platform.push_message(NativeMessage::HWheel { window, delta: -120 });
        let events = rig.frame();
        assert_eq!(
            kinds(&events),
            vec![
                EventKind::MouseWheel { delta: 120 },
                EventKind::MouseWheel { delta: 240 },
                EventKind::MouseHWheel { delta: -120 },
            ]
        );
        assert_eq!(rig.state.wheel_delta().vertical, 360);
        assert_eq!(rig.state.wheel_delta().horizontal, -120);
        assert_eq!(rig.state.typical_wheel_delta(), Some(120));

        rig.frame();
        assert_eq!(rig.state.wheel_delta().vertical, 0);
        assert_eq!(rig.state.typical_wheel_delta(), Some(120));
    }

    #[test]
    fn wheel_step_override_wins() {
        let mut rig = Rig::new();
        rig.poller = InputPoller::new(Some(30));
        let window = rig.window;
        rig.apply(NativeMessage::Wheel { window, delta: 30 }).unwrap();
        assert_eq!(rig.state.typical_wheel_delta(), Some(30));
    }

    #[test]
    fn raw_motion_skips_touch() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.platform.push_message(NativeMessage::RawMouseMotion { window, dx: 3, dy: -2, from_touch: false });
        rig.platform.push_message(NativeMessage::RawMouseMotion { window, dx: 50, dy: 50, from_touch: true });
        rig.platform.push_message(NativeMessage::RawMouseMotion { window, dx: 1, dy: 1, from_touch: false });
        rig.frame();
        assert_eq!(rig.state.mouse_delta(), IVec2::new(4, -1));
        rig.frame();
        assert_eq!(rig.state.mouse_delta(), IVec2::ZERO);
    }

    #[test]
    fn size_transitions() {
        let mut rig = Rig::new();
        let window = rig.window;
        let size = |kind| NativeMessage::Size { window, kind, width: 800, height: 600 };

        rig.apply(size(SizeKind::Minimized)).unwrap();
        assert!(rig.state.is_minimized() && rig.state.is_paused());
        assert_eq!(rig.state.pending_events(), 0);

        rig.apply(size(SizeKind::Restored)).unwrap();
        assert!(!rig.state.is_minimized() && !rig.state.is_paused());
        assert_eq!(rig.state.pending_events(), 1);

        rig.apply(size(SizeKind::Maximized)).unwrap();
        assert!(rig.state.is_maximized());
        rig.apply(size(SizeKind::Restored)).unwrap();
        assert!(!rig.state.is_maximized());
        assert_eq!(rig.state.pending_events(), 3);

        // Programmatic resize.
        rig.apply(size(SizeKind::Restored)).unwrap();
        assert_eq!(rig.state.pending_events(), 4);
    }

    #[test]
    fn focus_loss_during_drag_flushes_resize() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.apply(NativeMessage::EnterSizeMove { window }).unwrap();
        rig.platform.set_client_size(window, 700, 500);
        rig.apply(NativeMessage::Size { window, kind: SizeKind::Restored, width: 700, height: 500 })
            .unwrap();
        assert_eq!(rig.state.pending_events(), 0);

        rig.apply(NativeMessage::KillFocus { window }).unwrap();
        assert!(!rig.state.is_user_resizing());
        assert_eq!(
            rig.state.events.pop().map(|e| e.kind),
            Some(EventKind::WindowResize { width: 700, height: 500 })
        );
    }

    #[test]
    fn activation_pauses() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.apply(NativeMessage::Activate { window, active: false }).unwrap();
        assert!(rig.state.is_paused());
        rig.apply(NativeMessage::Activate { window, active: true }).unwrap();
        assert!(!rig.state.is_paused());
    }

    #[test]
    fn swallowed_modifier_release_surfaces_next_frame() {
        let mut rig = Rig::new();
        let w = rig.window;
        rig.platform.press_key(w, vk::MENU);
        rig.frame();
        assert!(rig.state.modifiers().alt());

        // Alt+Tab: the OS eats the key-up.
        rig.platform.set_physical_key(vk::MENU, false);
        let events = rig.frame();
        assert!(!rig.state.modifiers().alt());
        assert!(rig.state.ended(KeyCode::Alt));
        assert_eq!(events.iter().filter_map(Event::key).collect::<Vec<_>>(), vec![(KeyCode::Alt, false)]);
        // Attributed to the window that saw the press.
        assert_eq!(events[0].window, Some(rig.handle));
    }

    #[test]
    fn recheck_release_without_any_window_history() {
        let mut rig = Rig::new();
        rig.state.key_down(None, KeyCode::Ctrl, false);
        let events = rig.frame();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key(), Some((KeyCode::Ctrl, false)));
        assert_eq!(events[0].window, None);
    }

    #[test]
    fn drops_need_accept_files() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.apply(NativeMessage::DropFiles { window, paths: vec!["a.txt".into()] }).unwrap();
        assert_eq!(rig.state.pending_events(), 0);

        let style = WindowStyle { ex_style: ExStyleFlags::ACCEPT_FILES, ..WindowStyle::default() };
        let mut rig = Rig::with_style(style);
        let window = rig.window;
        rig.apply(NativeMessage::DropFiles { window, paths: vec!["a.txt".into()] }).unwrap();
        assert_eq!(
            rig.state.events.pop().map(|e| e.kind),
            Some(EventKind::DragAndDrop { files: vec!["a.txt".into()] })
        );
    }

    #[test]
    fn surrogates_pair_up_or_report() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.apply(NativeMessage::Char { window, unit: 0xD83D }).unwrap();
        rig.apply(NativeMessage::Char { window, unit: 0xDE00 }).unwrap();
        assert_eq!(
            rig.state.events.pop().map(|e| e.kind),
            Some(EventKind::TextInput { codepoint: '\u{1F600}' })
        );

        let err = rig.apply(NativeMessage::Char { window, unit: 0xDC00 }).unwrap_err();
        assert_eq!(err, InputError::UnpairedLowSurrogate(0xDC00));

        rig.apply(NativeMessage::Char { window, unit: 0xD83D }).unwrap();
        let err = rig.apply(NativeMessage::Char { window, unit: u16::from(b'x') }).unwrap_err();
        assert_eq!(err, InputError::UnpairedHighSurrogate(0xD83D));
        assert_eq!(
            rig.state.events.pop().map(|e| e.kind),
            Some(EventKind::TextInput { codepoint: 'x' })
        );
        assert_eq!(rig.state.pending_events(), 0);
    }

    #[test]
    fn menu_char_is_swallowed() {
        let mut rig = Rig::new();
        let window = rig.window;
        rig.apply(NativeMessage::MenuChar { window }).unwrap();
        assert_eq!(rig.state.pending_events(), 0);
    }
}
