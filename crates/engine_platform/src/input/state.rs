// crates/engine_platform/src/input/state.rs

use super::queue::EventQueue;
use super::text::SurrogateAssembler;
use engine_shared::{
    ButtonState, Event, EventKind, KeyCode, Modifiers, TouchPointer, WheelDelta, WindowHandle,
    MAX_TOUCH_POINTERS,
};
use glam::IVec2;

/// Everything the game loop can read about input for the current frame.
/// Written only by the poller.
#[derive(Debug)]
pub struct InputState {
    pub(crate) buttons: [ButtonState; KeyCode::COUNT],
    pub(crate) modifiers: Modifiers,
    pub(crate) wheel: WheelDelta,
    pub(crate) typical_wheel_delta: Option<i32>,
    pub(crate) mouse_delta: IVec2,
    pub(crate) touch_pointers: [Option<TouchPointer>; MAX_TOUCH_POINTERS],
    pub(crate) touch_pointer_count: usize,

    pub(crate) has_focus: bool,
    pub(crate) is_paused: bool,
    pub(crate) is_minimized: bool,
    pub(crate) is_maximized: bool,
    pub(crate) is_user_resizing: bool,
    /// Window of the latest focus or key-down message; owns releases found
    /// by the start-of-frame modifier re-check.
    pub(crate) active_window: Option<WindowHandle>,

    pub(crate) events: EventQueue,
    pub(crate) text: SurrogateAssembler,
}

impl InputState {
    pub fn new(max_events_per_frame: usize) -> Self {
        Self {
            buttons: [ButtonState::empty(); KeyCode::COUNT],
            modifiers: Modifiers::empty(),
            wheel: WheelDelta::default(),
            typical_wheel_delta: None,
            mouse_delta: IVec2::ZERO,
            touch_pointers: [None; MAX_TOUCH_POINTERS],
            touch_pointer_count: 0,
            has_focus: true,
            is_paused: false,
            is_minimized: false,
            is_maximized: false,
            is_user_resizing: false,
            active_window: None,
            events: EventQueue::with_capacity(max_events_per_frame),
            text: SurrogateAssembler::new(),
        }
    }

    pub fn button(&self, key: KeyCode) -> ButtonState {
        self.buttons[key.index()]
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.button(key).contains(ButtonState::DOWN)
    }

    /// Went down this frame.
    pub fn started(&self, key: KeyCode) -> bool {
        self.button(key).contains(ButtonState::START)
    }

    /// Went up this frame.
    pub fn ended(&self, key: KeyCode) -> bool {
        self.button(key).contains(ButtonState::END)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn wheel_delta(&self) -> WheelDelta {
        self.wheel
    }

    /// Native units per wheel notch; unknown until the first wheel message.
    pub fn typical_wheel_delta(&self) -> Option<i32> {
        self.typical_wheel_delta
    }

    pub fn mouse_delta(&self) -> IVec2 {
        self.mouse_delta
    }

    /// Touch points reported this frame.
    pub fn touch_pointers(&self) -> impl Iterator<Item = &TouchPointer> {
        self.touch_pointers[..self.touch_pointer_count]
            .iter()
            .filter_map(Option::as_ref)
    }

    pub fn touch_pointer_count(&self) -> usize {
        self.touch_pointer_count
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }
    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }
    pub fn is_maximized(&self) -> bool {
        self.is_maximized
    }
    pub fn is_user_resizing(&self) -> bool {
        self.is_user_resizing
    }

    /// Events still unread this frame.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn push_event(&mut self, window: Option<WindowHandle>, kind: EventKind) {
        self.events.push(Event::new(window, kind));
    }

    fn set_latch(&mut self, key: KeyCode, down: bool) {
        let flag = match key {
            KeyCode::Alt => Modifiers::ALT,
            KeyCode::Cmd => Modifiers::CMD,
            KeyCode::Ctrl => Modifiers::CTRL,
            KeyCode::Shift => Modifiers::SHIFT,
            _ => return,
        };
        self.modifiers.set(flag, down);
    }

    pub(crate) fn is_latched(&self, key: KeyCode) -> bool {
        match key {
            KeyCode::Alt => self.modifiers.alt(),
            KeyCode::Cmd => self.modifiers.cmd(),
            KeyCode::Ctrl => self.modifiers.ctrl(),
            KeyCode::Shift => self.modifiers.shift(),
            _ => false,
        }
    }

    /// Records a press. Repeats of a held key report `repeat` but never
    /// set `START` again.
    pub(crate) fn key_down(&mut self, window: Option<WindowHandle>, key: KeyCode, repeat: bool) {
        self.set_latch(key, true);
        self.push_event(
            window,
            EventKind::Keyboard {
                key,
                pressed: true,
                repeat,
                modifiers: self.modifiers,
            },
        );

        if key == KeyCode::Unknown {
            return;
        }
        // A key released earlier this frame counts as up.
        let state = &mut self.buttons[key.index()];
        if !state.contains(ButtonState::DOWN) || state.contains(ButtonState::END) {
            state.insert(ButtonState::START | ButtonState::DOWN);
            state.remove(ButtonState::END);
        }
    }

    /// Records a release. Returns `false` when the release was redundant
    /// (key not down, or already released this frame) and nothing happened.
    pub(crate) fn key_up(&mut self, window: Option<WindowHandle>, key: KeyCode) -> bool {
        self.set_latch(key, false);

        if key == KeyCode::Unknown {
            self.push_event(
                window,
                EventKind::Keyboard {
                    key,
                    pressed: false,
                    repeat: false,
                    modifiers: self.modifiers,
                },
            );
            return true;
        }

        let state = self.buttons[key.index()];
        if !state.contains(ButtonState::DOWN) || state.contains(ButtonState::END) {
            return false;
        }
        self.push_event(
            window,
            EventKind::Keyboard {
                key,
                pressed: false,
                repeat: false,
                modifiers: self.modifiers,
            },
        );
        self.buttons[key.index()].insert(ButtonState::END);
        true
    }

    /// Start-of-frame reset, before any message of the new frame is applied.
    pub(crate) fn begin_frame(&mut self) {
        let dropped = self.events.dropped();
        if dropped > 0 {
            tracing::warn!(dropped, capacity = self.events.capacity(), "events lost to a full queue last frame");
        }
        self.events.clear();

        let focused = self.has_focus;
        for state in self.buttons.iter_mut() {
            if !focused || state.contains(ButtonState::END) {
                state.remove(ButtonState::DOWN | ButtonState::START | ButtonState::END);
            } else {
                state.remove(ButtonState::START);
            }
        }

        self.wheel = WheelDelta::default();
        self.mouse_delta = IVec2::ZERO;
        self.touch_pointer_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard_events(state: &mut InputState) -> Vec<(KeyCode, bool, bool)> {
        std::iter::from_fn(|| state.events.pop())
            .filter_map(|e| match e.kind {
                EventKind::Keyboard { key, pressed, repeat, .. } => Some((key, pressed, repeat)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn press_then_release_in_one_frame() {
        let mut s = InputState::new(16);
        s.key_down(None, KeyCode::A, false);
        assert!(s.key_up(None, KeyCode::A));
        assert_eq!(
            s.button(KeyCode::A),
            ButtonState::DOWN | ButtonState::START | ButtonState::END
        );
        assert_eq!(
            keyboard_events(&mut s),
            vec![(KeyCode::A, true, false), (KeyCode::A, false, false)]
        );

        s.begin_frame();
        assert_eq!(s.button(KeyCode::A), ButtonState::empty());
    }

    #[test]
    fn redundant_release_is_silent() {
        let mut s = InputState::new(16);
        assert!(!s.key_up(None, KeyCode::B));
        assert_eq!(s.pending_events(), 0);

        s.key_down(None, KeyCode::B, false);
        assert!(s.key_up(None, KeyCode::B));
        assert!(!s.key_up(None, KeyCode::B));
        assert_eq!(s.pending_events(), 2);
    }

    #[test]
    fn repress_after_release_clears_end() {
        let mut s = InputState::new(16);
        s.key_down(None, KeyCode::C, false);
        s.key_up(None, KeyCode::C);
        s.begin_frame();
        s.key_down(None, KeyCode::C, false);
        s.key_up(None, KeyCode::C);
        s.key_down(None, KeyCode::C, false);
        assert_eq!(s.button(KeyCode::C), ButtonState::DOWN | ButtonState::START);

        // Still held on the next frame.
        s.begin_frame();
        assert_eq!(s.button(KeyCode::C), ButtonState::DOWN);
    }

    #[test]
    fn latches_follow_modifiers() {
        let mut s = InputState::new(16);
        s.key_down(None, KeyCode::Ctrl, false);
        s.key_down(None, KeyCode::S, false);
        match s.events.iter().last().map(|e| &e.kind) {
            Some(EventKind::Keyboard { modifiers, .. }) => assert!(modifiers.ctrl()),
            other => panic!("unexpected {other:?}"),
        }
        s.key_up(None, KeyCode::Ctrl);
        assert!(!s.modifiers().ctrl());
    }

    #[test]
    fn unknown_key_emits_but_keeps_slot_zero_clean() {
        let mut s = InputState::new(16);
        s.key_down(None, KeyCode::Unknown, false);
        s.key_up(None, KeyCode::Unknown);
        assert_eq!(s.button(KeyCode::Unknown), ButtonState::empty());
        assert_eq!(s.pending_events(), 2);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn overflow_count_resets_each_frame() {
        let mut s = InputState::new(1);
        s.key_down(None, KeyCode::A, false);
        s.key_down(None, KeyCode::B, false);
        assert_eq!(s.events.dropped(), 1);
        s.begin_frame();
        assert_eq!(s.events.dropped(), 0);
        assert_eq!(s.pending_events(), 0);
    }

    #[test]
    fn unfocused_reset_clears_held_keys() {
        let mut s = InputState::new(16);
        s.key_down(None, KeyCode::W, false);
        s.begin_frame();
        assert_eq!(s.button(KeyCode::W), ButtonState::DOWN);
        s.has_focus = false;
        s.begin_frame();
        assert_eq!(s.button(KeyCode::W), ButtonState::empty());
    }
}
