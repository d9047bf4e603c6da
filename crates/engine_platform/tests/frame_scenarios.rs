// crates/engine_platform/tests/frame_scenarios.rs
//! Whole frames driven through the public API on the headless backend.

use engine_platform::input::map::vk;
use engine_platform::input::{key_from_native, native_from_key};
use engine_platform::message::{NativeMouseButton, NativeTouchPoint, SizeKind, TouchFlags};
use engine_platform::{
    ButtonState, Event, EventKind, HeadlessPlatform, KeyCode, NativeMessage, NativeWindowId,
    PlatformConfig, PlatformContext, TouchType, WindowCreationFlags, WindowDesc, WindowHandle,
};
use std::path::PathBuf;

struct Harness {
    ctx: PlatformContext<HeadlessPlatform>,
    handle: WindowHandle,
    native: NativeWindowId,
}

impl Harness {
    fn new() -> Self {
        Self::with_desc(WindowDesc::new("scenario", 640, 480))
    }

    fn with_desc(desc: WindowDesc) -> Self {
        let mut ctx = PlatformContext::new(HeadlessPlatform::new(), PlatformConfig::default());
        let handle = ctx.create_window(&desc).expect("window");
        let native = ctx.registry().get(handle).expect("record").native;
        Self { ctx, handle, native }
    }

    fn platform(&mut self) -> &mut HeadlessPlatform {
        self.ctx.platform_mut()
    }

    fn push(&mut self, message: NativeMessage) {
        self.ctx.platform_mut().push_message(message);
    }

    fn frame(&mut self) -> Vec<Event> {
        self.ctx.pump_events();
        std::iter::from_fn(|| self.ctx.next_event()).collect()
    }
}

fn keys(events: &[Event]) -> Vec<(KeyCode, bool)> {
    events.iter().filter_map(Event::key).collect()
}

#[test]
fn key_tables_agree_both_ways() {
    for key in KeyCode::ALL {
        let Some(native) = native_from_key(key) else {
            assert_eq!(key, KeyCode::Colon);
            continue;
        };
        assert_eq!(key_from_native(u32::from(native.vk), native.extended), key);
    }
}

#[test]
fn tap_within_one_frame() {
    let mut h = Harness::new();
    let native = h.native;
    h.platform().press_key(native, b'A');
    h.platform().release_key(native, b'A');

    let events = h.frame();
    assert_eq!(keys(&events), vec![(KeyCode::A, true), (KeyCode::A, false)]);
    assert!(events.iter().all(|e| e.window == Some(h.handle)));
    let a = h.ctx.input().button(KeyCode::A);
    assert_eq!(a, ButtonState::DOWN | ButtonState::START | ButtonState::END);

    assert!(h.frame().is_empty());
    assert_eq!(h.ctx.input().button(KeyCode::A), ButtonState::empty());
}

#[test]
fn held_key_stays_down_across_frames() {
    let mut h = Harness::new();
    let native = h.native;
    h.platform().press_key(native, vk::SPACE);
    h.frame();
    assert!(h.ctx.input().started(KeyCode::Space));

    for _ in 0..3 {
        h.platform().repeat_key(native, vk::SPACE);
        let events = h.frame();
        assert_eq!(h.ctx.input().button(KeyCode::Space), ButtonState::DOWN);
        assert!(matches!(
            events[0].kind,
            EventKind::Keyboard { key: KeyCode::Space, pressed: true, repeat: true, .. }
        ));
    }

    h.platform().release_key(native, vk::SPACE);
    h.frame();
    assert!(h.ctx.input().ended(KeyCode::Space));
}

#[test]
fn swallowed_alt_release_surfaces_on_focus_loss() {
    let mut h = Harness::new();
    let native = h.native;
    h.platform().press_key(native, vk::LMENU);
    h.frame();
    assert!(h.ctx.input().modifiers().alt());

    // Alt+Tab: the OS eats the key-up and takes focus away.
    h.platform().set_physical_key(vk::LMENU, false);
    h.push(NativeMessage::KillFocus { window: native });
    let events = h.frame();

    assert_eq!(keys(&events), vec![(KeyCode::Alt, false)]);
    assert!(!h.ctx.input().has_focus());
    assert!(!h.ctx.input().modifiers().alt());

    h.push(NativeMessage::SetFocus { window: native });
    h.frame();
    assert!(h.ctx.input().has_focus());
    assert_eq!(h.ctx.input().button(KeyCode::Alt), ButtonState::empty());
}

#[test]
fn focus_loss_releases_each_held_key_once() {
    let mut h = Harness::new();
    let native = h.native;
    h.platform().press_key(native, vk::LSHIFT);
    h.platform().release_key(native, vk::LSHIFT);
    h.platform().press_key(native, b'A');
    h.platform().press_key(native, vk::LMENU);
    h.frame();
    assert!(h.ctx.input().is_down(KeyCode::A));
    assert!(h.ctx.input().modifiers().alt());

    h.platform().set_physical_key(b'A', false);
    h.platform().set_physical_key(vk::LMENU, false);
    h.push(NativeMessage::KillFocus { window: native });
    h.push(NativeMessage::ActivateApp { window: native, active: false });
    let events = h.frame();

    assert_eq!(keys(&events), vec![(KeyCode::Alt, false), (KeyCode::A, false)]);
    assert!(events.iter().all(|e| e.window == Some(h.handle)));
    assert!(h.ctx.input().ended(KeyCode::A));
    assert!(h.ctx.input().ended(KeyCode::Alt));
    assert!(!h.ctx.input().ended(KeyCode::Shift));
    assert!(h.ctx.input().modifiers().is_empty());
}

#[test]
fn ctrl_shortcut_carries_modifiers() {
    let mut h = Harness::new();
    let native = h.native;
    h.platform().press_key(native, vk::LCONTROL);
    h.platform().press_key(native, b'C');
    let events = h.frame();
    match events.last().map(|e| &e.kind) {
        Some(EventKind::Keyboard { key: KeyCode::C, modifiers, .. }) => {
            assert!(modifiers.ctrl());
            assert!(!modifiers.shift());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn text_with_surrogate_pairs() {
    let mut h = Harness::new();
    let native = h.native;
    h.platform().type_text(native, "a\u{1F600}\r");
    h.push(NativeMessage::Char { window: native, unit: 0xDC00 });

    let text: Vec<char> = h
        .frame()
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::TextInput { codepoint } => Some(codepoint),
            _ => None,
        })
        .collect();
    assert_eq!(text, vec!['a', '\u{1F600}']);
}

#[test]
fn interactive_resize_reports_once_on_exit() {
    let mut h = Harness::new();
    let native = h.native;
    h.push(NativeMessage::EnterSizeMove { window: native });
    h.push(NativeMessage::Size {
        window: native,
        kind: SizeKind::Restored,
        width: 700,
        height: 500,
    });
    assert!(h.frame().is_empty());
    assert!(h.ctx.input().is_user_resizing());
    assert!(h.ctx.input().is_paused());

    h.platform().set_client_size(native, 800, 600);
    h.push(NativeMessage::ExitSizeMove { window: native });
    let events = h.frame();
    assert_eq!(
        events,
        vec![Event::new(Some(h.handle), EventKind::WindowResize { width: 800, height: 600 })]
    );
    assert!(!h.ctx.input().is_user_resizing());
    assert!(!h.ctx.input().is_paused());
}

#[test]
fn minimize_then_restore() {
    let mut h = Harness::new();
    let native = h.native;
    h.push(NativeMessage::Size { window: native, kind: SizeKind::Minimized, width: 0, height: 0 });
    assert!(h.frame().is_empty());
    assert!(h.ctx.input().is_minimized());
    assert!(h.ctx.input().is_paused());

    h.push(NativeMessage::Size { window: native, kind: SizeKind::Restored, width: 640, height: 480 });
    let events = h.frame();
    assert_eq!(events.len(), 1);
    assert!(!h.ctx.input().is_minimized());
    assert!(!h.ctx.input().is_paused());
}

#[test]
fn close_and_quit() {
    let mut h = Harness::new();
    let native = h.native;
    assert!(h.frame().is_empty());

    h.push(NativeMessage::Close { window: native });
    h.push(NativeMessage::Quit);
    let events = h.frame();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(Event::is_quit));
    assert_eq!(events[0].window, Some(h.handle));
    assert_eq!(events[1].window, None);
}

#[test]
fn single_quit_is_delivered_once() {
    let mut h = Harness::new();
    h.push(NativeMessage::Quit);
    h.ctx.pump_events();
    assert_eq!(h.ctx.next_event(), Some(Event::new(None, EventKind::Quit)));
    assert_eq!(h.ctx.next_event(), None);
    assert!(h.frame().is_empty());
}

#[test]
fn fullscreen_round_trip() {
    let mut h = Harness::new();
    let before = h.ctx.platform().windows()[0].rect;

    h.ctx.toggle_fullscreen(h.handle, true);
    assert!(h.ctx.is_fullscreen(h.handle));
    assert_eq!(h.ctx.window_size(h.handle), (1920, 1080));

    h.ctx.toggle_fullscreen(h.handle, false);
    assert!(!h.ctx.is_fullscreen(h.handle));
    assert_eq!(h.ctx.platform().windows()[0].rect, before);
    assert_eq!(h.ctx.window_size(h.handle), (640, 480));
}

#[test]
fn touch_batch_fills_pointers_for_one_frame() {
    let mut h = Harness::new();
    let native = h.native;
    // Client origin of a framed window at the work area corner.
    let (ox, oy) = (8, 31);
    h.push(NativeMessage::Touch {
        window: native,
        points: Some(vec![
            NativeTouchPoint { flags: TouchFlags::DOWN, x: ox + 10, y: oy + 20 },
            NativeTouchPoint { flags: TouchFlags::MOVE | TouchFlags::UP, x: ox + 30, y: oy + 40 },
        ]),
    });
    let events = h.frame();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].kind,
        EventKind::Touch { index: 0, touch_type: TouchType::Pressed, x: 10, y: 20 }
    );

    let input = h.ctx.input();
    assert_eq!(input.touch_pointer_count(), 2);
    let types: Vec<TouchType> = input.touch_pointers().map(|p| p.touch_type).collect();
    assert_eq!(types, vec![TouchType::Pressed, TouchType::Moved]);

    h.frame();
    assert_eq!(h.ctx.input().touch_pointer_count(), 0);
}

#[test]
fn wheel_accumulates_per_frame() {
    let mut h = Harness::new();
    let native = h.native;
    assert_eq!(h.ctx.input().typical_wheel_delta(), None);
    h.push(NativeMessage::Wheel { window: native, delta: 120 });
    h.push(NativeMessage::Wheel { window: native, delta: 120 });
    h.push(NativeMessage::HWheel { window: native, delta: -120 });
    let events = h.frame();
    assert_eq!(events.len(), 3);

    let wheel = h.ctx.input().wheel_delta();
    assert_eq!((wheel.vertical, wheel.horizontal), (240, -120));
    assert_eq!(h.ctx.input().typical_wheel_delta(), Some(120));

    h.frame();
    assert_eq!(h.ctx.input().wheel_delta().vertical, 0);
    assert_eq!(h.ctx.input().typical_wheel_delta(), Some(120));
}

#[test]
fn mouse_buttons_capture_and_ignore_touch_echoes() {
    let mut h = Harness::new();
    let native = h.native;
    h.platform().click(native, NativeMouseButton::Left, true);
    h.frame();
    assert!(h.ctx.input().is_down(KeyCode::MouseLeft));
    assert_eq!(h.ctx.platform().captured(), Some(native));

    h.platform().click(native, NativeMouseButton::Left, false);
    h.frame();
    assert_eq!(h.ctx.platform().captured(), None);

    h.push(NativeMessage::MouseButton {
        window: native,
        button: NativeMouseButton::Right,
        pressed: true,
        extra_info: 0xFF51_5780,
    });
    assert!(h.frame().is_empty());
    assert!(!h.ctx.input().is_down(KeyCode::MouseRight));
}

#[test]
fn cursor_in_both_handednesses() {
    let mut h = Harness::new();
    h.platform().set_cursor(8 + 100, 31 + 30);
    assert_eq!(h.ctx.mouse_position(h.handle), (100, 30));
    assert_eq!(h.ctx.mouse_position_right_handed(h.handle), (100, 450));
}

#[test]
fn oversized_window_is_scaled_to_desktop() {
    let h = Harness::with_desc(WindowDesc::new("big", 2000, 2000));
    let (width, height) = h.ctx.window_size(h.handle);
    // 90% of a 1080 pixel desktop.
    assert!((971..=972).contains(&height), "{height}");
    assert!((971..=972).contains(&width), "{width}");
}

#[test]
fn drops_need_drag_and_drop_flag() {
    let paths = vec![PathBuf::from("assets/level.toml")];

    let mut plain = Harness::new();
    let native = plain.native;
    plain.push(NativeMessage::DropFiles { window: native, paths: paths.clone() });
    assert!(plain.frame().is_empty());

    let mut accepting = Harness::with_desc(
        WindowDesc::new("drop", 320, 200).with_flags(WindowCreationFlags::DRAG_AND_DROP),
    );
    let native = accepting.native;
    accepting.push(NativeMessage::DropFiles { window: native, paths: paths.clone() });
    let events = accepting.frame();
    assert_eq!(events[0].kind, EventKind::DragAndDrop { files: paths });
}
