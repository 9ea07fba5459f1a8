use std::time::Duration;

use ember2d::{Input, Key, MouseButton};

#[test]
fn press_then_release_edge_flags() {
    let mut input = Input::new();
    assert!(!input.key_down(Key::Space));

    // Press event: down and pressed, not released.
    input.key_event(Key::Space, true);
    assert!(input.key_down(Key::Space));
    assert!(input.key_pressed(Key::Space));
    assert!(!input.key_released(Key::Space));

    // Next frame boundary with no new event: only down survives.
    input.end_frame();
    assert!(input.key_down(Key::Space));
    assert!(!input.key_pressed(Key::Space));
    assert!(!input.key_released(Key::Space));

    // Release event: released for exactly one frame.
    input.key_event(Key::Space, false);
    assert!(!input.key_down(Key::Space));
    assert!(!input.key_pressed(Key::Space));
    assert!(input.key_released(Key::Space));

    input.end_frame();
    assert!(!input.key_released(Key::Space));
}

#[test]
fn repeat_does_not_retrigger_pressed() {
    let mut input = Input::new();

    input.key_event(Key::A, true);
    input.end_frame();

    // OS key repeats arrive as further press events while already down.
    input.key_event(Key::A, true);
    assert!(input.key_down(Key::A));
    assert!(!input.key_pressed(Key::A));
    assert!(!input.key_released(Key::A));
}

#[test]
fn pressed_and_released_are_mutually_exclusive() {
    let mut input = Input::new();

    let events = [true, true, false, true, false, false, true];
    for is_down in events {
        input.key_event(Key::W, is_down);
        let state = input.key(Key::W);
        assert!(!(state.pressed && state.released));
        input.end_frame();
        let state = input.key(Key::W);
        assert!(!state.pressed && !state.released);
    }
}

#[test]
fn release_without_press_is_silent() {
    let mut input = Input::new();

    input.key_event(Key::Escape, false);
    assert!(!input.key_down(Key::Escape));
    assert!(!input.key_pressed(Key::Escape));
    assert!(!input.key_released(Key::Escape));
}

#[test]
fn buttons_are_independent() {
    let mut input = Input::new();

    input.key_event(Key::A, true);
    assert!(!input.key_down(Key::B));
    assert!(!input.key_pressed(Key::B));

    input.mouse_event(MouseButton::Left, true);
    assert!(input.mouse_down(MouseButton::Left));
    assert!(!input.mouse_down(MouseButton::Right));
}

#[test]
fn mouse_buttons_follow_the_same_transitions() {
    let mut input = Input::new();

    input.mouse_event(MouseButton::Right, true);
    assert!(input.mouse_down(MouseButton::Right));
    assert!(input.mouse_pressed(MouseButton::Right));

    input.end_frame();
    assert!(input.mouse_down(MouseButton::Right));
    assert!(!input.mouse_pressed(MouseButton::Right));

    input.mouse_event(MouseButton::Right, false);
    assert!(input.mouse_released(MouseButton::Right));
    assert!(!input.mouse_down(MouseButton::Right));
}

#[test]
fn cursor_position_is_last_reported() {
    let mut input = Input::new();
    assert_eq!(input.mouse_position(), cgmath::vec2(0.0, 0.0));

    input.cursor_moved(120.5, 80.0);
    // No clamping: coordinates outside the window bounds pass through.
    input.cursor_moved(-3.0, 9001.0);
    assert_eq!(input.mouse_position(), cgmath::vec2(-3.0, 9001.0));
}

#[test]
fn frame_time_defaults_to_zero() {
    let mut input = Input::new();
    assert_eq!(input.frame_time(), Duration::ZERO);

    input.set_frame_time(Duration::from_millis(16));
    assert_eq!(input.frame_time(), Duration::from_millis(16));
}
