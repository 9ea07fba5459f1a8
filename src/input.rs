//! Polled input state mirrored from winit events.
//!
//! The event loop feeds raw winit events into [`Input`], which keeps a
//! per-button `{down, pressed, released}` table for keys and mouse buttons.
//! `pressed` and `released` are edge-triggered: true only during the single
//! frame in which the state changed, cleared at every frame boundary by
//! [`Input::end_frame`]. `down` persists until a release event.

use cgmath::Vector2;
use instant::Duration;
use winit::keyboard::KeyCode;

/// State of one logical button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

impl ButtonState {
    fn press(&mut self) {
        // Repeats arrive as presses while `down` is already set, so the
        // edge flag only triggers on the first press.
        self.pressed = !self.down;
        self.down = true;
        self.released = false;
    }

    fn release(&mut self) {
        self.released = self.down;
        self.down = false;
        self.pressed = false;
    }

    fn end_frame(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

/// Logical keys tracked by the input table. Keys winit reports that are not
/// listed here are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
}

impl Key {
    pub(crate) const COUNT: usize = 52;

    fn index(self) -> usize {
        self as usize
    }

    /// Map a winit physical key code onto the table.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,
            KeyCode::Digit0 => Key::Num0,
            KeyCode::Digit1 => Key::Num1,
            KeyCode::Digit2 => Key::Num2,
            KeyCode::Digit3 => Key::Num3,
            KeyCode::Digit4 => Key::Num4,
            KeyCode::Digit5 => Key::Num5,
            KeyCode::Digit6 => Key::Num6,
            KeyCode::Digit7 => Key::Num7,
            KeyCode::Digit8 => Key::Num8,
            KeyCode::Digit9 => Key::Num9,
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::Space => Key::Space,
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::ShiftLeft => Key::LeftShift,
            KeyCode::ShiftRight => Key::RightShift,
            KeyCode::ControlLeft => Key::LeftControl,
            KeyCode::ControlRight => Key::RightControl,
            KeyCode::AltLeft => Key::LeftAlt,
            KeyCode::AltRight => Key::RightAlt,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    pub(crate) const COUNT: usize = 5;

    fn index(self) -> usize {
        self as usize
    }

    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            winit::event::MouseButton::Back => Some(MouseButton::Back),
            winit::event::MouseButton::Forward => Some(MouseButton::Forward),
            winit::event::MouseButton::Other(_) => None,
        }
    }
}

/// Polled button tables, cursor position, and frame delta time.
///
/// The event hooks (`key_event`, `mouse_event`, `cursor_moved`, `end_frame`)
/// are normally driven by [`crate::app::run`]; they are public so custom
/// event loops and tests can drive the table directly.
#[derive(Debug)]
pub struct Input {
    keys: [ButtonState; Key::COUNT],
    mouse: [ButtonState; MouseButton::COUNT],
    cursor: Vector2<f32>,
    frame_time: Duration,
}

impl Input {
    pub fn new() -> Self {
        Self {
            keys: [ButtonState::default(); Key::COUNT],
            mouse: [ButtonState::default(); MouseButton::COUNT],
            cursor: Vector2::new(0.0, 0.0),
            frame_time: Duration::ZERO,
        }
    }

    pub fn key_event(&mut self, key: Key, is_down: bool) {
        if is_down {
            self.keys[key.index()].press();
        } else {
            self.keys[key.index()].release();
        }
    }

    pub fn mouse_event(&mut self, button: MouseButton, is_down: bool) {
        if is_down {
            self.mouse[button.index()].press();
        } else {
            self.mouse[button.index()].release();
        }
    }

    /// Last reported cursor coordinate wins; no smoothing, no clamping.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = Vector2::new(x, y);
    }

    /// Clear the edge-triggered flags for every button. Called once per frame
    /// after the buffer swap.
    pub fn end_frame(&mut self) {
        for key in self.keys.iter_mut() {
            key.end_frame();
        }
        for button in self.mouse.iter_mut() {
            button.end_frame();
        }
    }

    pub fn set_frame_time(&mut self, dt: Duration) {
        self.frame_time = dt;
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys[key.index()].down
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys[key.index()].pressed
    }

    pub fn key_released(&self, key: Key) -> bool {
        self.keys[key.index()].released
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse[button.index()].down
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse[button.index()].pressed
    }

    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse[button.index()].released
    }

    pub fn key(&self, key: Key) -> ButtonState {
        self.keys[key.index()]
    }

    pub fn mouse_position(&self) -> Vector2<f32> {
        self.cursor
    }

    /// Wall-clock time between the previous two buffer swaps. Zero on the
    /// first frame.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}
