use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Re-exported key and mouse enums from `winit` for convenience.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Per-tick view of the input devices, as consumed by camera controllers.
pub trait InputSource {
    /// Returns true while `key` is held down.
    fn is_key_held(&self, key: KeyCode) -> bool;

    /// Returns true while `button` is held down.
    fn is_button_held(&self, button: MouseButton) -> bool;

    /// Pointer movement in pixels since the previous tick.
    fn pointer_delta(&self) -> Vec2;

    /// Vertical wheel movement for this tick; zero when the wheel is idle.
    fn wheel_delta(&self) -> f32;
}

/// State of the keyboard and mouse at a given moment.
///
/// The host is responsible for driving this structure, either by forwarding
/// `winit` window events to [`handle_window_event`] or by calling the update
/// helpers directly, and for calling [`end_frame`] once the tick has been
/// processed.
///
/// [`handle_window_event`]: InputState::handle_window_event
/// [`end_frame`]: InputState::end_frame
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
    mouse_pos: Option<(f64, f64)>,
    /// movement accumulated since the last `end_frame`
    mouse_delta: Vec2,
    wheel_delta: f32,
}

impl InputState {
    /// Creates a fresh, empty input state.
    pub fn new() -> Self {
        Default::default()
    }

    /// Called by the event loop when a keyboard event arrives.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Called by the event loop when a mouse button event arrives.
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    /// Releases every key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys_down.clear();
        self.mouse_buttons.clear();
    }

    /// Update the current mouse cursor position (window coordinates).
    ///
    /// The first position ever reported only seeds the cursor; it produces
    /// no movement.
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        if let Some((px, py)) = self.mouse_pos {
            self.mouse_delta += Vec2::new((x - px) as f32, (y - py) as f32);
        }
        self.mouse_pos = Some((x, y));
    }

    /// Add raw pointer motion in pixels without moving the cursor.
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Retrieve the last recorded mouse position.
    pub fn mouse_position(&self) -> Option<(f64, f64)> {
        self.mouse_pos
    }

    /// Accumulate vertical wheel movement, in lines.
    pub fn add_wheel_delta(&mut self, dy: f32) {
        self.wheel_delta += dy;
    }

    /// Clear the per-tick deltas.  Held keys and buttons are kept.
    pub fn end_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.wheel_delta = 0.0;
    }

    /// Feed one `winit` window event into the state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.update_key(code, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.update_mouse_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_mouse_position(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.add_wheel_delta(*y),
                MouseScrollDelta::PixelDelta(p) => self.add_wheel_delta(p.y as f32),
            },
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }
}

impl InputSource for InputState {
    fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_button_held(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    fn pointer_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    fn wheel_delta(&self) -> f32 {
        self.wheel_delta
    }
}

// simple unit tests for the input state implementation
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_key_held(KeyCode::KeyW));
        state.update_key(KeyCode::KeyW, true);
        assert!(state.is_key_held(KeyCode::KeyW));
        state.update_key(KeyCode::KeyW, false);
        assert!(!state.is_key_held(KeyCode::KeyW));
    }

    #[test]
    fn mouse_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_button_held(MouseButton::Left));
        state.update_mouse_button(MouseButton::Left, true);
        assert!(state.is_button_held(MouseButton::Left));
        state.update_mouse_button(MouseButton::Left, false);
        assert!(!state.is_button_held(MouseButton::Left));

        // the first position only seeds the cursor
        state.set_mouse_position(10.0, 20.0);
        assert_eq!(state.mouse_position(), Some((10.0, 20.0)));
        assert_eq!(state.pointer_delta(), Vec2::ZERO);

        // movement accumulates within a frame
        state.set_mouse_position(15.0, 25.0);
        state.set_mouse_position(17.0, 24.0);
        assert_eq!(state.pointer_delta(), Vec2::new(7.0, 4.0));
    }

    #[test]
    fn end_frame_clears_deltas_only() {
        let mut state = InputState::new();
        state.update_key(KeyCode::AltLeft, true);
        state.add_mouse_motion(3.0, -2.0);
        state.add_wheel_delta(1.0);
        state.add_wheel_delta(0.5);
        assert_eq!(state.wheel_delta(), 1.5);

        state.end_frame();
        assert_eq!(state.pointer_delta(), Vec2::ZERO);
        assert_eq!(state.wheel_delta(), 0.0);
        assert!(state.is_key_held(KeyCode::AltLeft));
    }

    #[test]
    fn release_all_drops_held_state() {
        let mut state = InputState::new();
        state.update_key(KeyCode::KeyS, true);
        state.update_mouse_button(MouseButton::Left, true);
        state.release_all();
        assert!(!state.is_key_held(KeyCode::KeyS));
        assert!(!state.is_button_held(MouseButton::Left));
    }
}
