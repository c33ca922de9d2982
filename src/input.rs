//! Discrete input events and the horizontal movement flags they drive.

use macroquad::prelude::*;

/// Game actions bound to keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move left, bound to `A`.
    Left,
    /// Move right, bound to `D`.
    Right,
    /// Jump, bound to `W`.
    Jump,
}

impl Key {
    const BINDINGS: [(KeyCode, Key); 3] = [
        (KeyCode::A, Key::Left),
        (KeyCode::D, Key::Right),
        (KeyCode::W, Key::Jump),
    ];
}

/// One discrete input, in the order it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    /// Primary mouse button went down.
    Fire,
    /// A bound key went down.
    Pressed(Key),
    /// A bound key came up.
    Released(Key),
}

/// Held horizontal keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    /// Left is held.
    pub left: bool,
    /// Right is held.
    pub right: bool,
}

impl Movement {
    /// Right minus left: -1, 0 or 1.
    pub fn axis(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }

    /// Update the held flags from an event; other events are ignored.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(Key::Left) => self.left = true,
            InputEvent::Pressed(Key::Right) => self.right = true,
            InputEvent::Released(Key::Left) => self.left = false,
            InputEvent::Released(Key::Right) => self.right = false,
            _ => {}
        }
    }
}

/// Collect this frame's events from macroquad. Requires `prevent_quit()` to
/// have been called for window close to arrive as [`InputEvent::Quit`].
pub fn poll() -> Vec<InputEvent> {
    let mut events = Vec::new();
    if is_quit_requested() {
        events.push(InputEvent::Quit);
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        events.push(InputEvent::Fire);
    }
    for (code, key) in Key::BINDINGS {
        if is_key_pressed(code) {
            events.push(InputEvent::Pressed(key));
        }
        if is_key_released(code) {
            events.push(InputEvent::Released(key));
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_combines_held_keys() {
        let mut m = Movement::default();
        assert_eq!(m.axis(), 0.0);
        m.apply(InputEvent::Pressed(Key::Left));
        assert_eq!(m.axis(), -1.0);
        m.apply(InputEvent::Pressed(Key::Right));
        assert_eq!(m.axis(), 0.0);
        m.apply(InputEvent::Released(Key::Left));
        assert_eq!(m.axis(), 1.0);
    }

    #[test]
    fn non_movement_events_leave_flags_alone() {
        let mut m = Movement {
            left: true,
            right: false,
        };
        m.apply(InputEvent::Fire);
        m.apply(InputEvent::Pressed(Key::Jump));
        m.apply(InputEvent::Quit);
        assert_eq!(
            m,
            Movement {
                left: true,
                right: false
            }
        );
    }
}
