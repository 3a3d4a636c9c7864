use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for the window.
///
/// Answers "is this key held right now", as of the last event pump.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release events are not delivered to unfocused windows.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_release() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::key(Key::CapsLock, KeyState::Pressed));
        assert!(s.key_down(Key::CapsLock));
        s.apply_event(&InputEvent::key(Key::CapsLock, KeyState::Released));
        assert!(!s.key_down(Key::CapsLock));
    }

    #[test]
    fn repeat_keeps_key_down() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::key(Key::Escape, KeyState::Pressed));
        s.apply_event(&InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            code: 0,
            repeat: true,
        });
        assert!(s.key_down(Key::Escape));
        assert_eq!(s.keys_down.len(), 1);
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&InputEvent::key(Key::Q, KeyState::Pressed));
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(!s.key_down(Key::Q));
    }
}
