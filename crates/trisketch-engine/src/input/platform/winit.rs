use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            let (key, code) = map_key(event.physical_key);

            Some(InputEvent::Key {
                key,
                state,
                code,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::CapsLock => Key::CapsLock,
                KeyCode::Enter => Key::Enter,
                KeyCode::Space => Key::Space,
                KeyCode::KeyQ => Key::Q,
                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        // NativeKeyCode has no stable numeric form in winit 0.30.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_lock_maps_to_named_key() {
        let (key, code) = map_key(PhysicalKey::Code(KeyCode::CapsLock));
        assert_eq!(key, Key::CapsLock);
        assert_eq!(code, KeyCode::CapsLock as u32);
    }

    #[test]
    fn unnamed_key_keeps_platform_code() {
        let (key, code) = map_key(PhysicalKey::Code(KeyCode::KeyZ));
        assert_eq!(key, Key::Unknown(KeyCode::KeyZ as u32));
        assert_eq!(code, KeyCode::KeyZ as u32);
    }

    #[test]
    fn focus_events_translate() {
        assert_eq!(
            translate_window_event(&WindowEvent::Focused(false)),
            Some(InputEvent::Focused(false))
        );
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested), None);
    }
}
