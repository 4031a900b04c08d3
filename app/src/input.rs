//! Input conversion utilities.
//!
//! Maps winit key codes to platform-agnostic
//! [`marble_core::input::KeyCode`] values and folds key presses into the
//! movement intent the frame loop reads.

use marble_core::input::{KeyCode, MoveIntent};
use winit::keyboard;

/// Convert a winit [`keyboard::KeyCode`] to a [`KeyCode`], if a mapping exists.
pub fn map_winit_key(key: keyboard::KeyCode) -> Option<KeyCode> {
    Some(match key {
        keyboard::KeyCode::KeyW => KeyCode::W,
        keyboard::KeyCode::KeyA => KeyCode::A,
        keyboard::KeyCode::KeyS => KeyCode::S,
        keyboard::KeyCode::KeyD => KeyCode::D,

        keyboard::KeyCode::ArrowUp => KeyCode::ArrowUp,
        keyboard::KeyCode::ArrowDown => KeyCode::ArrowDown,
        keyboard::KeyCode::ArrowLeft => KeyCode::ArrowLeft,
        keyboard::KeyCode::ArrowRight => KeyCode::ArrowRight,

        keyboard::KeyCode::Space => KeyCode::Space,
        keyboard::KeyCode::Escape => KeyCode::Escape,

        _ => return None,
    })
}

/// Press sets the key's axis to 1, release sets it to 0.
///
/// Returns `true` if the key steers the ball.
pub fn apply_key(intent: &mut MoveIntent, key: KeyCode, pressed: bool) -> bool {
    match key.move_axis() {
        Some(axis) => {
            intent.set_axis(axis, if pressed { 1.0 } else { 0.0 });
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_steering_keys() {
        assert_eq!(map_winit_key(keyboard::KeyCode::KeyW), Some(KeyCode::W));
        assert_eq!(
            map_winit_key(keyboard::KeyCode::ArrowLeft),
            Some(KeyCode::ArrowLeft)
        );
        assert_eq!(map_winit_key(keyboard::KeyCode::KeyQ), None);
    }

    #[test]
    fn press_and_release() {
        let mut intent = MoveIntent::IDLE;
        assert!(apply_key(&mut intent, KeyCode::ArrowUp, true));
        assert!(apply_key(&mut intent, KeyCode::D, true));
        assert_eq!(intent, MoveIntent::new(1.0, 0.0, 0.0, 1.0));

        assert!(apply_key(&mut intent, KeyCode::W, false));
        assert_eq!(intent.forward, 0.0);
        assert_eq!(intent.right, 1.0);

        assert!(!apply_key(&mut intent, KeyCode::Space, true));
    }
}
