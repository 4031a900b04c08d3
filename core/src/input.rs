//! Platform-agnostic input types.
//!
//! [`KeyCode`] names the physical keys the playground listens to, without
//! depending on any windowing crate. [`MoveIntent`] is the normalized
//! movement vector every input device (keyboard, touch joystick) is reduced
//! to before the frame loop reads it.

use serde::{Deserialize, Serialize};

/// Physical keyboard key identifier.
///
/// Platform layers (e.g. winit) map their native key codes to this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyCode {
    W,
    A,
    S,
    D,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Space,
    Escape,
}

/// Movement direction a key contributes to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAxis {
    Forward,
    Back,
    Left,
    Right,
}

impl KeyCode {
    /// Arrow keys and WASD steer the ball.
    pub fn move_axis(self) -> Option<MoveAxis> {
        match self {
            KeyCode::W | KeyCode::ArrowUp => Some(MoveAxis::Forward),
            KeyCode::S | KeyCode::ArrowDown => Some(MoveAxis::Back),
            KeyCode::A | KeyCode::ArrowLeft => Some(MoveAxis::Left),
            KeyCode::D | KeyCode::ArrowRight => Some(MoveAxis::Right),
            _ => None,
        }
    }
}

/// Normalized movement intent. Every axis is kept in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: f32,
    pub back: f32,
    pub left: f32,
    pub right: f32,
}

impl MoveIntent {
    /// No movement on any axis.
    pub const IDLE: Self = Self {
        forward: 0.0,
        back: 0.0,
        left: 0.0,
        right: 0.0,
    };

    /// Build an intent, clamping every axis into `[0, 1]`.
    ///
    /// NaN inputs clamp to zero.
    pub fn new(forward: f32, back: f32, left: f32, right: f32) -> Self {
        Self {
            forward: clamp_axis(forward),
            back: clamp_axis(back),
            left: clamp_axis(left),
            right: clamp_axis(right),
        }
    }

    /// Set a single axis, clamped.
    pub fn set_axis(&mut self, axis: MoveAxis, value: f32) {
        let value = clamp_axis(value);
        match axis {
            MoveAxis::Forward => self.forward = value,
            MoveAxis::Back => self.back = value,
            MoveAxis::Left => self.left = value,
            MoveAxis::Right => self.right = value,
        }
    }

    /// Zero every axis.
    pub fn clear(&mut self) {
        *self = Self::IDLE;
    }

    /// Returns `true` when no axis is active.
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    /// Re-clamp every axis. Collaborators may write the fields directly.
    pub fn clamped(self) -> Self {
        Self::new(self.forward, self.back, self.left, self.right)
    }
}

fn clamp_axis(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_axes() {
        let intent = MoveIntent::new(2.0, -1.0, 0.5, f32::NAN);
        assert_eq!(intent.forward, 1.0);
        assert_eq!(intent.back, 0.0);
        assert_eq!(intent.left, 0.5);
        assert_eq!(intent.right, 0.0);
    }

    #[test]
    fn set_axis_and_clear() {
        let mut intent = MoveIntent::default();
        intent.set_axis(MoveAxis::Right, 1.0);
        assert!(!intent.is_idle());
        assert_eq!(intent.right, 1.0);

        intent.clear();
        assert!(intent.is_idle());
    }

    #[test]
    fn arrows_and_wasd_map_to_same_axes() {
        assert_eq!(KeyCode::ArrowUp.move_axis(), KeyCode::W.move_axis());
        assert_eq!(KeyCode::ArrowDown.move_axis(), Some(MoveAxis::Back));
        assert_eq!(KeyCode::A.move_axis(), Some(MoveAxis::Left));
        assert_eq!(KeyCode::ArrowRight.move_axis(), Some(MoveAxis::Right));
        assert_eq!(KeyCode::Space.move_axis(), None);
    }

    #[test]
    fn clamped_repairs_direct_writes() {
        let raw = MoveIntent {
            forward: 3.0,
            ..MoveIntent::default()
        };
        assert_eq!(raw.clamped().forward, 1.0);
    }
}
