//! Input-to-velocity translation for the controlled body.

use marble_core::input::MoveIntent;
use marble_core::math::Vec3;

use crate::config::ControlConfig;

/// Turns a movement intent and the controlled body's height into a linear
/// velocity override.
///
/// `x = right - left`, `z = back - forward`; `y` is zero while grounded and
/// the airborne bias otherwise. The vector is scaled by the velocity scale.
/// A zero vector yields `None`: an idle ball on the ground is left to the
/// solver, while an idle ball in the air is still pushed down.
pub fn translate(intent: &MoveIntent, height: f32, control: &ControlConfig) -> Option<Vec3> {
    let intent = intent.clamped();
    let x = intent.right - intent.left;
    let z = intent.back - intent.forward;
    let y = if height < control.grounded_height {
        0.0
    } else {
        control.airborne_bias
    };

    let direction = Vec3::new(x, y, z);
    if direction == Vec3::zeros() {
        return None;
    }
    Some(direction * control.velocity_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn control() -> ControlConfig {
        ControlConfig::default()
    }

    #[rstest]
    #[case::forward_right_grounded(MoveIntent::new(1.0, 0.0, 0.0, 1.0), 1.0, Vec3::new(20.0, 0.0, -20.0))]
    #[case::back_grounded(MoveIntent::new(0.0, 1.0, 0.0, 0.0), 2.0, Vec3::new(0.0, 0.0, 20.0))]
    #[case::left_airborne(MoveIntent::new(0.0, 0.0, 1.0, 0.0), 5.0, Vec3::new(-20.0, -5.0, 0.0))]
    #[case::threshold_is_airborne(MoveIntent::new(1.0, 0.0, 0.0, 0.0), 2.01, Vec3::new(0.0, -5.0, -20.0))]
    #[case::half_joystick(MoveIntent::new(0.5, 0.0, 0.0, 0.0), 0.0, Vec3::new(0.0, 0.0, -10.0))]
    fn translates(#[case] intent: MoveIntent, #[case] height: f32, #[case] expected: Vec3) {
        let v = translate(&intent, height, &control()).unwrap();
        assert!((v - expected).norm() < 1e-5, "{v:?} != {expected:?}");
    }

    #[rstest]
    #[case::grounded(1.0, None)]
    #[case::just_below_threshold(2.0, None)]
    #[case::airborne(10.0, Some(Vec3::new(0.0, -5.0, 0.0)))]
    fn idle_intent_only_pushes_down_in_the_air(#[case] height: f32, #[case] expected: Option<Vec3>) {
        assert_eq!(translate(&MoveIntent::IDLE, height, &control()), expected);
    }

    #[test]
    fn opposing_axes_cancel_when_grounded() {
        let intent = MoveIntent::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(translate(&intent, 1.0, &control()), None);
    }

    #[test]
    fn out_of_range_intent_is_clamped() {
        let intent = MoveIntent {
            forward: 4.0,
            ..MoveIntent::IDLE
        };
        let v = translate(&intent, 1.0, &control()).unwrap();
        assert_eq!(v, Vec3::new(0.0, 0.0, -20.0));
    }
}
