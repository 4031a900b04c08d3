//! Playground tuning constants.
//!
//! Every number the frame loop depends on lives in [`PlaygroundConfig`] with
//! its unit documented. Defaults reproduce the shipped playground; a RON file
//! may override any subset of fields.
//!
//! ```ron
//! (
//!     gravity: (0.0, -30.0, 0.0),
//!     ball: (mass: 5.0),
//! )
//! ```

use std::path::Path;

use marble_core::math::{Vec3, vec3_from_array};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Session-wide physics and control tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// World gravity in units/s². Fixed for the lifetime of a session.
    pub gravity: [f32; 3],
    /// Internal physics timestep in seconds.
    pub fixed_timestep: f32,
    /// Upper bound on physics sub-steps per frame. Time owed beyond it is dropped.
    pub max_sub_steps: u32,
    /// Collision margin added around every shape, in world units.
    pub collision_margin: f32,
    /// Friction coefficient of static scenery.
    pub static_friction: f32,
    /// Rolling friction coefficient of static scenery.
    pub static_rolling_friction: f32,
    /// Height (world units) below which the controlled body is respawned.
    pub fall_out_height: f32,
    /// Seconds added to the session clock before it drives decorations.
    pub decoration_time_offset: f32,
    pub ball: BallConfig,
    pub control: ControlConfig,
}

/// The controlled ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Sphere radius in world units.
    pub radius: f32,
    /// Mass in kilograms.
    pub mass: f32,
    /// Spawn position; orientation is always identity.
    pub spawn: [f32; 3],
    pub friction: f32,
    pub rolling_friction: f32,
    /// Texture requested from the texture source at layout time.
    pub texture: Option<String>,
}

/// Input-to-velocity translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Multiplier from intent (unitless, per axis in `[-1, 1]`) to units/s.
    pub velocity_scale: f32,
    /// Below this body height the ball counts as grounded.
    pub grounded_height: f32,
    /// Vertical intent while airborne (before scaling).
    pub airborne_bias: f32,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -50.0, 0.0],
            fixed_timestep: 1.0 / 60.0,
            max_sub_steps: 10,
            collision_margin: 0.05,
            static_friction: 10.0,
            static_rolling_friction: 10.0,
            fall_out_height: -50.0,
            decoration_time_offset: 150.0,
            ball: BallConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            mass: 3.0,
            spawn: [0.0, 0.0, 50.0],
            friction: 0.5,
            rolling_friction: 10.0,
            texture: Some("assets/bitcoin.png".to_string()),
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            velocity_scale: 20.0,
            grounded_height: 2.01,
            airborne_bias: -0.25,
        }
    }
}

impl PlaygroundConfig {
    /// Parse a config from RON text. Missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, SimError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        log::info!("Loaded playground config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty RON, e.g. to dump the effective settings.
    pub fn to_ron_string(&self) -> Result<String, SimError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SimError::Config(e.to_string()))
    }

    /// Reject values the physics world cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(SimError::Config(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.max_sub_steps == 0 {
            return Err(SimError::Config("max_sub_steps must be at least 1".into()));
        }
        if !(self.collision_margin.is_finite() && self.collision_margin >= 0.0) {
            return Err(SimError::Config(format!(
                "collision_margin must be non-negative, got {}",
                self.collision_margin
            )));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(SimError::Config("gravity must be finite".into()));
        }
        if !(self.ball.radius.is_finite() && self.ball.radius > 0.0) {
            return Err(SimError::InvalidShape(format!(
                "ball radius must be positive, got {}",
                self.ball.radius
            )));
        }
        if !(self.ball.mass.is_finite() && self.ball.mass > 0.0) {
            return Err(SimError::InvalidMass(self.ball.mass));
        }
        if self.fall_out_height.is_nan() {
            return Err(SimError::Config("fall_out_height must be a number".into()));
        }
        Ok(())
    }

    pub fn gravity(&self) -> Vec3 {
        vec3_from_array(self.gravity)
    }

    pub fn ball_spawn(&self) -> Vec3 {
        vec3_from_array(self.ball.spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_playground() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.gravity(), Vec3::new(0.0, -50.0, 0.0));
        assert_eq!(config.max_sub_steps, 10);
        assert_eq!(config.ball.mass, 3.0);
        assert_eq!(config.ball_spawn(), Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(config.control.velocity_scale, 20.0);
        assert_eq!(config.control.grounded_height, 2.01);
        assert_eq!(config.fall_out_height, -50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config =
            PlaygroundConfig::from_ron_str("(gravity: (0.0, -30.0, 0.0), ball: (mass: 5.0))")
                .unwrap();
        assert_eq!(config.gravity[1], -30.0);
        assert_eq!(config.ball.mass, 5.0);
        assert_eq!(config.ball.radius, 2.0);
        assert_eq!(config.max_sub_steps, 10);
    }

    #[test]
    fn ron_roundtrip() {
        let config = PlaygroundConfig::default();
        let text = config.to_ron_string().unwrap();
        assert_eq!(PlaygroundConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn malformed_ron_is_config_error() {
        let err = PlaygroundConfig::from_ron_str("(gravity: oops)").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn rejects_zero_mass_ball() {
        let err = PlaygroundConfig::from_ron_str("(ball: (mass: 0.0))").unwrap_err();
        assert!(matches!(err, SimError::InvalidMass(m) if m == 0.0));
    }

    #[test]
    fn rejects_zero_sub_steps() {
        let err = PlaygroundConfig::from_ron_str("(max_sub_steps: 0)").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = PlaygroundConfig::load("/nonexistent/marble.ron").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
