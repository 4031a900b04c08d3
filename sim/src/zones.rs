//! Camera zones: floor regions that change how the camera follows the ball.

use marble_core::math::Vec3;
use serde::{Deserialize, Serialize};

/// How the camera frames the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Behind and above the ball.
    #[default]
    Follow,
    /// High above, looking down onto the title text.
    Overhead,
    /// Pulled back to frame the signboards.
    Showcase,
}

impl CameraMode {
    /// Camera position relative to the ball.
    pub fn offset(self) -> Vec3 {
        match self {
            CameraMode::Follow => Vec3::new(0.0, 30.0, 70.0),
            CameraMode::Overhead => Vec3::new(0.0, 60.0, 25.0),
            CameraMode::Showcase => Vec3::new(0.0, 20.0, 55.0),
        }
    }
}

/// Axis-aligned rectangle on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub mode: CameraMode,
}

impl Zone {
    pub fn contains(&self, position: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_z..=self.max_z).contains(&position.z)
    }
}

/// Tracks which zone the ball is in. The first matching zone wins; outside
/// every zone the mode is [`CameraMode::Follow`].
#[derive(Debug, Clone)]
pub struct CameraZones {
    zones: Vec<Zone>,
    active: CameraMode,
}

impl CameraZones {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            active: CameraMode::Follow,
        }
    }

    pub fn active(&self) -> CameraMode {
        self.active
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Mode for `position` without changing state.
    pub fn mode_at(&self, position: Vec3) -> CameraMode {
        self.zones
            .iter()
            .find(|z| z.contains(position))
            .map_or(CameraMode::Follow, |z| z.mode)
    }

    /// Updates the active mode. Returns the new mode only on a transition.
    pub fn update(&mut self, position: Vec3) -> Option<CameraMode> {
        let mode = self.mode_at(position);
        if mode == self.active {
            return None;
        }
        log::debug!("Camera zone changed: {:?} -> {:?}", self.active, mode);
        self.active = mode;
        Some(mode)
    }
}

impl Default for CameraZones {
    /// Title text area and the signboard row of the default playground.
    fn default() -> Self {
        Self::new(vec![
            Zone {
                min_x: -30.0,
                max_x: 30.0,
                min_z: -15.0,
                max_z: 5.0,
                mode: CameraMode::Overhead,
            },
            Zone {
                min_x: -87.5,
                max_x: 87.5,
                min_z: -87.5,
                max_z: -55.0,
                mode: CameraMode::Showcase,
            },
        ])
    }
}
