//! Rigid body and collision shape descriptors.
//!
//! A [`BodyDesc`] plus a [`ShapeDesc`] describe everything the body factory
//! needs; [`BodyDesc::to_rigid_body`] and [`ShapeDesc::to_collider`]
//! materialize them into rapier objects.

use marble_core::math::{Quat, Real, Vec3};

use super::conversions::isometry3_to_na;
use super::rapier3d::prelude::*;
use crate::error::SimError;

/// Collision shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDesc {
    /// Sphere defined by radius.
    Ball { radius: f32 },
    /// Box defined by half extents along each axis.
    Cuboid { half_extents: Vec3 },
}

impl ShapeDesc {
    pub fn ball(radius: f32) -> Self {
        ShapeDesc::Ball { radius }
    }

    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        ShapeDesc::Cuboid {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    /// Box from its full edge lengths, the way scene meshes are sized.
    pub fn cuboid_from_size(size: Vec3) -> Self {
        Self::cuboid(size.x * 0.5, size.y * 0.5, size.z * 0.5)
    }

    /// Every extent must be positive and finite.
    pub fn validate(&self) -> Result<(), SimError> {
        match *self {
            ShapeDesc::Ball { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(SimError::InvalidShape(format!(
                        "ball radius must be positive, got {radius}"
                    )));
                }
            }
            ShapeDesc::Cuboid { half_extents: h } => {
                if !h.iter().all(|e| e.is_finite() && *e > 0.0) {
                    return Err(SimError::InvalidShape(format!(
                        "cuboid half extents must be positive, got ({}, {}, {})",
                        h.x, h.y, h.z
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the rapier collider for this shape.
    ///
    /// Boxes get a rounded border of `margin` around a core shrunk by the
    /// same amount, so the outer surface keeps the nominal extents. A ball is
    /// already round and keeps its radius.
    pub fn to_collider(&self, body: &BodyDesc, margin: f32) -> Result<Collider, SimError> {
        self.validate()?;
        let builder = match *self {
            ShapeDesc::Ball { radius } => ColliderBuilder::ball(radius as Real),
            ShapeDesc::Cuboid { half_extents: h } => {
                let border = margin.max(0.0).min(h.min());
                ColliderBuilder::round_cuboid(
                    (h.x - border) as Real,
                    (h.y - border) as Real,
                    (h.z - border) as Real,
                    border as Real,
                )
            }
        };

        let builder = builder
            .friction(body.friction as Real)
            .friction_combine_rule(CoefficientCombineRule::Multiply);

        let builder = match body.kind {
            BodyKind::Dynamic => builder.mass(body.mass as Real),
            BodyKind::Fixed => builder,
        };

        Ok(builder.build())
    }
}

/// Rigid body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Infinite mass, never moves.
    #[default]
    Fixed,
    /// Finite mass, moved by the solver.
    Dynamic,
}

/// Whether the solver may put the body to sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Normal,
    NeverDeactivate,
}

/// Describes a rigid body's type and physical properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    /// Zero for fixed bodies.
    pub mass: f32,
    pub friction: f32,
    /// Applied as angular damping on dynamic bodies.
    pub rolling_friction: f32,
    pub activation: Activation,
}

impl BodyDesc {
    pub fn fixed() -> Self {
        Self::default()
    }

    pub fn dynamic(mass: f32) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            mass,
            ..Self::default()
        }
    }

    pub fn with_friction(mut self, v: f32) -> Self {
        self.friction = v;
        self
    }

    pub fn with_rolling_friction(mut self, v: f32) -> Self {
        self.rolling_friction = v;
        self
    }

    pub fn never_deactivate(mut self) -> Self {
        self.activation = Activation::NeverDeactivate;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Dynamic bodies need a positive finite mass.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.is_dynamic() && !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::InvalidMass(self.mass));
        }
        Ok(())
    }

    /// Build the rapier rigid body placed at `translation` / `rotation`.
    pub fn to_rigid_body(&self, translation: Vec3, rotation: Quat) -> Result<RigidBody, SimError> {
        self.validate()?;
        let builder = match self.kind {
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => {
                RigidBodyBuilder::dynamic().angular_damping(self.rolling_friction.max(0.0) as Real)
            }
        };

        Ok(builder
            .position(isometry3_to_na(translation, rotation))
            .can_sleep(self.activation == Activation::Normal)
            .build())
    }
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            kind: BodyKind::Fixed,
            mass: 0.0,
            friction: 0.5,
            rolling_friction: 0.0,
            activation: Activation::Normal,
        }
    }
}
