//! The rigid-body world of one playground session.
//!
//! Uses rapier3d (f64 by default, f32 with the `f32` feature).

use marble_core::math::{Quat, Real, Vec3};
use marble_core::{profile_plot, profile_scope};

use super::conversions::{isometry3_from_na, vec3_from_na, vec3_to_na};
use super::rapier3d::prelude::*;

/// Fixed internal timestep used when none is configured.
pub const DEFAULT_FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Position and orientation of a body, in scene precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

/// All rapier state for a session.
///
/// Gravity is fixed at creation. Time advances only through [`step`], which
/// runs whole fixed-size sub-steps out of an accumulator.
///
/// [`step`]: PhysicsWorld::step
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    accumulator: Real,
    total_sub_steps: u64,
}

impl PhysicsWorld {
    /// Creates a world with the given gravity and the default 1/60 s timestep.
    pub fn initialize(gravity: Vec3) -> Self {
        Self::with_timestep(gravity, DEFAULT_FIXED_TIMESTEP)
    }

    /// Creates a world with the given gravity and internal timestep (seconds).
    pub fn with_timestep(gravity: Vec3, fixed_timestep: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = fixed_timestep as Real;
        log::debug!(
            "Physics world created: gravity ({}, {}, {}), timestep {fixed_timestep}s",
            gravity.x,
            gravity.y,
            gravity.z
        );
        Self {
            gravity: vec3_to_na(gravity),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            accumulator: 0.0,
            total_sub_steps: 0,
        }
    }

    pub fn gravity(&self) -> Vec3 {
        vec3_from_na(&self.gravity)
    }

    /// Internal timestep in seconds.
    pub fn fixed_timestep(&self) -> f32 {
        self.integration_parameters.dt as f32
    }

    /// Adds a body with its single collider and returns the body handle.
    pub fn add_body(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Removes a body together with its colliders.
    ///
    /// Returns `false` if the handle was not in the world.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Advances the simulation by `delta_time` seconds.
    ///
    /// Whole fixed timesteps are taken out of an accumulator, at most
    /// `max_sub_steps` of them; time owed beyond the clamp is discarded.
    /// With `max_sub_steps == 0` a single variable step of `delta_time` is
    /// taken instead. Returns the number of sub-steps run.
    pub fn step(&mut self, delta_time: f32, max_sub_steps: u32) -> u32 {
        profile_scope!("rapier3d: step");

        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Ignoring invalid physics delta time {delta_time}");
            return 0;
        }

        if max_sub_steps == 0 {
            if delta_time == 0.0 {
                return 0;
            }
            let fixed = self.integration_parameters.dt;
            self.integration_parameters.dt = delta_time as Real;
            self.step_once();
            self.integration_parameters.dt = fixed;
            self.total_sub_steps += 1;
            return 1;
        }

        let fixed = self.integration_parameters.dt;
        self.accumulator += delta_time as Real;
        // Tolerance keeps a frame of exactly one timestep from rounding down.
        let due = (self.accumulator / fixed + 1e-4).floor();
        self.accumulator = (self.accumulator - due * fixed).max(0.0);

        let due = due as u64;
        let sub_steps = due.min(max_sub_steps as u64) as u32;
        if due > sub_steps as u64 {
            log::debug!(
                "Physics fell behind: dropped {} sub-steps",
                due - sub_steps as u64
            );
        }

        for _ in 0..sub_steps {
            self.step_once();
        }
        self.total_sub_steps += sub_steps as u64;
        profile_plot!("physics sub-steps", sub_steps);
        sub_steps
    }

    fn step_once(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Sub-steps run since creation.
    pub fn total_sub_steps(&self) -> u64 {
        self.total_sub_steps
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Current world pose of a body, `None` if it is gone.
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<Pose> {
        let body = self.bodies.get(handle)?;
        let (translation, rotation) = isometry3_from_na(body.position());
        Some(Pose {
            translation,
            rotation,
        })
    }

    /// Overrides a body's linear velocity and wakes it.
    ///
    /// Returns `false` if the body is gone.
    pub fn set_linear_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.set_linvel(vec3_to_na(velocity), true);
                true
            }
            None => false,
        }
    }

    pub fn linear_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| vec3_from_na(b.linvel()))
    }

    pub fn is_dynamic(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|b| b.is_dynamic())
    }

    pub fn is_sleeping(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|b| b.is_sleeping())
    }

    /// First body hit by a ray and the hit distance in units of `direction`.
    ///
    /// Queries the collider layout of the last sub-step; bodies added since
    /// are not seen until the next step.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<(RigidBodyHandle, f32)> {
        let ray = Ray::new(vec3_to_na(origin).into(), vec3_to_na(direction));
        let (collider, toi) = self.query_pipeline.cast_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance as Real,
            true,
            QueryFilter::default(),
        )?;
        let body = self.colliders.get(collider)?.parent()?;
        Some((body, toi as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyDesc, ShapeDesc};
    use marble_core::math::QUAT_IDENTITY;

    fn add_ball(world: &mut PhysicsWorld, at: Vec3) -> RigidBodyHandle {
        let desc = BodyDesc::dynamic(3.0);
        let body = desc.to_rigid_body(at, QUAT_IDENTITY).unwrap();
        let collider = ShapeDesc::ball(2.0).to_collider(&desc, 0.05).unwrap();
        world.add_body(body, collider)
    }

    #[test]
    fn initialize_defaults() {
        let world = PhysicsWorld::initialize(Vec3::new(0.0, -50.0, 0.0));
        assert_eq!(world.gravity(), Vec3::new(0.0, -50.0, 0.0));
        assert!((world.fixed_timestep() - 1.0 / 60.0).abs() < 1e-7);
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn add_and_remove_body() {
        let mut world = PhysicsWorld::initialize(Vec3::new(0.0, -50.0, 0.0));
        let handle = add_ball(&mut world, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);
        assert!(world.is_dynamic(handle));

        assert!(world.remove_body(handle));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert!(!world.remove_body(handle));
        assert!(world.body_pose(handle).is_none());
    }

    #[test]
    fn step_moves_dynamic_body_down() {
        let mut world = PhysicsWorld::initialize(Vec3::new(0.0, -50.0, 0.0));
        let handle = add_ball(&mut world, Vec3::new(0.0, 10.0, 0.0));

        for _ in 0..10 {
            world.step(1.0 / 60.0, 10);
        }

        let pose = world.body_pose(handle).unwrap();
        assert!(pose.translation.y < 10.0, "body should fall, y = {}", pose.translation.y);
    }

    #[test]
    fn ray_hits_nearest_body_after_step() {
        let mut world = PhysicsWorld::initialize(Vec3::zeros());
        let near = add_ball(&mut world, Vec3::new(0.0, 0.0, -10.0));
        let far = add_ball(&mut world, Vec3::new(0.0, 0.0, -30.0));
        world.step(1.0 / 60.0, 10);

        let (hit, distance) = world
            .cast_ray(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 100.0)
            .unwrap();
        assert_eq!(hit, near);
        assert_ne!(hit, far);
        assert!((distance - 8.0).abs() < 1e-3, "distance = {distance}");

        assert!(world
            .cast_ray(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0), 100.0)
            .is_none());
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut world = PhysicsWorld::initialize(Vec3::new(0.0, -50.0, 0.0));
        assert_eq!(world.step(5.0, 10), 10);
        // The surplus was discarded, not carried into the next frame.
        assert_eq!(world.step(0.0, 10), 0);
    }

    #[test]
    fn accumulates_partial_frames() {
        let mut world = PhysicsWorld::initialize(Vec3::zeros());
        assert_eq!(world.step(0.01, 10), 0);
        assert_eq!(world.step(0.01, 10), 1);
        assert_eq!(world.step(0.05, 10), 3);
        assert_eq!(world.total_sub_steps(), 4);
    }

    #[test]
    fn invalid_delta_is_ignored() {
        let mut world = PhysicsWorld::initialize(Vec3::zeros());
        assert_eq!(world.step(f32::NAN, 10), 0);
        assert_eq!(world.step(-1.0, 10), 0);
        assert_eq!(world.step(f32::INFINITY, 10), 0);
        assert_eq!(world.total_sub_steps(), 0);
    }

    #[test]
    fn zero_max_sub_steps_takes_variable_step() {
        let mut world = PhysicsWorld::initialize(Vec3::zeros());
        assert_eq!(world.step(0.2, 0), 1);
        assert!((world.fixed_timestep() - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn velocity_override() {
        let mut world = PhysicsWorld::initialize(Vec3::zeros());
        let handle = add_ball(&mut world, Vec3::zeros());
        assert!(world.set_linear_velocity(handle, Vec3::new(20.0, 0.0, -20.0)));
        let v = world.linear_velocity(handle).unwrap();
        assert!((v - Vec3::new(20.0, 0.0, -20.0)).norm() < 1e-5);

        world.remove_body(handle);
        assert!(!world.set_linear_velocity(handle, Vec3::zeros()));
    }
}
