//! Body factory: builds a renderable, its rigid body and collider, and
//! registers the pair in one call.

use crate::config::PlaygroundConfig;
use crate::error::SimError;
use crate::physics::rapier3d::prelude::RigidBodyHandle;
use crate::physics::{BodyDesc, PhysicsWorld, ShapeDesc};
use crate::registry::{BodyRenderablePair, InteractiveRegistry, Motion, RigidBodyRegistry};
use crate::scene::{NodeId, Renderable, SceneGraph};

/// What the factory created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedBody {
    pub node: NodeId,
    pub body: RigidBodyHandle,
}

/// Borrowed view over the session parts a body touches.
///
/// Obtain one with [`Session::factory`](crate::Session::factory).
pub struct BodyFactory<'a> {
    pub(crate) world: &'a mut PhysicsWorld,
    pub(crate) scene: &'a mut SceneGraph,
    pub(crate) bodies: &'a mut RigidBodyRegistry,
    pub(crate) interactive: &'a mut InteractiveRegistry,
    pub(crate) config: &'a PlaygroundConfig,
}

impl BodyFactory<'_> {
    /// Static scenery with the session's friction and rolling friction.
    ///
    /// The body is placed at the renderable's transform; the renderable is
    /// never touched again by the frame loop.
    pub fn create_static_body(
        &mut self,
        renderable: Renderable,
        shape: ShapeDesc,
    ) -> Result<SpawnedBody, SimError> {
        let desc = self.static_desc();
        self.create_body(renderable, shape, desc)
    }

    /// Static scenery that is also pickable. `target` may be empty for
    /// hover-only objects.
    pub fn create_interactive_static_body(
        &mut self,
        renderable: Renderable,
        shape: ShapeDesc,
        target: impl Into<String>,
    ) -> Result<SpawnedBody, SimError> {
        let spawned = self.create_static_body(renderable, shape)?;
        self.interactive.push(spawned.node, target);
        Ok(spawned)
    }

    /// A free-moving body of the given mass.
    pub fn create_dynamic_body(
        &mut self,
        renderable: Renderable,
        shape: ShapeDesc,
        mass: f32,
    ) -> Result<SpawnedBody, SimError> {
        self.create_body(renderable, shape, BodyDesc::dynamic(mass))
    }

    /// Materializes `desc` + `shape` at the renderable's transform and
    /// registers the pair. Nothing is inserted if validation fails.
    pub fn create_body(
        &mut self,
        renderable: Renderable,
        shape: ShapeDesc,
        desc: BodyDesc,
    ) -> Result<SpawnedBody, SimError> {
        let transform = renderable.transform;
        let body = desc.to_rigid_body(transform.translation, transform.rotation)?;
        let collider = shape.to_collider(&desc, self.config.collision_margin)?;

        let name = renderable.name.clone();
        let node = self.scene.add(renderable);
        let handle = self.world.add_body(body, collider);
        let motion = if desc.is_dynamic() {
            Motion::Dynamic
        } else {
            Motion::Static
        };
        self.bodies.insert(BodyRenderablePair {
            node,
            body: handle,
            motion,
        });

        log::debug!(
            "Created {motion:?} body '{name}' at ({}, {}, {})",
            transform.translation.x,
            transform.translation.y,
            transform.translation.z
        );
        Ok(SpawnedBody { node, body: handle })
    }

    fn static_desc(&self) -> BodyDesc {
        BodyDesc::fixed()
            .with_friction(self.config.static_friction)
            .with_rolling_friction(self.config.static_rolling_friction)
    }
}
