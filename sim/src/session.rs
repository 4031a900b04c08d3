//! All simulation state of one running playground.

use marble_core::input::MoveIntent;
use marble_core::math::{QUAT_IDENTITY, Vec3};
use marble_core::profile_scope;

use crate::config::PlaygroundConfig;
use crate::error::SimError;
use crate::factory::{BodyFactory, SpawnedBody};
use crate::physics::{BodyDesc, PhysicsWorld, ShapeDesc};
use crate::registry::{InteractiveRegistry, RigidBodyRegistry};
use crate::scene::{NodeId, Renderable, SceneGraph};
use crate::textures::TextureHandle;
use crate::translator;

/// Name given to the controlled ball's scene node.
pub const CONTROLLED_NODE_NAME: &str = "ball";

/// Farthest distance a pointer ray is followed, in world units.
pub const PICK_DISTANCE: f32 = 500.0;

/// Physics world, scene graph, registries and the controlled ball.
///
/// Owned by the frame scheduler once running; tests and layout code drive
/// it directly.
pub struct Session {
    config: PlaygroundConfig,
    world: PhysicsWorld,
    scene: SceneGraph,
    bodies: RigidBodyRegistry,
    interactive: InteractiveRegistry,
    controlled: Option<SpawnedBody>,
    controlled_texture: Option<TextureHandle>,
    respawns: u32,
}

impl Session {
    /// Validates `config` and creates an empty world with its gravity.
    pub fn new(config: PlaygroundConfig) -> Result<Self, SimError> {
        config.validate()?;
        let world = PhysicsWorld::with_timestep(config.gravity(), config.fixed_timestep);
        Ok(Self {
            config,
            world,
            scene: SceneGraph::new(),
            bodies: RigidBodyRegistry::new(),
            interactive: InteractiveRegistry::new(),
            controlled: None,
            controlled_texture: None,
            respawns: 0,
        })
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Decorative nodes without a body are added through here.
    pub(crate) fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn bodies(&self) -> &RigidBodyRegistry {
        &self.bodies
    }

    pub fn interactive(&self) -> &InteractiveRegistry {
        &self.interactive
    }

    /// Factory writing into this session.
    pub fn factory(&mut self) -> BodyFactory<'_> {
        BodyFactory {
            world: &mut self.world,
            scene: &mut self.scene,
            bodies: &mut self.bodies,
            interactive: &mut self.interactive,
            config: &self.config,
        }
    }

    /// Texture applied to the ball on every (re)spawn.
    pub fn set_controlled_texture(&mut self, texture: Option<TextureHandle>) {
        self.controlled_texture = texture;
    }

    pub fn controlled(&self) -> Option<SpawnedBody> {
        self.controlled
    }

    /// Number of times the ball was recreated after falling out.
    pub fn respawn_count(&self) -> u32 {
        self.respawns
    }

    /// Creates the controlled ball at the spawn point, replacing any
    /// existing one so there is never more than one.
    pub fn spawn_controlled(&mut self) -> Result<SpawnedBody, SimError> {
        if self.controlled.is_some() {
            self.despawn_controlled();
        }

        let ball = &self.config.ball;
        let mut renderable = Renderable::sphere(CONTROLLED_NODE_NAME, ball.radius)
            .with_translation(self.config.ball_spawn())
            .with_rotation(QUAT_IDENTITY)
            .casting_shadow();
        renderable.texture = self.controlled_texture;

        let desc = BodyDesc::dynamic(ball.mass)
            .with_friction(ball.friction)
            .with_rolling_friction(ball.rolling_friction)
            .never_deactivate();
        let shape = ShapeDesc::ball(ball.radius);

        let spawned = self.factory().create_body(renderable, shape, desc)?;
        self.controlled = Some(spawned);
        Ok(spawned)
    }

    fn despawn_controlled(&mut self) {
        if let Some(old) = self.controlled.take() {
            self.despawn(old);
        }
    }

    /// Removes a pair from the scene graph, the registry and the world.
    ///
    /// Returns `true` if anything was removed.
    pub fn despawn(&mut self, spawned: SpawnedBody) -> bool {
        let node = self.scene.remove(spawned.node).is_some();
        let pair = self.bodies.remove_by_node(spawned.node).is_some();
        let body = self.world.remove_body(spawned.body);
        if self.controlled == Some(spawned) {
            self.controlled = None;
        }
        node || pair || body
    }

    /// Current position of the ball's renderable.
    pub fn controlled_position(&self) -> Option<Vec3> {
        let controlled = self.controlled?;
        self.scene
            .get(controlled.node)
            .map(|n| n.transform.translation)
    }

    /// Translates `intent` and overrides the ball's velocity.
    ///
    /// Height is read from the renderable, i.e. the pose synced at the end
    /// of the previous frame. Returns the command issued, if any.
    pub fn apply_intent(&mut self, intent: &MoveIntent) -> Option<Vec3> {
        let controlled = self.controlled?;
        let height = self.scene.get(controlled.node)?.transform.translation.y;
        let velocity = translator::translate(intent, height, &self.config.control)?;
        if self.world.set_linear_velocity(controlled.body, velocity) {
            log::trace!("Ball velocity set to {velocity:?}");
            Some(velocity)
        } else {
            None
        }
    }

    /// Resolves a pointer ray to the renderable it hits first and that
    /// renderable's navigation target.
    ///
    /// `None` if nothing is hit or the first hit is not interactive; the
    /// target is empty for hover-only objects.
    pub fn pick(&self, origin: Vec3, direction: Vec3) -> Option<(NodeId, &str)> {
        let (body, _) = self.world.cast_ray(origin, direction, PICK_DISTANCE)?;
        let node = self.bodies.node_of(body)?;
        let target = self.interactive.navigation_target(node)?;
        log::debug!("Picked {:?} -> '{target}'", node);
        Some((node, target))
    }

    /// Steps physics with the configured sub-step bound.
    pub fn step_physics(&mut self, delta_time: f32) -> u32 {
        self.world.step(delta_time, self.config.max_sub_steps)
    }

    /// Copies every dynamic body's pose onto its renderable.
    ///
    /// Pairs whose body or node is missing are skipped. Returns the number
    /// of renderables written.
    pub fn sync_transforms(&mut self) -> usize {
        profile_scope!("sync_transforms");
        let mut synced = 0;
        for pair in self.bodies.dynamic_pairs() {
            let pose = self.world.body_pose(pair.body);
            match (pose, self.scene.get_mut(pair.node)) {
                (Some(pose), Some(node)) => {
                    node.transform.translation = pose.translation;
                    node.transform.rotation = pose.rotation;
                    synced += 1;
                }
                _ => log::trace!("Skipping sync of {:?}: body or node missing", pair.node),
            }
        }
        synced
    }

    /// Respawns the ball if it fell below the fall-out height.
    ///
    /// A missing ball is recreated too. Returns `true` on respawn.
    pub fn recover_out_of_bounds(&mut self) -> Result<bool, SimError> {
        let fell = match self.controlled_position() {
            Some(position) => position.y < self.config.fall_out_height,
            None => true,
        };
        if !fell {
            return Ok(false);
        }

        log::info!(
            "Ball left the playground (below {}), respawning",
            self.config.fall_out_height
        );
        self.spawn_controlled()?;
        self.respawns += 1;
        Ok(true)
    }
}
