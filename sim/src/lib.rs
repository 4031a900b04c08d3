//! # Marble Sim
//!
//! The physics-synchronized frame loop of the marble playground.
//!
//! A [`FrameScheduler`] owns one [`Session`]: a rapier world, the scene graph
//! handed to the renderer, the registry pairing renderables with bodies, and
//! the controlled ball. Each display refresh calls [`FrameScheduler::tick`],
//! which turns input into a velocity, steps physics, copies body poses onto
//! renderables, respawns a fallen ball and renders.
//!
//! The host (window, headless runner, test) plugs in through [`FrameHost`].

pub mod config;
pub mod error;
pub mod factory;
pub mod physics;
pub mod playground;
pub mod registry;
pub mod scene;
pub mod scheduler;
pub mod session;
pub mod textures;
pub mod translator;
pub mod zones;

pub use config::{BallConfig, ControlConfig, PlaygroundConfig};
pub use error::SimError;
pub use factory::{BodyFactory, SpawnedBody};
pub use physics::{PhysicsWorld, Pose, rapier3d};
pub use playground::{LinkCatalog, PlaygroundSummary};
pub use registry::{BodyRenderablePair, InteractiveObject, InteractiveRegistry, RigidBodyRegistry};
pub use scene::{MeshShape, NodeId, Renderable, SceneGraph, Transform};
pub use scheduler::{BackendStatus, FrameHost, FrameReport, FrameScheduler, SchedulerState};
pub use session::Session;
pub use textures::{PlaceholderTextures, TextureHandle, TextureSource};
pub use zones::{CameraMode, CameraZones, Zone};

/// Sim library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the sim version once at startup.
pub fn init() {
    log::info!("Marble Sim v{} initialized", VERSION);
}
