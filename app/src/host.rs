//! Frame hosts shared by the windowed and headless runners.

use std::time::{Duration, Instant};

use marble_core::input::MoveIntent;
use marble_core::math::Vec3;
use marble_sim::{CameraMode, CameraZones, FrameHost, MeshShape, SceneGraph};
use winit::window::Window;

/// Camera following the ball, offset by the active zone's mode.
#[derive(Debug, Clone)]
pub struct CameraRig {
    zones: CameraZones,
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    pub fn new(zones: CameraZones) -> Self {
        let mode = zones.active();
        Self {
            zones,
            position: mode.offset(),
            target: Vec3::zeros(),
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.zones.active()
    }

    pub fn follow(&mut self, ball: Vec3) {
        if let Some(mode) = self.zones.update(ball) {
            log::info!("Camera mode: {mode:?}");
        }
        self.target = ball;
        self.position = ball + self.zones.active().offset();
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraZones::default())
    }
}

/// Summarizes the submitted scene. Drawing belongs to an external renderer;
/// this keeps a one-line status for logs and the window title.
#[derive(Debug, Default)]
pub struct StatusRenderer {
    frames: u64,
    last_status: String,
}

impl StatusRenderer {
    /// Frames between `debug` status logs.
    const LOG_INTERVAL: u64 = 120;

    pub fn render(&mut self, scene: &SceneGraph, camera: &CameraRig, elapsed: f32) {
        let ball = camera.target;
        let textured = scene
            .iter()
            .filter(|(_, n)| n.texture.is_some() && matches!(n.mesh, MeshShape::Box { .. }))
            .count();
        self.last_status = format!(
            "ball ({:.1}, {:.1}, {:.1}) | camera {:?} | {} nodes, {} textured | t {:.1}s",
            ball.x,
            ball.y,
            ball.z,
            camera.mode(),
            scene.len(),
            textured,
            elapsed
        );
        if self.frames % Self::LOG_INTERVAL == 0 {
            log::debug!("frame {}: {}", self.frames, self.last_status);
        }
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn status(&self) -> &str {
        &self.last_status
    }
}

/// Host backed by a winit window.
pub struct WindowHost {
    window: Option<Window>,
    title: String,
    clock_origin: Instant,
    pub intent: MoveIntent,
    pub focused: bool,
    touch: bool,
    camera: CameraRig,
    renderer: StatusRenderer,
    elapsed: f32,
}

impl WindowHost {
    pub fn new(title: impl Into<String>, touch: bool) -> Self {
        Self {
            window: None,
            title: title.into(),
            clock_origin: Instant::now(),
            intent: MoveIntent::IDLE,
            focused: true,
            touch,
            camera: CameraRig::default(),
            renderer: StatusRenderer::default(),
            elapsed: 0.0,
        }
    }

    pub fn attach(&mut self, window: Window) {
        self.window = Some(window);
    }

    pub fn has_window(&self) -> bool {
        self.window.is_some()
    }

    pub fn renderer(&self) -> &StatusRenderer {
        &self.renderer
    }
}

impl FrameHost for WindowHost {
    fn now(&self) -> Duration {
        self.clock_origin.elapsed()
    }

    fn is_touch_device(&self) -> bool {
        self.touch
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn move_intent(&mut self) -> &mut MoveIntent {
        &mut self.intent
    }

    fn on_controlled_moved(&mut self, position: Vec3) {
        self.camera.follow(position);
    }

    fn advance_decorations(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
    }

    fn render(&mut self, scene: &SceneGraph) {
        self.renderer.render(scene, &self.camera, self.elapsed);
        if let Some(window) = &self.window {
            if self.renderer.frames() % 30 == 1 {
                window.set_title(&format!("{} | {}", self.title, self.renderer.status()));
            }
        }
    }

    fn request_next_frame(&mut self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
