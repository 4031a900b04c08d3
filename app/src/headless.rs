//! Windowless runner on a simulated 60 Hz clock.
//!
//! The loop only ticks while the previous tick asked for another frame, the
//! same contract a display refresh callback follows.

use std::time::Duration;

use marble_core::input::MoveIntent;
use marble_core::math::Vec3;
use marble_sim::playground::{self, LinkCatalog};
use marble_sim::{
    BackendStatus, FrameHost, FrameReport, FrameScheduler, PlaceholderTextures, PlaygroundConfig,
    SceneGraph, SimError,
};

use crate::args::{MarbleArgs, ScriptedInput};
use crate::host::{CameraRig, StatusRenderer};

/// Simulated display refresh interval.
pub const HEADLESS_FRAME_TIME: Duration = Duration::from_nanos(16_666_667);

/// Host driven by a simulated clock and scripted input.
pub struct HeadlessHost {
    now: Duration,
    script: ScriptedInput,
    intent: MoveIntent,
    touch: bool,
    frame_requested: bool,
    camera: CameraRig,
    renderer: StatusRenderer,
    elapsed: f32,
}

impl HeadlessHost {
    pub fn new(script: ScriptedInput, touch: bool) -> Self {
        Self {
            now: Duration::ZERO,
            script,
            intent: script.intent(),
            touch,
            frame_requested: false,
            camera: CameraRig::default(),
            renderer: StatusRenderer::default(),
            elapsed: 0.0,
        }
    }

    /// Consumes a pending frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Advances the clock one refresh interval and re-applies the script.
    pub fn advance(&mut self) {
        self.now += HEADLESS_FRAME_TIME;
        self.intent = self.script.intent();
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }
}

impl FrameHost for HeadlessHost {
    fn now(&self) -> Duration {
        self.now
    }

    fn is_touch_device(&self) -> bool {
        self.touch
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
    }

    fn request_next_frame(&mut self) {
        self.frame_requested = true;
    }
}

/// Outcome of a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub respawns: u32,
    pub last: Option<FrameReport>,
}

/// Builds the playground and ticks until the frame limit.
pub fn run(args: &MarbleArgs, config: PlaygroundConfig) -> Result<HeadlessSummary, SimError> {
    let limit = args.frame_limit().unwrap_or(crate::args::DEFAULT_HEADLESS_FRAMES);
    let mut scheduler = FrameScheduler::new(config);
    let mut host = HeadlessHost::new(args.script, args.touch);
    let mut textures = PlaceholderTextures::new();
    let catalog = LinkCatalog::default();

    scheduler.start(BackendStatus::Ready, &mut host, |session| {
        playground::build(session, &mut textures, &catalog, args.touch)?;
        Ok(())
    })?;
    log::info!(
        "Headless run: {limit} frames, script {:?}, {} textures requested",
        args.script,
        textures.len()
    );

    let mut last = None;
    while scheduler.frame_number() < limit && host.take_frame_request() {
        host.advance();
        if let Some(report) = scheduler.tick(&mut host)? {
            last = Some(report);
        }
    }

    let summary = HeadlessSummary {
        frames: scheduler.frame_number(),
        respawns: scheduler.session().map_or(0, |s| s.respawn_count()),
        last,
    };
    scheduler.unload();
    Ok(summary)
}
