//! The per-frame entry point.
//!
//! # Lifecycle
//!
//! 1. [`FrameScheduler::new`] - `Preload`, nothing touches physics yet
//! 2. [`FrameScheduler::start`] - once the renderer is ready: builds the
//!    session and moves to `Running`
//! 3. [`FrameScheduler::tick`] - once per display refresh
//! 4. [`FrameScheduler::unload`] - drops the session; later ticks do nothing
//!
//! # Example
//!
//! ```ignore
//! let mut scheduler = FrameScheduler::new(PlaygroundConfig::default());
//! scheduler.start(BackendStatus::Ready, &mut host, |session| {
//!     playground::build(session, &mut textures, &LinkCatalog::default(), false)?;
//!     Ok(())
//! })?;
//! while host.take_frame_request() {
//!     scheduler.tick(&mut host)?;
//! }
//! ```

use std::time::Duration;

use marble_core::input::MoveIntent;
use marble_core::math::Vec3;
use marble_core::{frame_mark, profile_function, profile_scope};

use crate::config::PlaygroundConfig;
use crate::error::SimError;
use crate::scene::SceneGraph;
use crate::session::Session;

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Preload,
    Running,
    Unloaded,
}

/// What the rendering backend reported at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Ready,
    Unavailable(String),
}

/// Services the frame loop needs from its host (window, browser, test
/// harness). Only `now`, `move_intent`, `render` and `request_next_frame`
/// are required.
pub trait FrameHost {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;

    /// Touch devices keep their input when the window loses focus.
    fn is_touch_device(&self) -> bool {
        false
    }

    fn has_focus(&self) -> bool {
        true
    }

    /// Input state. The scheduler zeroes it on focus loss.
    fn move_intent(&mut self) -> &mut MoveIntent;

    /// Called with the ball's synced position, e.g. to drive camera zones.
    fn on_controlled_moved(&mut self, _position: Vec3) {}

    /// Advance particles, shaders and other decoration by session time (seconds).
    fn advance_decorations(&mut self, _elapsed: f32) {}

    fn render(&mut self, scene: &SceneGraph);

    /// Ask the display to call `tick` again.
    fn request_next_frame(&mut self);
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame counter.
    pub frame: u64,
    /// Seconds since the previous tick (or since `start`).
    pub delta: f32,
    pub sub_steps: u32,
    /// Dynamic renderables written this frame.
    pub synced: usize,
    /// Velocity command applied to the ball, if any.
    pub velocity_command: Option<Vec3>,
    pub respawned: bool,
    pub controlled_position: Option<Vec3>,
}

/// Owns the session and runs the frame protocol.
pub struct FrameScheduler {
    state: SchedulerState,
    config: PlaygroundConfig,
    session: Option<Session>,
    started_at: Duration,
    last_frame: Duration,
    frame_number: u64,
}

impl FrameScheduler {
    pub fn new(config: PlaygroundConfig) -> Self {
        Self {
            state: SchedulerState::Preload,
            config,
            session: None,
            started_at: Duration::ZERO,
            last_frame: Duration::ZERO,
            frame_number: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Frames ticked so far.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Builds the session and enters `Running`.
    ///
    /// `setup` populates the scene; a controlled ball is spawned afterwards
    /// if `setup` did not create one. On any error the scheduler stays in
    /// `Preload` without a session. The first frame is requested from `host`.
    pub fn start<H, F>(&mut self, backend: BackendStatus, host: &mut H, setup: F) -> Result<(), SimError>
    where
        H: FrameHost + ?Sized,
        F: FnOnce(&mut Session) -> Result<(), SimError>,
    {
        if self.state != SchedulerState::Preload {
            return Err(SimError::AlreadyStarted);
        }
        if let BackendStatus::Unavailable(reason) = backend {
            log::error!("Cannot start playground: {reason}");
            return Err(SimError::BackendUnavailable(reason));
        }

        let mut session = Session::new(self.config.clone())?;
        setup(&mut session)?;
        if session.controlled().is_none() {
            session.spawn_controlled()?;
        }

        log::info!(
            "Playground running: {} bodies, {} scene nodes, {} interactive",
            session.world().body_count(),
            session.scene().len(),
            session.interactive().len()
        );

        let now = host.now();
        self.started_at = now;
        self.last_frame = now;
        self.session = Some(session);
        self.state = SchedulerState::Running;
        host.request_next_frame();
        Ok(())
    }

    /// Runs one frame. Returns `Ok(None)` outside `Running`.
    ///
    /// Order: delta, input (masked on focus loss), velocity command, physics
    /// step, body → renderable sync, fall-out recovery, position callback,
    /// decorations, render, next-frame request.
    pub fn tick<H>(&mut self, host: &mut H) -> Result<Option<FrameReport>, SimError>
    where
        H: FrameHost + ?Sized,
    {
        let Some(session) = self.session.as_mut().filter(|_| self.state == SchedulerState::Running)
        else {
            log::trace!("Tick ignored in state {:?}", self.state);
            return Ok(None);
        };
        profile_function!();

        let now = host.now();
        let delta = now.saturating_sub(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let intent = sample_intent(host);
        let velocity_command = session.apply_intent(&intent);

        let sub_steps = {
            profile_scope!("physics");
            session.step_physics(delta)
        };
        let synced = session.sync_transforms();
        let respawned = session.recover_out_of_bounds()?;

        let controlled_position = session.controlled_position();
        if let Some(position) = controlled_position {
            host.on_controlled_moved(position);
        }

        let elapsed =
            now.saturating_sub(self.started_at).as_secs_f32() + session.config().decoration_time_offset;
        host.advance_decorations(elapsed);

        {
            profile_scope!("render");
            host.render(session.scene());
        }
        host.request_next_frame();
        frame_mark!();

        let report = FrameReport {
            frame: self.frame_number,
            delta,
            sub_steps,
            synced,
            velocity_command,
            respawned,
            controlled_position,
        };
        self.frame_number += 1;
        log::trace!("{report:?}");
        Ok(Some(report))
    }

    /// Drops the session. Idempotent.
    pub fn unload(&mut self) {
        if self.state == SchedulerState::Unloaded {
            return;
        }
        log::info!("Unloading playground after {} frames", self.frame_number);
        self.session = None;
        self.state = SchedulerState::Unloaded;
    }
}

/// Reads the host's intent, zeroing it first on a non-touch host without focus.
fn sample_intent<H: FrameHost + ?Sized>(host: &mut H) -> MoveIntent {
    if !host.is_touch_device() && !host.has_focus() {
        host.move_intent().clear();
    }
    host.move_intent().clamped()
}
