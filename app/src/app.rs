//! Windowed runner and event loop.

use marble_core::input::KeyCode;
use marble_sim::playground::{self, LinkCatalog};
use marble_sim::{
    BackendStatus, FrameScheduler, PlaceholderTextures, PlaygroundConfig, SchedulerState, SimError,
};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
#[cfg(target_os = "windows")]
use winit::platform::windows::EventLoopBuilderExtWindows;
use winit::window::{Window, WindowId};

use crate::args::MarbleArgs;
use crate::host::WindowHost;
use crate::input::{apply_key, map_winit_key};

/// Owns the window host and the frame scheduler.
///
/// The scheduler starts once the window exists. Every `RedrawRequested`
/// runs one tick, and the tick's next-frame request becomes the window's
/// next redraw.
pub struct MarbleApp {
    args: MarbleArgs,
    scheduler: FrameScheduler,
    host: WindowHost,
    textures: PlaceholderTextures,
    catalog: LinkCatalog,
    error: Option<SimError>,
}

impl MarbleApp {
    pub fn new(args: MarbleArgs, config: PlaygroundConfig) -> Self {
        let host = WindowHost::new(args.title.clone(), args.touch);
        Self {
            args,
            scheduler: FrameScheduler::new(config),
            host,
            textures: PlaceholderTextures::new(),
            catalog: LinkCatalog::default(),
            error: None,
        }
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Creates the event loop and blocks until the window closes.
    pub fn run(args: MarbleArgs, config: PlaygroundConfig) -> Result<(), SimError> {
        #[cfg(target_os = "windows")]
        let event_loop = EventLoop::builder()
            .with_any_thread(true)
            .build()
            .map_err(|e| SimError::BackendUnavailable(e.to_string()))?;

        #[cfg(not(target_os = "windows"))]
        let event_loop =
            EventLoop::new().map_err(|e| SimError::BackendUnavailable(e.to_string()))?;

        let mut app = Self::new(args, config);
        event_loop
            .run_app(&mut app)
            .map_err(|e| SimError::BackendUnavailable(e.to_string()))?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self, backend: BackendStatus) -> Result<(), SimError> {
        let touch = self.args.touch;
        let textures = &mut self.textures;
        let catalog = &self.catalog;
        self.scheduler.start(backend, &mut self.host, |session| {
            let summary = playground::build(session, textures, catalog, touch)?;
            log::debug!("{summary:?}");
            Ok(())
        })?;
        log::info!("{} textures requested", self.textures.len());
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SimError) {
        log::error!("{err}");
        self.error = Some(err);
        self.scheduler.unload();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.scheduler.tick(&mut self.host) {
            self.fail(event_loop, err);
            return;
        }
        if let Some(limit) = self.args.max_frames {
            if self.scheduler.frame_number() >= limit {
                log::info!("Reached max frames limit ({limit}), exiting");
                self.scheduler.unload();
                event_loop.exit();
            }
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        let Some(key) = map_winit_key(code) else {
            return;
        };
        if key == KeyCode::Escape && state == ElementState::Pressed {
            log::info!("Escape pressed");
            self.scheduler.unload();
            event_loop.exit();
            return;
        }
        apply_key(
            &mut self.host.intent,
            key,
            state == ElementState::Pressed,
        );
    }
}

impl ApplicationHandler for MarbleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.has_window() || self.scheduler.state() != SchedulerState::Preload {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.args.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.args.width,
                self.args.height,
            ));

        let backend = match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!("Window created");
                self.host.attach(window);
                BackendStatus::Ready
            }
            Err(e) => BackendStatus::Unavailable(format!("failed to create window: {e}")),
        };

        if let Err(err) = self.start(backend) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.scheduler.unload();
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => {
                self.host.focused = focused;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if !event.repeat {
                    self.on_key(event_loop, event.physical_key, event.state);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!(
            "Exiting after {} frames ({} status updates)",
            self.scheduler.frame_number(),
            self.host.renderer().frames()
        );
    }
}
