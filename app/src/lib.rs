//! # Marble App
//!
//! Runners for the marble playground.
//!
//! - [`MarbleApp`] - winit window driving a [`marble_sim::FrameScheduler`]
//! - [`headless::run`] - the same frame loop on a simulated 60 Hz clock
//! - [`MarbleArgs`] - command line arguments

mod app;
mod args;
pub mod headless;
mod host;
mod input;

pub use app::MarbleApp;
pub use args::{DEFAULT_HEADLESS_FRAMES, MarbleArgs, ScriptedInput};
pub use headless::{HeadlessHost, HeadlessSummary};
pub use host::{CameraRig, StatusRenderer, WindowHost};
pub use input::{apply_key, map_winit_key};

/// App library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the app version once at startup.
pub fn init() {
    log::info!("Marble App v{} initialized", VERSION);
}
