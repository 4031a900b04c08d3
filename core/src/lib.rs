//! # Marble Core
//!
//! Shared primitives for the marble playground: render-side and
//! physics-side math aliases, platform-agnostic input types and the
//! profiling macros used by the frame loop.

pub mod input;
pub mod math;
pub mod profiling;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core version once at startup.
pub fn init() {
    log::info!("Marble Core v{} initialized", VERSION);
}
