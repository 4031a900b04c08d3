//! Physics integration with [rapier](https://rapier.rs/).
//!
//! Owns the rigid-body world of a session and the descriptors the body
//! factory materializes into rapier bodies and colliders.
//!
//! ## Features
//!
//! - `f64` — physics with `f64` precision (default)
//! - `f32` — physics with `f32` precision

#[cfg(not(any(feature = "f64", feature = "f32")))]
compile_error!("marble-sim needs either the `f64` or the `f32` feature");

pub mod conversions;
pub mod descriptors;
pub mod world;

pub use descriptors::{Activation, BodyDesc, BodyKind, ShapeDesc};
pub use world::{PhysicsWorld, Pose};

// Re-export the active rapier crate under a unified name.

#[cfg(all(feature = "f64", not(feature = "f32")))]
pub use rapier3d_f64 as rapier3d;

#[cfg(feature = "f32")]
pub use ::rapier3d;
