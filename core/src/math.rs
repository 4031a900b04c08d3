//! Math type aliases and helper functions.
//!
//! Render-side types are always `f32`. Physics-side types follow the
//! precision of the active rapier build (behind the `physics-math` feature).

pub use nalgebra;

// ===== Rendering math (always f32) =====

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
/// Use [`quat_from_xyzw`] or `Quaternion::new(w, x, y, z)` to construct.
pub type Quat = nalgebra::Quaternion<f32>;

/// Identity rotation.
pub const QUAT_IDENTITY: Quat = Quat::new(1.0, 0.0, 0.0, 0.0);

// ===== Helper functions =====

/// Create a quaternion from x, y, z, w components.
pub fn quat_from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Quat {
    nalgebra::Quaternion::new(w, x, y, z)
}

/// Convert a quaternion to a `[x, y, z, w]` array.
pub fn quat_to_array(q: Quat) -> [f32; 4] {
    [q.coords.x, q.coords.y, q.coords.z, q.coords.w]
}

/// Build a `Vec3` from a `[x, y, z]` array (config files store arrays).
pub fn vec3_from_array(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

// ===== Physics math (precision-aware) =====

/// Physics scalar type. `f64` by default, `f32` with `physics-f32` feature.
#[cfg(all(feature = "physics-math", not(feature = "physics-f32")))]
pub type Real = f64;

/// Physics scalar type. `f32` with `physics-f32` feature.
#[cfg(all(feature = "physics-math", feature = "physics-f32"))]
pub type Real = f32;

/// 3D physics vector.
#[cfg(feature = "physics-math")]
pub type Vector3 = nalgebra::Vector3<Real>;

/// 3D physics isometry (rotation + translation).
#[cfg(feature = "physics-math")]
pub type Isometry3 = nalgebra::Isometry3<Real>;

/// 3D physics rotation (unit quaternion).
#[cfg(feature = "physics-math")]
pub type UnitQuaternion = nalgebra::UnitQuaternion<Real>;

/// 3D physics translation.
#[cfg(feature = "physics-math")]
pub type Translation3 = nalgebra::Translation3<Real>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quat_xyzw_roundtrip() {
        let q = quat_from_xyzw(0.1, 0.2, 0.3, 0.9);
        let arr = quat_to_array(q);
        assert!((arr[0] - 0.1).abs() < 1e-6);
        assert!((arr[1] - 0.2).abs() < 1e-6);
        assert!((arr[2] - 0.3).abs() < 1e-6);
        assert!((arr[3] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn identity_constant_matches_nalgebra() {
        assert_eq!(QUAT_IDENTITY, Quat::identity());
    }

    #[test]
    fn vec3_from_config_array() {
        assert_eq!(vec3_from_array([0.0, 0.0, 50.0]), Vec3::new(0.0, 0.0, 50.0));
    }
}
