//! Conversion helpers between f32 scene types and physics-precision types.

use marble_core::math::{
    Isometry3, Quat, Real, Translation3, UnitQuaternion, Vec3, Vector3, nalgebra, quat_from_xyzw,
    quat_to_array,
};

/// Converts a scene `Vec3` (f32) to a physics `Vector3<Real>`.
pub fn vec3_to_na(v: Vec3) -> Vector3 {
    Vector3::new(v.x as Real, v.y as Real, v.z as Real)
}

/// Converts a physics `Vector3<Real>` to a scene `Vec3` (f32).
pub fn vec3_from_na(v: &Vector3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Converts a scene `Quat` (f32) to a physics `UnitQuaternion<Real>`.
///
/// The input is renormalized: scene rotations are written by hand in layout
/// code and may drift off the unit sphere.
pub fn quat_to_na(q: Quat) -> UnitQuaternion {
    let arr = quat_to_array(q);
    UnitQuaternion::new_normalize(nalgebra::Quaternion::new(
        arr[3] as Real,
        arr[0] as Real,
        arr[1] as Real,
        arr[2] as Real,
    ))
}

/// Converts a physics `UnitQuaternion<Real>` to a scene `Quat` (f32).
pub fn quat_from_na(q: &UnitQuaternion) -> Quat {
    let q = q.quaternion();
    quat_from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32)
}

/// Converts a scene `Vec3` + `Quat` to a physics `Isometry3<Real>`.
pub fn isometry3_to_na(translation: Vec3, rotation: Quat) -> Isometry3 {
    Isometry3::from_parts(
        Translation3::new(
            translation.x as Real,
            translation.y as Real,
            translation.z as Real,
        ),
        quat_to_na(rotation),
    )
}

/// Extracts position and rotation from a physics `Isometry3<Real>` as `(Vec3, Quat)`.
pub fn isometry3_from_na(iso: &Isometry3) -> (Vec3, Quat) {
    let t = &iso.translation;
    let pos = Vec3::new(t.x as f32, t.y as f32, t.z as f32);
    let rot = quat_from_na(&iso.rotation);
    (pos, rot)
}
