use glam::{Quat, Vec3};

/// Unsigned angle in radians between two vectors, in `[0, π]`.
///
/// Uses `atan2(|a × b|, a · b)`, which stays accurate near 0 and π where
/// an `acos` of the normalized dot product loses precision. The pitch
/// clamp depends on this near-parallel accuracy.
#[inline]
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Rotate `v` by `angle` radians about `axis` (right-handed).
///
/// The axis does not need to be unit length. A zero axis yields NaN.
#[inline]
pub fn rotate_by_axis_angle(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    Quat::from_axis_angle(axis.normalize(), angle) * v
}
