use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Translation, rotation and scale of a bone, applied scale first, then
/// rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation.
    pub translation: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Transform from its three components.
    #[must_use]
    pub const fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Pure translation.
    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Pure rotation.
    #[must_use]
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Express `child` (relative to `self`) in the space `self` lives in.
    ///
    /// The child's translation is scaled and rotated by the parent before
    /// the parent's translation is added; rotations and scales multiply.
    /// Non-uniform parent scale combined with a child rotation is not
    /// representable as a TRS exactly; the result keeps per-axis scale.
    #[must_use]
    #[inline]
    pub fn compose(&self, child: &Self) -> Self {
        Self {
            translation: self.translation
                + self.rotation * (self.scale * child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }

    /// Apply the transform to a point.
    #[must_use]
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Column-major 4x4 matrix equivalent.
    #[must_use]
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }

    /// Blend towards `other` by `t` in `[0, 1]`: translation and scale
    /// interpolate linearly, rotation spherically.
    #[must_use]
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            translation: self.translation.lerp(other.translation, t),
            rotation: self.rotation.slerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }

    /// Approximate equality on every component.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.translation
            .abs_diff_eq(other.translation, max_abs_diff)
            && self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
            && self.scale.abs_diff_eq(other.scale, max_abs_diff)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn identity_is_neutral() {
        let t = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_z(0.4),
            Vec3::splat(2.0),
        );
        assert!(Transform::IDENTITY.compose(&t).abs_diff_eq(&t, 1e-6));
        assert!(t.compose(&Transform::IDENTITY).abs_diff_eq(&t, 1e-6));
    }

    #[test]
    fn compose_rotates_and_scales_child_translation() {
        let parent = Transform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_z(FRAC_PI_2),
            Vec3::splat(2.0),
        );
        let child = Transform::from_translation(Vec3::X);
        let world = parent.compose(&child);
        // X scaled to 2, rotated to +Y, offset by the parent.
        assert!(world
            .translation
            .abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-5));
        assert!(world.scale.abs_diff_eq(Vec3::splat(2.0), 1e-6));
    }

    #[test]
    fn matrix_agrees_with_transform_point() {
        let t = Transform::new(
            Vec3::new(-3.0, 0.5, 2.0),
            Quat::from_rotation_y(1.1),
            Vec3::new(1.0, 2.0, 0.5),
        );
        let p = Vec3::new(0.2, -1.0, 4.0);
        let via_matrix = t.to_matrix().transform_point3(p);
        assert!(via_matrix.abs_diff_eq(t.transform_point(p), 1e-5));
    }

    #[test]
    fn lerp_blends_each_component() {
        let from = Transform::IDENTITY;
        let to = Transform::new(
            Vec3::new(2.0, 0.0, -4.0),
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::splat(3.0),
        );
        let half = from.lerp(&to, 0.5);
        assert!(half.translation.abs_diff_eq(Vec3::new(1.0, 0.0, -2.0), 1e-6));
        assert!(half
            .rotation
            .abs_diff_eq(Quat::from_rotation_y(FRAC_PI_2 / 2.0), 1e-5));
        assert!(half.scale.abs_diff_eq(Vec3::splat(2.0), 1e-6));
        assert!(from.lerp(&to, 0.0).abs_diff_eq(&from, 1e-6));
        assert!(from.lerp(&to, 1.0).abs_diff_eq(&to, 1e-5));
    }

    #[test]
    fn compose_matches_matrix_product_for_uniform_scale() {
        let parent = Transform::new(
            Vec3::new(0.0, 1.0, 0.0),
            Quat::from_rotation_x(0.3),
            Vec3::splat(1.5),
        );
        let child = Transform::new(
            Vec3::new(0.5, 0.0, -1.0),
            Quat::from_rotation_y(-0.7),
            Vec3::ONE,
        );
        let composed = parent.compose(&child).to_matrix();
        let product = parent.to_matrix() * child.to_matrix();
        assert!(composed.abs_diff_eq(product, 1e-5));
    }
}
