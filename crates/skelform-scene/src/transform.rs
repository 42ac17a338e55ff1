//! TRS transforms.

use glam::{DQuat, DVec3, EulerRot};

/// A translation / rotation / scale transform.
///
/// Composition follows the usual parent-child rule: scale, then rotate,
/// then translate. Shear is not representable; rig transforms never
/// carry it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation component.
    pub translation: DVec3,
    /// Rotation component.
    pub rotation: DQuat,
    /// Scale component.
    pub scale: DVec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    /// Creates a transform from a translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Creates a transform from translation, rotation, and scale.
    pub fn from_trs(translation: DVec3, rotation: DQuat, scale: DVec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a transform from component arrays, with XYZ euler degrees.
    pub fn from_euler_degrees(translate: [f64; 3], rotate_deg: [f64; 3], scale: [f64; 3]) -> Self {
        Self {
            translation: DVec3::from(translate),
            rotation: DQuat::from_euler(
                EulerRot::XYZ,
                rotate_deg[0].to_radians(),
                rotate_deg[1].to_radians(),
                rotate_deg[2].to_radians(),
            ),
            scale: DVec3::from(scale),
        }
    }

    /// Composes `self` (parent) with `child`.
    pub fn mul(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }

    /// Returns the inverse transform.
    ///
    /// Exact for uniform scale; rig hierarchies keep scale uniform below
    /// any rotated parent.
    pub fn inverse(&self) -> Transform {
        let inv_scale = DVec3::ONE / self.scale;
        let inv_rotation = self.rotation.inverse();
        Transform {
            translation: inv_scale * (inv_rotation * -self.translation),
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Transforms a point from local into this transform's space.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Returns the rotation that aims `axis` from `eye` toward `target`.
    ///
    /// Falls back to identity when the two points coincide.
    pub fn aim(eye: DVec3, target: DVec3, axis: DVec3) -> DQuat {
        let direction = target - eye;
        if direction.length_squared() < 1e-12 {
            return DQuat::IDENTITY;
        }
        DQuat::from_rotation_arc(axis.normalize(), direction.normalize())
    }

    /// Compares two transforms within `epsilon` per component.
    ///
    /// Rotations are compared as quaternions up to sign.
    pub fn approx_eq(&self, other: &Transform, epsilon: f64) -> bool {
        self.translation.abs_diff_eq(other.translation, epsilon)
            && self.scale.abs_diff_eq(other.scale, epsilon)
            && (1.0 - self.rotation.dot(other.rotation).abs()) < epsilon
    }

    /// Returns translation, rotation, and scale as plain arrays.
    pub fn to_arrays(&self) -> ([f64; 3], [f64; 4], [f64; 3]) {
        (
            self.translation.to_array(),
            self.rotation.to_array(),
            self.scale.to_array(),
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
