use glam::{Mat4, Quat, Vec3};

/// Local transform of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    /// Uniform scale
    pub scale: f32,
}

impl LocalTransform {
    pub const IDENTITY: LocalTransform = LocalTransform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: 1.0,
    };

    pub fn new(translation: Vec3, rotation: Quat, scale: f32) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Rotation of `degrees` about `axis`; a zero axis yields no rotation
    pub fn axis_angle_degrees(axis: Vec3, degrees: f32) -> Quat {
        match axis.try_normalize() {
            Some(axis) => Quat::from_axis_angle(axis, degrees.to_radians()),
            None => Quat::IDENTITY,
        }
    }

    /// Scale, then rotate, then translate
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
