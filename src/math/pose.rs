use glam::{Mat4, Quat, Vec3};

use super::LocalTransform;

/// Position plus orientation in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Rigid world matrix of this pose
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// World matrix of a child carrying `local` under this pose
    pub fn compose(&self, local: &LocalTransform) -> Mat4 {
        self.to_mat4() * local.to_mat4()
    }

    /// Transform a point from pose-local space into world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.orientation * point
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_pose_new_normalizes_orientation() {
        let pose = Pose::new(Vec3::ZERO, Quat::from_xyzw(0.0, 0.0, 0.0, 2.0));
        assert!((pose.orientation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pose_transform_point() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(FRAC_PI_2));
        let world = pose.transform_point(Vec3::X);
        assert!(world.abs_diff_eq(Vec3::new(1.0, 2.0, 2.0), 1e-5));
    }

    #[test]
    fn test_pose_matrix_matches_transform_point() {
        let pose = Pose::new(Vec3::new(-4.0, 0.5, 9.0), Quat::from_rotation_z(0.3));
        let point = Vec3::new(0.2, -1.0, 4.0);
        let via_matrix = pose.to_mat4().transform_point3(point);
        assert!(via_matrix.abs_diff_eq(pose.transform_point(point), 1e-5));
    }

    #[test]
    fn test_compose_with_identity_local_is_pose() {
        let pose = Pose::new(Vec3::new(3.0, 1.0, -2.0), Quat::from_rotation_x(1.1));
        let world = pose.compose(&LocalTransform::IDENTITY);
        assert!(world.abs_diff_eq(pose.to_mat4(), 1e-6));
    }
}
