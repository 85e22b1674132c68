mod aabb;
mod pose;
mod transform;

pub use aabb::Aabb;
pub use pose::Pose;
pub use transform::LocalTransform;
