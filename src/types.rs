use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::math::{Aabb, Pose};

/// Layout the sample builds its label renderable from
pub const DEFAULT_VIEW_LAYOUT: &str = "view_model_title";

// === Tracking ===

/// Tracking confidence reported for a reference image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingState {
    #[default]
    NotTracking,
    Tracking,
    Stopped,
}

/// Per-frame snapshot of one registered reference image.
///
/// Produced fresh every frame by the tracking subsystem. The pose is only
/// meaningful while the image is `Tracking`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedImage {
    name: String,
    state: TrackingState,
    pose: Option<Pose>,
}

impl TrackedImage {
    pub fn tracking(name: impl Into<String>, pose: Pose) -> Self {
        Self {
            name: name.into(),
            state: TrackingState::Tracking,
            pose: Some(pose),
        }
    }

    pub fn not_tracking(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: TrackingState::NotTracking,
            pose: None,
        }
    }

    pub fn stopped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: TrackingState::Stopped,
            pose: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Center pose, only while tracking
    pub fn center_pose(&self) -> Option<Pose> {
        match self.state {
            TrackingState::Tracking => self.pose,
            _ => None,
        }
    }
}

// === Assets ===

/// Where a renderable is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetDescriptor {
    /// Embedded view layout, rendered as a flat panel
    View { layout: String },
    /// Local glTF / GLB model file
    Model { path: PathBuf },
}

impl Default for AssetDescriptor {
    fn default() -> Self {
        AssetDescriptor::View {
            layout: DEFAULT_VIEW_LAYOUT.to_string(),
        }
    }
}

impl fmt::Display for AssetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetDescriptor::View { layout } => write!(f, "view:{layout}"),
            AssetDescriptor::Model { path } => write!(f, "model:{}", path.display()),
        }
    }
}

/// What a loaded renderable carries
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableContent {
    View {
        layout: String,
        width_px: u32,
        height_px: u32,
    },
    Model {
        meshes: usize,
        vertices: usize,
        bounds: Option<Aabb>,
    },
}

/// Immutable loaded visual resource, shared read-only once built
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableAsset {
    pub descriptor: AssetDescriptor,
    pub content: RenderableContent,
}

// === Scene handles ===

/// Opaque handle to an anchor owned by the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

/// Opaque handle to a transform node owned by the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Anything that can parent or be parented in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Root,
    Anchor(AnchorId),
    Node(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_center_pose_only_while_tracking() {
        let pose = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(TrackedImage::tracking("default", pose).center_pose(), Some(pose));
        assert_eq!(TrackedImage::not_tracking("default").center_pose(), None);
        assert_eq!(TrackedImage::stopped("default").center_pose(), None);
    }

    #[test]
    fn test_default_descriptor_is_view_layout() {
        assert_eq!(
            AssetDescriptor::default(),
            AssetDescriptor::View {
                layout: "view_model_title".to_string()
            }
        );
    }

    #[test]
    fn test_descriptor_serde_tagging() {
        let json = r#"{"kind":"model","path":"assets/tiger.glb"}"#;
        let descriptor: AssetDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            descriptor,
            AssetDescriptor::Model {
                path: PathBuf::from("assets/tiger.glb")
            }
        );
        assert_eq!(descriptor.to_string(), "model:assets/tiger.glb");
    }
}
