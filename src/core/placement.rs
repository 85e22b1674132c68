use std::sync::Arc;

use glam::Mat4;

use crate::math::{LocalTransform, Pose};
use crate::traits::SceneGraph;
use crate::types::{AnchorId, NodeId, NodeRef, RenderableAsset};

/// Record of the content placed for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub anchor: AnchorId,
    pub node: NodeId,
    /// Image pose captured when the request was issued
    pub pose: Pose,
    pub local: LocalTransform,
}

impl Placement {
    /// World matrix of the placed node: anchor pose, then the node's local transform
    pub fn world_transform(&self) -> Mat4 {
        self.pose.compose(&self.local)
    }
}

/// Anchor `asset` at `pose` and hang a configured node carrying it below the anchor.
///
/// The node stays disabled while it is being configured and is enabled and
/// selected last, so it never renders half-built.
pub fn place(
    scene: &mut dyn SceneGraph,
    pose: Pose,
    local: LocalTransform,
    asset: Arc<RenderableAsset>,
) -> Placement {
    let anchor = scene.create_anchor(pose);
    scene.attach_child(NodeRef::Root, NodeRef::Anchor(anchor));

    let node = scene.create_node();
    scene.set_enabled(node, false);
    scene.set_renderable(node, asset);
    scene.attach_child(NodeRef::Anchor(anchor), NodeRef::Node(node));
    scene.set_local_transform(node, local);

    scene.set_selected(node);
    scene.set_enabled(node, true);

    Placement {
        anchor,
        node,
        pose,
        local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetDescriptor, RenderableContent};
    use glam::{Quat, Vec3};

    #[derive(Debug, PartialEq)]
    enum Call {
        CreateAnchor,
        CreateNode,
        Attach(NodeRef, NodeRef),
        Renderable,
        Transform,
        Enabled(bool),
        Selected,
    }

    #[derive(Default)]
    struct CallLog {
        calls: Vec<Call>,
    }

    impl SceneGraph for CallLog {
        fn create_anchor(&mut self, _pose: Pose) -> AnchorId {
            self.calls.push(Call::CreateAnchor);
            AnchorId(1)
        }
        fn create_node(&mut self) -> NodeId {
            self.calls.push(Call::CreateNode);
            NodeId(2)
        }
        fn attach_child(&mut self, parent: NodeRef, child: NodeRef) {
            self.calls.push(Call::Attach(parent, child));
        }
        fn set_renderable(&mut self, _node: NodeId, _asset: Arc<RenderableAsset>) {
            self.calls.push(Call::Renderable);
        }
        fn set_local_transform(&mut self, _node: NodeId, _transform: LocalTransform) {
            self.calls.push(Call::Transform);
        }
        fn set_enabled(&mut self, _node: NodeId, enabled: bool) {
            self.calls.push(Call::Enabled(enabled));
        }
        fn set_selected(&mut self, _node: NodeId) {
            self.calls.push(Call::Selected);
        }
    }

    fn asset() -> Arc<RenderableAsset> {
        Arc::new(RenderableAsset {
            descriptor: AssetDescriptor::default(),
            content: RenderableContent::View {
                layout: "view_model_title".to_string(),
                width_px: 1,
                height_px: 1,
            },
        })
    }

    #[test]
    fn test_place_call_order() {
        let mut scene = CallLog::default();
        place(&mut scene, Pose::IDENTITY, LocalTransform::IDENTITY, asset());

        assert_eq!(
            scene.calls,
            vec![
                Call::CreateAnchor,
                Call::Attach(NodeRef::Root, NodeRef::Anchor(AnchorId(1))),
                Call::CreateNode,
                Call::Enabled(false),
                Call::Renderable,
                Call::Attach(NodeRef::Anchor(AnchorId(1)), NodeRef::Node(NodeId(2))),
                Call::Transform,
                Call::Selected,
                Call::Enabled(true),
            ]
        );
    }

    #[test]
    fn test_world_transform_composes_pose_then_local() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.5));
        let local = LocalTransform::new(Vec3::new(0.0, -10.0, 0.0), Quat::from_rotation_x(-0.3), 0.2);
        let mut scene = CallLog::default();
        let placement = place(&mut scene, pose, local, asset());

        let expected = Mat4::from_rotation_translation(pose.orientation, pose.position)
            * Mat4::from_translation(local.translation)
            * Mat4::from_quat(local.rotation)
            * Mat4::from_scale(Vec3::splat(0.2));
        assert!(placement.world_transform().abs_diff_eq(expected, 1e-5));
    }
}
