use std::sync::Arc;

use crate::math::{LocalTransform, Pose};
use crate::types::{AnchorId, NodeId, NodeRef, RenderableAsset};

/// Outbound scene-graph operations.
///
/// Not safe for concurrent mutation: only call from the update thread.
pub trait SceneGraph {
    /// Create a world-locked anchor at `pose`
    fn create_anchor(&mut self, pose: Pose) -> AnchorId;

    /// Create a detached, disabled transform node
    fn create_node(&mut self) -> NodeId;

    /// Parent `child` under `parent`
    fn attach_child(&mut self, parent: NodeRef, child: NodeRef);

    fn set_renderable(&mut self, node: NodeId, asset: Arc<RenderableAsset>);

    fn set_local_transform(&mut self, node: NodeId, transform: LocalTransform);

    fn set_enabled(&mut self, node: NodeId, enabled: bool);

    /// Make `node` the active selection, ready for interaction
    fn set_selected(&mut self, node: NodeId);
}
