use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use glam::Mat4;

use crate::math::{LocalTransform, Pose};
use crate::traits::SceneGraph;
use crate::types::{AnchorId, NodeId, NodeRef, RenderableAsset};

/// Transform node as stored by [`InMemoryScene`]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub parent: Option<NodeRef>,
    pub local: LocalTransform,
    pub renderable: Option<Arc<RenderableAsset>>,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
struct AnchorEntry {
    pose: Pose,
    attached_to_root: bool,
}

/// Scene graph kept in plain maps, for driving the controller without a renderer
#[derive(Debug, Default)]
pub struct InMemoryScene {
    anchors: BTreeMap<u64, AnchorEntry>,
    nodes: BTreeMap<u64, SceneNode>,
    next_id: u64,
    selected: Option<NodeId>,
    mutations: usize,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of mutating calls received so far
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn anchor_pose(&self, anchor: AnchorId) -> Option<Pose> {
        self.anchors.get(&anchor.0).map(|entry| entry.pose)
    }

    pub fn is_anchor_attached(&self, anchor: AnchorId) -> bool {
        self.anchors
            .get(&anchor.0)
            .is_some_and(|entry| entry.attached_to_root)
    }

    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&node.0)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// World matrix of `node`, walking parents up to an anchor.
    /// `None` when the chain does not end at a root-attached anchor.
    pub fn world_transform(&self, node: NodeId) -> Option<Mat4> {
        let mut matrix = Mat4::IDENTITY;
        let mut current = NodeRef::Node(node);
        // A chain longer than the node count must contain a cycle
        for _ in 0..=self.nodes.len() {
            match current {
                NodeRef::Node(id) => {
                    let entry = self.nodes.get(&id.0)?;
                    matrix = entry.local.to_mat4() * matrix;
                    current = entry.parent?;
                }
                NodeRef::Anchor(id) => {
                    let entry = self.anchors.get(&id.0)?;
                    return entry
                        .attached_to_root
                        .then(|| entry.pose.to_mat4() * matrix);
                }
                NodeRef::Root => return Some(matrix),
            }
        }
        None
    }

    /// Indented dump of the tree below the root
    pub fn describe(&self) -> String {
        let mut out = String::from("root\n");
        for (id, anchor) in self.anchors.iter().filter(|(_, a)| a.attached_to_root) {
            let _ = writeln!(
                out,
                "  anchor#{id} at {:?} rot {:?}",
                anchor.pose.position, anchor.pose.orientation
            );
            self.describe_children(NodeRef::Anchor(AnchorId(*id)), 2, &mut out);
        }
        out
    }

    fn describe_children(&self, parent: NodeRef, depth: usize, out: &mut String) {
        for (id, node) in self.nodes.iter().filter(|(_, n)| n.parent == Some(parent)) {
            let renderable = node
                .renderable
                .as_ref()
                .map_or("none".to_string(), |asset| asset.descriptor.to_string());
            let _ = writeln!(
                out,
                "{}node#{id} enabled={} selected={} renderable={renderable} offset={:?} scale={}",
                "  ".repeat(depth),
                node.enabled,
                self.selected == Some(NodeId(*id)),
                node.local.translation,
                node.local.scale
            );
            self.describe_children(NodeRef::Node(NodeId(*id)), depth + 1, out);
        }
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut SceneNode> {
        let entry = self.nodes.get_mut(&node.0);
        if entry.is_none() {
            log::warn!("scene: unknown node {node:?}");
        }
        entry
    }
}

impl SceneGraph for InMemoryScene {
    fn create_anchor(&mut self, pose: Pose) -> AnchorId {
        self.mutations += 1;
        let id = self.allocate();
        self.anchors.insert(
            id,
            AnchorEntry {
                pose,
                attached_to_root: false,
            },
        );
        AnchorId(id)
    }

    fn create_node(&mut self) -> NodeId {
        self.mutations += 1;
        let id = self.allocate();
        self.nodes.insert(
            id,
            SceneNode {
                parent: None,
                local: LocalTransform::IDENTITY,
                renderable: None,
                enabled: false,
            },
        );
        NodeId(id)
    }

    fn attach_child(&mut self, parent: NodeRef, child: NodeRef) {
        self.mutations += 1;
        match (parent, child) {
            (NodeRef::Root, NodeRef::Anchor(anchor)) => match self.anchors.get_mut(&anchor.0) {
                Some(entry) => entry.attached_to_root = true,
                None => log::warn!("scene: unknown anchor {anchor:?}"),
            },
            (parent, NodeRef::Node(node)) => {
                if let Some(entry) = self.node_mut(node) {
                    entry.parent = Some(parent);
                }
            }
            (parent, child) => log::warn!("scene: cannot attach {child:?} under {parent:?}"),
        }
    }

    fn set_renderable(&mut self, node: NodeId, asset: Arc<RenderableAsset>) {
        self.mutations += 1;
        if let Some(entry) = self.node_mut(node) {
            entry.renderable = Some(asset);
        }
    }

    fn set_local_transform(&mut self, node: NodeId, transform: LocalTransform) {
        self.mutations += 1;
        if let Some(entry) = self.node_mut(node) {
            entry.local = transform;
        }
    }

    fn set_enabled(&mut self, node: NodeId, enabled: bool) {
        self.mutations += 1;
        if let Some(entry) = self.node_mut(node) {
            entry.enabled = enabled;
        }
    }

    fn set_selected(&mut self, node: NodeId) {
        self.mutations += 1;
        if self.nodes.contains_key(&node.0) {
            self.selected = Some(node);
        } else {
            log::warn!("scene: cannot select unknown node {node:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_world_transform_through_anchor() {
        let mut scene = InMemoryScene::new();
        let pose = Pose::new(Vec3::new(0.0, 1.0, -2.0), Quat::from_rotation_y(0.7));
        let anchor = scene.create_anchor(pose);
        scene.attach_child(NodeRef::Root, NodeRef::Anchor(anchor));
        let node = scene.create_node();
        scene.attach_child(NodeRef::Anchor(anchor), NodeRef::Node(node));
        let local = LocalTransform::new(Vec3::new(0.0, -10.0, 0.0), Quat::IDENTITY, 0.5);
        scene.set_local_transform(node, local);

        let world = scene.world_transform(node).unwrap();
        assert!(world.abs_diff_eq(pose.to_mat4() * local.to_mat4(), 1e-5));
        assert_eq!(scene.mutations(), 5);
    }

    #[test]
    fn test_detached_anchor_has_no_world_transform() {
        let mut scene = InMemoryScene::new();
        let anchor = scene.create_anchor(Pose::IDENTITY);
        let node = scene.create_node();
        scene.attach_child(NodeRef::Anchor(anchor), NodeRef::Node(node));

        assert!(!scene.is_anchor_attached(anchor));
        assert!(scene.world_transform(node).is_none());
    }

    #[test]
    fn test_unknown_handles_are_ignored() {
        let mut scene = InMemoryScene::new();
        scene.set_enabled(NodeId(42), true);
        scene.set_selected(NodeId(42));
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_describe_lists_tree() {
        let mut scene = InMemoryScene::new();
        let anchor = scene.create_anchor(Pose::IDENTITY);
        scene.attach_child(NodeRef::Root, NodeRef::Anchor(anchor));
        let node = scene.create_node();
        scene.attach_child(NodeRef::Anchor(anchor), NodeRef::Node(node));
        scene.set_selected(node);

        let text = scene.describe();
        assert!(text.starts_with("root\n"));
        assert!(text.contains("anchor#1"));
        assert!(text.contains("node#2 enabled=false selected=true renderable=none"));
    }
}
