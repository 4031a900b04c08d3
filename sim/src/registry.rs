//! Registries linking scene nodes to physics bodies and pointer targets.

use std::collections::HashMap;

use crate::physics::rapier3d::prelude::RigidBodyHandle;
use crate::scene::NodeId;

/// How a pair is synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Renderable written once at creation.
    Static,
    /// Renderable overwritten from the body every frame.
    Dynamic,
}

/// A scene node and the physics body it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRenderablePair {
    pub node: NodeId,
    pub body: RigidBodyHandle,
    pub motion: Motion,
}

impl BodyRenderablePair {
    pub fn is_dynamic(&self) -> bool {
        self.motion == Motion::Dynamic
    }
}

/// Bidirectional node ↔ body table.
///
/// Pairs are stored densely; both lookup maps index into the dense list and
/// are patched on swap-removal.
#[derive(Debug, Default)]
pub struct RigidBodyRegistry {
    pairs: Vec<BodyRenderablePair>,
    by_node: HashMap<NodeId, usize>,
    by_body: HashMap<RigidBodyHandle, usize>,
}

impl RigidBodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pair. A node or body that is already paired is rejected
    /// and `false` is returned.
    pub fn insert(&mut self, pair: BodyRenderablePair) -> bool {
        if self.by_node.contains_key(&pair.node) || self.by_body.contains_key(&pair.body) {
            log::warn!(
                "Refusing duplicate registry entry for node {:?} / body {:?}",
                pair.node,
                pair.body
            );
            return false;
        }
        let index = self.pairs.len();
        self.pairs.push(pair);
        self.by_node.insert(pair.node, index);
        self.by_body.insert(pair.body, index);
        true
    }

    /// Removes the pair owning `node`.
    pub fn remove_by_node(&mut self, node: NodeId) -> Option<BodyRenderablePair> {
        let index = *self.by_node.get(&node)?;
        let pair = self.pairs.swap_remove(index);
        self.by_node.remove(&pair.node);
        self.by_body.remove(&pair.body);
        if let Some(moved) = self.pairs.get(index) {
            self.by_node.insert(moved.node, index);
            self.by_body.insert(moved.body, index);
        }
        Some(pair)
    }

    pub fn body_of(&self, node: NodeId) -> Option<RigidBodyHandle> {
        self.by_node.get(&node).map(|&i| self.pairs[i].body)
    }

    pub fn node_of(&self, body: RigidBodyHandle) -> Option<NodeId> {
        self.by_body.get(&body).map(|&i| self.pairs[i].node)
    }

    pub fn get(&self, node: NodeId) -> Option<&BodyRenderablePair> {
        self.by_node.get(&node).map(|&i| &self.pairs[i])
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.by_node.contains_key(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyRenderablePair> {
        self.pairs.iter()
    }

    /// Pairs synchronized every frame.
    pub fn dynamic_pairs(&self) -> impl Iterator<Item = &BodyRenderablePair> {
        self.pairs.iter().filter(|p| p.is_dynamic())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A node eligible for pointer interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveObject {
    pub node: NodeId,
    /// Navigation target; empty for hover-only objects.
    pub target: String,
}

/// Append-only list of pickable nodes for the session.
#[derive(Debug, Default)]
pub struct InteractiveRegistry {
    objects: Vec<InteractiveObject>,
}

impl InteractiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: NodeId, target: impl Into<String>) {
        let target = target.into();
        log::debug!("Interactive node {node:?} -> {target:?}");
        self.objects.push(InteractiveObject { node, target });
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.objects.iter().any(|o| o.node == node)
    }

    /// Where clicking `node` should navigate. `None` for non-interactive
    /// nodes and for objects without a target.
    pub fn navigation_target(&self, node: NodeId) -> Option<&str> {
        self.objects
            .iter()
            .find(|o| o.node == node)
            .map(|o| o.target.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractiveObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Renderable, SceneGraph};

    fn nodes(n: usize) -> Vec<NodeId> {
        let mut scene = SceneGraph::new();
        (0..n)
            .map(|i| scene.add(Renderable::sphere(format!("n{i}"), 1.0)))
            .collect()
    }

    fn body(i: u32) -> RigidBodyHandle {
        RigidBodyHandle::from_raw_parts(i, 0)
    }

    #[test]
    fn lookup_both_directions() {
        let ids = nodes(2);
        let mut registry = RigidBodyRegistry::new();
        assert!(registry.insert(BodyRenderablePair {
            node: ids[0],
            body: body(0),
            motion: Motion::Static,
        }));
        assert!(registry.insert(BodyRenderablePair {
            node: ids[1],
            body: body(1),
            motion: Motion::Dynamic,
        }));

        assert_eq!(registry.body_of(ids[1]), Some(body(1)));
        assert_eq!(registry.node_of(body(0)), Some(ids[0]));
        assert_eq!(registry.dynamic_pairs().count(), 1);
    }

    #[test]
    fn duplicate_rejected() {
        let ids = nodes(2);
        let mut registry = RigidBodyRegistry::new();
        let pair = BodyRenderablePair {
            node: ids[0],
            body: body(0),
            motion: Motion::Static,
        };
        assert!(registry.insert(pair));
        assert!(!registry.insert(pair));
        assert!(!registry.insert(BodyRenderablePair {
            node: ids[1],
            body: body(0),
            motion: Motion::Static,
        }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn swap_remove_keeps_maps_consistent() {
        let ids = nodes(3);
        let mut registry = RigidBodyRegistry::new();
        for (i, node) in ids.iter().enumerate() {
            registry.insert(BodyRenderablePair {
                node: *node,
                body: body(i as u32),
                motion: Motion::Dynamic,
            });
        }

        let removed = registry.remove_by_node(ids[0]).unwrap();
        assert_eq!(removed.body, body(0));
        assert!(!registry.contains_node(ids[0]));
        assert_eq!(registry.node_of(body(0)), None);
        // The last pair moved into slot 0.
        assert_eq!(registry.body_of(ids[2]), Some(body(2)));
        assert_eq!(registry.node_of(body(2)), Some(ids[2]));

        assert!(registry.remove_by_node(ids[2]).is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(ids[1]).unwrap().body, body(1));
    }

    #[test]
    fn interactive_targets() {
        let ids = nodes(3);
        let mut interactive = InteractiveRegistry::new();
        interactive.push(ids[0], "https://github.com/");
        interactive.push(ids[1], "");

        assert_eq!(interactive.len(), 2);
        assert_eq!(
            interactive.navigation_target(ids[0]),
            Some("https://github.com/")
        );
        assert!(interactive.contains(ids[1]));
        assert_eq!(interactive.navigation_target(ids[1]), None);
        assert!(!interactive.contains(ids[2]));
    }
}
