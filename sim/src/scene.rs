//! Scene graph handed to the renderer each frame.
//!
//! A flat arena of [`Renderable`] nodes addressed by generational
//! [`NodeId`]s. Nodes know nothing about physics: which node mirrors which
//! body is recorded in the rigid body registry.

use marble_core::math::{QUAT_IDENTITY, Quat, Vec3};

use crate::textures::TextureHandle;

/// Stable identifier of a scene node. A removed node's id is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Slot index inside the scene arena.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// World transform of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation in world units.
    pub translation: Vec3,
    /// Rotation as a quaternion.
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::new(0.0, 0.0, 0.0),
        rotation: QUAT_IDENTITY,
    };

}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Geometry description for the external renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshShape {
    /// Axis-aligned box with full edge lengths.
    Box { size: Vec3 },
    Sphere { radius: f32 },
    /// Extruded text; the font collaborator builds the mesh.
    Text { content: String, size: f32 },
    /// Flat text lying on the floor.
    Label { content: String, size: f32 },
    /// Grid overlay of `divisions` cells across `size` units.
    Grid { size: f32, divisions: u32 },
}

/// A drawable scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub name: String,
    pub transform: Transform,
    pub mesh: MeshShape,
    pub texture: Option<TextureHandle>,
    /// `0xRRGGBB`.
    pub color: Option<u32>,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    pub cast_shadow: bool,
}

impl Renderable {
    pub fn new(name: impl Into<String>, mesh: MeshShape) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh,
            texture: None,
            color: None,
            opacity: 1.0,
            cast_shadow: false,
        }
    }

    /// Box mesh sized by its full edge lengths.
    pub fn cuboid(name: impl Into<String>, size: Vec3) -> Self {
        Self::new(name, MeshShape::Box { size })
    }

    pub fn sphere(name: impl Into<String>, radius: f32) -> Self {
        Self::new(name, MeshShape::Sphere { radius })
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }
}

struct Slot {
    generation: u32,
    node: Option<Renderable>,
}

/// Arena of renderables.
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node and returns its id.
    pub fn add(&mut self, node: Renderable) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Removes a node, returning it if the id was live.
    pub fn remove(&mut self, id: NodeId) -> Option<Renderable> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Renderable> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Renderable> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Renderable)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }

    /// First live node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, n)| n.name == name).map(|(id, _)| id)
    }
}

impl std::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("nodes", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_get_remove() {
        let mut scene = SceneGraph::new();
        let id = scene.add(Renderable::sphere("ball", 2.0).with_translation(Vec3::new(0.0, 0.0, 50.0)));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(id).unwrap().transform.translation.z, 50.0);

        let removed = scene.remove(id).unwrap();
        assert_eq!(removed.name, "ball");
        assert!(scene.is_empty());
        assert!(scene.get(id).is_none());
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut scene = SceneGraph::new();
        let old = scene.add(Renderable::sphere("ball", 2.0));
        scene.remove(old);
        let new = scene.add(Renderable::sphere("ball", 2.0));

        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(!scene.contains(old));
        assert!(scene.contains(new));
    }

    #[test]
    fn iter_skips_removed() {
        let mut scene = SceneGraph::new();
        let a = scene.add(Renderable::cuboid("a", Vec3::new(1.0, 1.0, 1.0)));
        let b = scene.add(Renderable::cuboid("b", Vec3::new(1.0, 1.0, 1.0)));
        scene.remove(a);

        let ids: Vec<_> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b]);
        assert_eq!(scene.find_by_name("b"), Some(b));
        assert_eq!(scene.find_by_name("a"), None);
    }

    #[test]
    fn builder_clamps_opacity() {
        let node = Renderable::cuboid("wall", Vec3::new(0.125, 4.0, 175.0))
            .with_opacity(1.5)
            .with_color(0xffffff)
            .casting_shadow();
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.color, Some(0xffffff));
        assert!(node.cast_shadow);
    }
}
