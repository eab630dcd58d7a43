//! Baseline in-memory scene
//!
//! Linear-scan implementation of [`SceneProvider`] backed by a hash map.
//! Sufficient for tests and small tool scenes; applications with a real
//! scene graph implement the trait over their own storage instead.
//!
//! Objects are axis-aligned boxes, so the "exact" intersection test and
//! the bounding-box test coincide here. Hosts with richer shapes supply
//! their own narrow-phase test through the trait.

use crate::collision::AABB;
use crate::foundation::math::Vec3;
use crate::scene::{ObjectId, SceneProvider};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct SimpleObject {
    name: String,
    position: Vec3,
    half_extents: Vec3,
    visible: bool,
    enabled: bool,
}

impl SimpleObject {
    fn bounds(&self) -> AABB {
        AABB::from_center_extents(self.position, self.half_extents)
    }
}

/// In-memory scene of axis-aligned box objects.
#[derive(Debug, Default)]
pub struct SimpleScene {
    objects: HashMap<ObjectId, SimpleObject>,
    next_id: u64,
}

impl SimpleScene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box object and return its identifier.
    ///
    /// The object's category is derived from `name` (first `'_'` segment,
    /// lowercased). New objects are visible and enabled.
    pub fn add_object(&mut self, name: &str, position: Vec3, half_extents: Vec3) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            SimpleObject {
                name: name.to_string(),
                position,
                half_extents,
                visible: true,
                enabled: true,
            },
        );
        id
    }

    /// Remove an object from the scene.
    pub fn remove_object(&mut self, id: ObjectId) {
        self.objects.remove(&id);
    }

    /// Set an object's visibility flag.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.visible = visible;
        }
    }

    /// Set an object's enabled flag.
    pub fn set_enabled(&mut self, id: ObjectId, enabled: bool) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.enabled = enabled;
        }
    }

    /// Get the number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene contains no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneProvider for SimpleScene {
    fn object_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        // Deterministic enumeration order
        ids.sort_unstable();
        ids
    }

    fn name(&self, id: ObjectId) -> Option<String> {
        self.objects.get(&id).map(|object| object.name.clone())
    }

    fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.get(&id).map(|object| object.position)
    }

    fn set_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.position = position;
        }
    }

    fn is_visible(&self, id: ObjectId) -> bool {
        self.objects.get(&id).is_some_and(|object| object.visible)
    }

    fn is_enabled(&self, id: ObjectId) -> bool {
        self.objects.get(&id).is_some_and(|object| object.enabled)
    }

    fn world_bounds(&self, id: ObjectId) -> Option<(Vec3, Vec3)> {
        self.objects.get(&id).map(|object| {
            let bounds = object.bounds();
            (bounds.min, bounds.max)
        })
    }

    fn shapes_intersect(&self, a: ObjectId, b: ObjectId) -> bool {
        match (self.objects.get(&a), self.objects.get(&b)) {
            (Some(obj_a), Some(obj_b)) => obj_a.bounds().intersects(&obj_b.bounds()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query_object() {
        let mut scene = SimpleScene::new();
        let id = scene.add_object("Crate_01", Vec3::new(1.0, 0.5, -2.0), Vec3::new(0.5, 0.5, 0.5));

        assert_eq!(scene.len(), 1);
        assert!(scene.contains(id));
        assert_eq!(scene.category(id).as_deref(), Some("crate"));
        assert!(scene.is_visible(id));
        assert!(scene.is_enabled(id));

        let (min, max) = scene.world_bounds(id).unwrap();
        assert_eq!(min, Vec3::new(0.5, 0.0, -2.5));
        assert_eq!(max, Vec3::new(1.5, 1.0, -1.5));
    }

    #[test]
    fn test_set_position_moves_bounds() {
        let mut scene = SimpleScene::new();
        let id = scene.add_object("box_01", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));

        scene.set_position(id, Vec3::new(10.0, 0.0, 0.0));

        let (min, max) = scene.world_bounds(id).unwrap();
        assert_eq!(min, Vec3::new(9.0, -1.0, -1.0));
        assert_eq!(max, Vec3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_shapes_intersect_for_boxes() {
        let mut scene = SimpleScene::new();
        let a = scene.add_object("a", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = scene.add_object("b", Vec3::new(1.5, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let c = scene.add_object("c", Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(scene.shapes_intersect(a, b));
        assert!(!scene.shapes_intersect(a, c));
        assert!(!scene.shapes_intersect(a, ObjectId::new(99)));
    }

    #[test]
    fn test_removed_object_is_absent() {
        let mut scene = SimpleScene::new();
        let id = scene.add_object("a", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        scene.remove_object(id);

        assert!(!scene.contains(id));
        assert!(scene.world_bounds(id).is_none());
        assert!(scene.is_empty());
    }
}
