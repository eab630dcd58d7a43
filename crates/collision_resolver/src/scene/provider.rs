//! Abstract scene access for placement queries
//!
//! This abstraction allows plugging the resolver into any scene backend
//! (retained scene graph, ECS, editor document) without changing the
//! collision code. The required capabilities are deliberately narrow:
//! object lookup, position read/write, visibility flags, world-space
//! bounding extents, and an exact shape-level intersection test.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an object owned by the external scene.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Create an identifier from a raw scene handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Derive an object's category label from its name.
///
/// The category is the first `'_'`-separated segment of the name,
/// lowercased: `"Wall_03"` → `"wall"`. Names without a separator are
/// their own category.
pub fn category_from_name(name: &str) -> String {
    let head = name.split('_').next().unwrap_or(name);
    head.to_ascii_lowercase()
}

/// Abstract interface to the host scene.
///
/// Implementations own all object state; the resolver only reads it,
/// except for position writes during hypothetical-position testing and
/// when committing a resolved placement.
pub trait SceneProvider {
    /// Enumerate all object identifiers currently in the scene.
    fn object_ids(&self) -> Vec<ObjectId>;

    /// Get an object's name, or `None` if the object is absent.
    fn name(&self, id: ObjectId) -> Option<String>;

    /// Get an object's current world position.
    fn position(&self, id: ObjectId) -> Option<Vec3>;

    /// Write an object's position.
    ///
    /// Implementations must refresh the object's world transform before
    /// returning, so that subsequent bounds and intersection queries see
    /// the new position. Writes to absent objects are ignored.
    fn set_position(&mut self, id: ObjectId, position: Vec3);

    /// Whether the object is currently visible.
    fn is_visible(&self, id: ObjectId) -> bool;

    /// Whether the object is currently enabled for interaction.
    fn is_enabled(&self, id: ObjectId) -> bool;

    /// Get an object's world-space axis-aligned bounding extents as
    /// `(min, max)` corners.
    fn world_bounds(&self, id: ObjectId) -> Option<(Vec3, Vec3)>;

    /// Exact shape-level intersection test between two objects.
    ///
    /// This is the authoritative overlap decision; the resolver only uses
    /// its cached boxes as a cheap pre-filter.
    fn shapes_intersect(&self, a: ObjectId, b: ObjectId) -> bool;

    /// Whether the scene currently contains `id`.
    fn contains(&self, id: ObjectId) -> bool {
        self.position(id).is_some()
    }

    /// Get an object's category label (see [`category_from_name`]).
    fn category(&self, id: ObjectId) -> Option<String> {
        self.name(id).map(|name| category_from_name(&name))
    }
}
