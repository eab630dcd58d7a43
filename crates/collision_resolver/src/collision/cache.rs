//! Per-object bounding-volume cache
//!
//! Recomputing world-space bounds for every neighbor on every query is
//! the dominant cost of detection in a large scene. Entries here stay
//! valid for a short freshness window, so bursts of queries (one search
//! can test hundreds of candidate positions) reuse the same boxes.

use crate::collision::AABB;
use crate::scene::{ObjectId, SceneProvider};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a cached box is served without recomputation.
pub const BOUNDS_FRESHNESS_WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    bounds: AABB,
    computed_at: Instant,
    valid: bool,
}

/// Running cache effectiveness counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Queries served from a fresh entry without recomputation
    pub hits: u64,
    /// Queries that recomputed bounds (first query, stale, or invalidated)
    pub misses: u64,
}

/// Cache of world-space bounding boxes keyed by object id
///
/// Entries are created lazily on first query, refreshed when older than
/// the freshness window or explicitly invalidated, and removed only by
/// [`BoundsCache::clear`]. Single-threaded by design; no locking.
#[derive(Debug)]
pub struct BoundsCache {
    entries: HashMap<ObjectId, CacheEntry>,
    window: Duration,
    stats: CacheStats,
}

impl Default for BoundsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsCache {
    /// Create a cache with the standard freshness window
    pub fn new() -> Self {
        Self::with_window(BOUNDS_FRESHNESS_WINDOW)
    }

    /// Create a cache with a custom freshness window
    ///
    /// A zero window disables reuse entirely (every query recomputes).
    pub fn with_window(window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            window,
            stats: CacheStats::default(),
        }
    }

    /// Get an object's bounding box, recomputing only when necessary
    ///
    /// A valid entry younger than the freshness window is returned
    /// unchanged. Otherwise the box is recomputed from the provider's
    /// current world bounds and stored with a fresh timestamp. Returns
    /// `None` when the provider has no bounds for `id`.
    pub fn get(&mut self, scene: &dyn SceneProvider, id: ObjectId) -> Option<AABB> {
        if let Some(entry) = self.entries.get(&id) {
            if entry.valid && entry.computed_at.elapsed() < self.window {
                self.stats.hits += 1;
                return Some(entry.bounds);
            }
        }
        self.refresh(scene, id)
    }

    /// Recompute and store an object's bounding box unconditionally
    pub fn refresh(&mut self, scene: &dyn SceneProvider, id: ObjectId) -> Option<AABB> {
        self.stats.misses += 1;
        let (min, max) = scene.world_bounds(id)?;
        let bounds = AABB::new(min, max);
        self.entries.insert(
            id,
            CacheEntry {
                bounds,
                computed_at: Instant::now(),
                valid: true,
            },
        );
        Some(bounds)
    }

    /// Mark an entry stale without removing it
    ///
    /// The next `get` for this object recomputes.
    pub fn invalidate(&mut self, id: ObjectId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.valid = false;
        }
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running hit/miss counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
