//! # Collision Resolver
//!
//! Collision-aware free-space placement for 3D scene editors and games.
//!
//! When an object is added or moved programmatically it may interpenetrate
//! its neighbors. This crate detects such overlaps and searches nearby
//! candidate positions (in a spiral, radial, or grid pattern) until a
//! collision-free placement is found, within a bounded radius.
//!
//! ## Architecture
//!
//! ```text
//! Host scene (storage, transforms, exact shape tests)
//!      ↑ SceneProvider
//! CollisionDetector ── BoundsCache (100 ms freshness window)
//!      ↑ hypothetical-position tests
//! SearchStrategy (spiral | radial | grid)
//!      ↑
//! CollisionResolver (config, events, metrics)
//! ```
//!
//! `resolve` detects at the current position, returns immediately when
//! clear, and otherwise drives the configured search strategy, which
//! calls back into detection at hypothetical positions. The first
//! collision-free candidate (optionally grid-snapped) wins; an exhausted
//! search leaves the object untouched.
//!
//! Everything is synchronous and single-threaded: one resolver instance
//! per scene, exactly one logical caller at a time.
//!
//! ## Quick Start
//!
//! ```
//! use collision_resolver::prelude::*;
//!
//! let mut scene = SimpleScene::new();
//! let _table = scene.add_object(
//!     "table_01",
//!     Vec3::new(0.0, 0.5, 0.0),
//!     Vec3::new(1.0, 0.5, 1.0),
//! );
//! let crate_id = scene.add_object(
//!     "crate_01",
//!     Vec3::new(0.2, 0.5, 0.0),
//!     Vec3::new(0.5, 0.5, 0.5),
//! );
//!
//! let mut resolver = CollisionResolver::new();
//! let outcome = resolver.resolve_collisions(&mut scene, crate_id, &[], None);
//!
//! assert!(outcome.resolved);
//! assert!(outcome.distance_moved > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod foundation;
pub mod resolver;
pub mod scene;
pub mod search;

pub use config::{ConfigPatch, ResolutionConfig, ResolutionPriority, SearchPattern};
pub use resolver::{CollisionResolver, ResolutionOutcome};

/// Common imports for library users
pub mod prelude {
    pub use crate::collision::{CollisionDetail, DetectionReport, AABB};
    pub use crate::config::{ConfigPatch, ResolutionConfig, ResolutionPriority, SearchPattern};
    pub use crate::diagnostics::{CollisionEvent, CollisionEventKind, PerformanceMetrics};
    pub use crate::foundation::math::Vec3;
    pub use crate::resolver::{CollisionResolver, ResolutionOutcome};
    pub use crate::scene::{ObjectId, SceneProvider, SimpleScene};
}
