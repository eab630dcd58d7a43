//! Candidate-position search
//!
//! Strategies enumerate candidate positions outward from a center and
//! stop at the first collision-free one, or give up once the configured
//! search radius is exhausted. Every candidate is tested through the
//! detector's hypothetical-position protocol, so the target's real
//! position is never visibly disturbed by a search.
//!
//! The strategy set is closed and small; implementations are selected
//! from the configured [`SearchPattern`](crate::config::SearchPattern)
//! by [`strategy_for`].

mod grid;
mod radial;
mod spiral;

pub use grid::GridSearch;
pub use radial::RadialSearch;
pub use spiral::SpiralSearch;

use crate::collision::CollisionDetector;
use crate::config::{ResolutionConfig, SearchPattern, GRID_SNAP_UNIT};
use crate::foundation::math::{utils, Vec3};
use crate::scene::{ObjectId, SceneProvider};

/// Per-search state shared by all strategies
///
/// Bundles the scene, the detector, the target and its exclusions, the
/// effective configuration, and a running attempt counter for
/// diagnostics.
pub struct SearchContext<'a> {
    scene: &'a mut dyn SceneProvider,
    detector: &'a mut CollisionDetector,
    target: ObjectId,
    exclude_ids: &'a [ObjectId],
    config: &'a ResolutionConfig,
    attempts: u32,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(
        scene: &'a mut dyn SceneProvider,
        detector: &'a mut CollisionDetector,
        target: ObjectId,
        exclude_ids: &'a [ObjectId],
        config: &'a ResolutionConfig,
    ) -> Self {
        Self {
            scene,
            detector,
            target,
            exclude_ids,
            config,
            attempts: 0,
        }
    }

    /// The effective configuration for this search.
    pub fn config(&self) -> &ResolutionConfig {
        self.config
    }

    /// Test whether the target would be collision-free at `candidate`.
    ///
    /// Counts as one attempt and runs a full hypothetical-position
    /// detection.
    pub fn is_position_free(&mut self, candidate: Vec3) -> bool {
        self.attempts += 1;
        log::trace!(
            "attempt {}: testing ({:.2}, {:.2}, {:.2})",
            self.attempts,
            candidate.x,
            candidate.y,
            candidate.z
        );
        let report = self.detector.detect(
            self.scene,
            self.target,
            Some(candidate),
            self.exclude_ids,
            self.config,
        );
        !report.has_collision
    }

    /// Apply the grid-snap policy to a found position.
    pub fn finalize(&self, candidate: Vec3) -> Vec3 {
        if self.config.respect_grid_snap {
            utils::snap_vec(candidate, GRID_SNAP_UNIT)
        } else {
            candidate
        }
    }

    /// Number of candidate positions tested so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// A candidate-position enumeration order
///
/// Implementations must terminate within a bounded number of candidate
/// evaluations derived from `max_search_distance / search_step_size` and
/// must never move the target except through the context's hypothetical
/// tests.
pub trait SearchStrategy {
    /// Strategy name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Search outward from `center`; `Some` is the first collision-free
    /// position found (snapped per config), `None` means the radius was
    /// exhausted.
    fn search(&self, ctx: &mut SearchContext<'_>, center: Vec3) -> Option<Vec3>;
}

/// Select the strategy implementation for a configured pattern.
pub fn strategy_for(pattern: SearchPattern) -> &'static dyn SearchStrategy {
    match pattern {
        SearchPattern::Spiral => &SpiralSearch,
        SearchPattern::Radial => &RadialSearch,
        SearchPattern::Grid => &GridSearch,
    }
}
