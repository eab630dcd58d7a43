//! Collision resolution orchestrator
//!
//! [`CollisionResolver`] owns the configuration, the bounds cache (via
//! its detector), and the event/metrics logs, and drives the configured
//! search strategy. One resolver instance serves one scene; independent
//! scenes get independent resolvers. There is no process-wide state.
//!
//! `resolve_collisions` never force-places an object: when the search
//! radius is exhausted the object stays where it was and the outcome says
//! so.

use crate::collision::{CacheStats, CollisionDetector, DetectionReport};
use crate::config::{ConfigPatch, ResolutionConfig};
use crate::diagnostics::{
    CollisionEvent, CollisionEventKind, EventLog, PerformanceMetrics, RunningAverage,
};
use crate::foundation::math::Vec3;
use crate::foundation::time::Stopwatch;
use crate::scene::{ObjectId, SceneProvider};
use crate::search::{strategy_for, SearchContext};
use serde::Serialize;
use std::time::Instant;

/// Result of one resolution call
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResolutionOutcome {
    /// Whether a collision-free position holds on return
    pub resolved: bool,
    /// Where the object was when the call started
    pub original_position: Vec3,
    /// Where the object is on return (equals the original unless moved)
    pub new_position: Vec3,
    /// Euclidean distance between original and new positions
    pub distance_moved: f32,
    /// Wall-clock duration of the call in milliseconds
    pub resolution_time_ms: f64,
    /// Positions evaluated, the current position included
    pub positions_tested: u32,
}

impl ResolutionOutcome {
    fn stationary(resolved: bool, position: Vec3, time_ms: f64, tested: u32) -> Self {
        Self {
            resolved,
            original_position: position,
            new_position: position,
            distance_moved: 0.0,
            resolution_time_ms: time_ms,
            positions_tested: tested,
        }
    }
}

/// Places objects into free space by detection and bounded search
///
/// See the [crate docs](crate) for the overall flow. All state is owned
/// by the instance; drop it and nothing lingers.
pub struct CollisionResolver {
    config: ResolutionConfig,
    detector: CollisionDetector,
    events: EventLog,
    resolution_times: RunningAverage,
    created_at: Instant,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionResolver {
    /// Create a resolver with the default configuration
    pub fn new() -> Self {
        Self::with_config(ResolutionConfig::default())
    }

    /// Create a resolver with a custom configuration (validated on entry)
    pub fn with_config(config: ResolutionConfig) -> Self {
        Self {
            config: config.validated(),
            detector: CollisionDetector::new(),
            events: EventLog::new(),
            resolution_times: RunningAverage::default(),
            created_at: Instant::now(),
        }
    }

    /// Create a resolver from a named configuration preset
    pub fn with_preset(name: &str) -> Self {
        Self::with_config(ResolutionConfig::preset(name))
    }

    /// Detect collisions for an object, optionally at a hypothetical
    /// position
    ///
    /// Purely observational: the object's real position is unchanged on
    /// return, even when `position` is supplied.
    pub fn detect_collisions(
        &mut self,
        scene: &mut dyn SceneProvider,
        id: ObjectId,
        position: Option<Vec3>,
        exclude_ids: &[ObjectId],
    ) -> DetectionReport {
        self.detector
            .detect(scene, id, position, exclude_ids, &self.config)
    }

    /// Move an object to a collision-free position if it overlaps anything
    ///
    /// The effective configuration is the owned one, shallow-merged with
    /// `config_override` when supplied. Returns immediately when
    /// resolution is disabled or the current position is already clear.
    /// On success the provider's position is updated to the found
    /// placement; on exhaustion the object is left untouched.
    pub fn resolve_collisions(
        &mut self,
        scene: &mut dyn SceneProvider,
        id: ObjectId,
        exclude_ids: &[ObjectId],
        config_override: Option<&ConfigPatch>,
    ) -> ResolutionOutcome {
        let watch = Stopwatch::start_new();
        let config = match config_override {
            Some(patch) => self.config.merged(patch).validated(),
            None => self.config.clone(),
        };

        let Some(original) = scene.position(id) else {
            return ResolutionOutcome::stationary(false, Vec3::zeros(), watch.elapsed_millis(), 0);
        };
        if !config.enabled {
            return ResolutionOutcome::stationary(false, original, watch.elapsed_millis(), 0);
        }

        let report = self.detector.detect(scene, id, None, exclude_ids, &config);
        if !report.has_collision {
            return ResolutionOutcome::stationary(true, original, watch.elapsed_millis(), 1);
        }

        self.push_event(
            id,
            CollisionEventKind::Detected,
            report.colliding_ids.clone(),
            Some(original),
        );

        let strategy = strategy_for(config.search_pattern);
        log::debug!(
            "resolving object {} with {} search ({} overlap(s))",
            id,
            strategy.name(),
            report.collisions.len()
        );

        let mut ctx = SearchContext::new(scene, &mut self.detector, id, exclude_ids, &config);
        let found = strategy.search(&mut ctx, original);
        let attempts = ctx.attempts();
        drop(ctx);

        let elapsed = watch.elapsed_millis();
        self.resolution_times.record(elapsed);

        match found {
            Some(position) => {
                scene.set_position(id, position);
                self.detector.invalidate(id);
                self.push_event(id, CollisionEventKind::Resolved, Vec::new(), Some(position));
                ResolutionOutcome {
                    resolved: true,
                    original_position: original,
                    new_position: position,
                    distance_moved: (position - original).magnitude(),
                    resolution_time_ms: elapsed,
                    positions_tested: attempts + 1,
                }
            }
            None => {
                log::debug!("object {}: search radius exhausted, leaving in place", id);
                self.push_event(id, CollisionEventKind::Unresolved, Vec::new(), Some(original));
                ResolutionOutcome::stationary(false, original, elapsed, attempts + 1)
            }
        }
    }

    /// Mark an object's cached bounds stale
    pub fn invalidate_cache(&mut self, id: ObjectId) {
        self.detector.invalidate(id);
    }

    /// Drop all cached bounds
    pub fn clear_cache(&mut self) {
        self.detector.clear_cache();
    }

    /// Bounds-cache hit/miss counters
    pub fn cache_stats(&self) -> CacheStats {
        self.detector.cache().stats()
    }

    /// Snapshot of the current configuration (not a live reference)
    pub fn config(&self) -> ResolutionConfig {
        self.config.clone()
    }

    /// Apply a partial configuration update (validated and clamped)
    pub fn update_config(&mut self, patch: &ConfigPatch) {
        self.config = self.config.merged(patch).validated();
    }

    /// Replace the whole configuration (validated and clamped)
    pub fn replace_config(&mut self, config: ResolutionConfig) {
        self.config = config.validated();
    }

    /// Snapshot of detection/resolution timing counters
    pub fn performance_metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::from_averages(self.detector.detection_times(), &self.resolution_times)
    }

    /// Most recent collision events, oldest first
    pub fn collision_events(&self, limit: Option<usize>) -> Vec<CollisionEvent> {
        self.events.recent(limit)
    }

    /// Append a caller-constructed event to the log
    pub fn log_collision_event(&mut self, event: CollisionEvent) {
        self.events.push(event);
    }

    /// Seconds elapsed since this resolver was created
    ///
    /// Timestamp source for caller-constructed events.
    pub fn timestamp_secs(&self) -> f64 {
        self.created_at.elapsed().as_secs_f64()
    }

    fn push_event(
        &mut self,
        id: ObjectId,
        kind: CollisionEventKind,
        colliding: Vec<ObjectId>,
        position: Option<Vec3>,
    ) {
        self.events.push(CollisionEvent {
            timestamp_secs: self.created_at.elapsed().as_secs_f64(),
            object_id: id,
            kind,
            colliding,
            position,
        });
    }
}
