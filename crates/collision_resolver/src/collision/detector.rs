//! Overlap detection for a target object
//!
//! Detection resolves the target, enumerates eligible neighbors, runs the
//! cached-AABB pre-check, and confirms survivors with the provider's
//! exact shape test. Results are ranked by estimated overlap volume,
//! largest first, so downstream decisions can address the worst offender.
//!
//! A detection at a hypothetical position temporarily relocates the live
//! object through the provider and restores it before returning on every
//! exit path; callers cannot observe the transient move.

use crate::collision::{BoundsCache, AABB};
use crate::config::ResolutionConfig;
use crate::diagnostics::RunningAverage;
use crate::foundation::math::Vec3;
use crate::foundation::time::Stopwatch;
use crate::scene::{ObjectId, SceneProvider};
use serde::Serialize;
use std::cmp::Ordering;

/// One confirmed overlap with a neighbor
#[derive(Debug, Clone, Serialize)]
pub struct CollisionDetail {
    /// The overlapping neighbor
    pub object_id: ObjectId,
    /// The neighbor's category label
    pub category: String,
    /// Distance between the two bounding-box centers
    pub center_distance: f32,
    /// Estimated intersection volume (severity ranking only)
    pub overlap_volume: f32,
}

/// Result of one detection query
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionReport {
    /// Whether any overlap was confirmed
    pub has_collision: bool,
    /// Overlapping neighbor ids, worst overlap first
    pub colliding_ids: Vec<ObjectId>,
    /// Full per-neighbor details, worst overlap first
    pub collisions: Vec<CollisionDetail>,
}

impl DetectionReport {
    /// Report for a query with nothing to check (absent target included).
    fn empty() -> Self {
        Self::default()
    }
}

/// Detects overlaps between a target object and its scene neighbors
#[derive(Debug, Default)]
pub struct CollisionDetector {
    cache: BoundsCache,
    detection_times: RunningAverage,
}

impl CollisionDetector {
    /// Create a detector with an empty bounds cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect overlaps for `target`, optionally at a hypothetical position
    ///
    /// An absent target yields an empty no-collision report rather than an
    /// error. Neighbors are skipped when listed in `exclude_ids`, when
    /// their category is excluded by `config`, or when invisible or
    /// disabled. Every call folds its duration into the detection metrics.
    pub fn detect(
        &mut self,
        scene: &mut dyn SceneProvider,
        target: ObjectId,
        hypothetical: Option<Vec3>,
        exclude_ids: &[ObjectId],
        config: &ResolutionConfig,
    ) -> DetectionReport {
        let watch = Stopwatch::start_new();
        let report = match hypothetical {
            Some(position) => self.detect_at(scene, target, position, exclude_ids, config),
            None => self.detect_current(scene, target, exclude_ids, config),
        };
        self.detection_times.record(watch.elapsed_millis());
        report
    }

    /// Mark an object's cached bounds stale
    pub fn invalidate(&mut self, id: ObjectId) {
        self.cache.invalidate(id);
    }

    /// Drop all cached bounds
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Read access to the bounds cache
    pub fn cache(&self) -> &BoundsCache {
        &self.cache
    }

    pub(crate) fn detection_times(&self) -> &RunningAverage {
        &self.detection_times
    }

    /// Detection with the target transiently moved to `position`.
    ///
    /// The original position is restored on every exit path, and the
    /// target's cache entry is invalidated afterwards so later queries
    /// never see bounds computed at the hypothetical position.
    fn detect_at(
        &mut self,
        scene: &mut dyn SceneProvider,
        target: ObjectId,
        position: Vec3,
        exclude_ids: &[ObjectId],
        config: &ResolutionConfig,
    ) -> DetectionReport {
        let report = with_position_at(scene, target, position, |scene| {
            self.cache.refresh(scene, target);
            self.detect_current(scene, target, exclude_ids, config)
        });
        self.cache.invalidate(target);
        report.unwrap_or_else(DetectionReport::empty)
    }

    fn detect_current(
        &mut self,
        scene: &dyn SceneProvider,
        target: ObjectId,
        exclude_ids: &[ObjectId],
        config: &ResolutionConfig,
    ) -> DetectionReport {
        let Some(target_bounds) = self.cache.get(scene, target) else {
            return DetectionReport::empty();
        };

        let mut collisions = Vec::new();
        for id in scene.object_ids() {
            if id == target || exclude_ids.contains(&id) {
                continue;
            }
            if !scene.is_visible(id) || !scene.is_enabled(id) {
                continue;
            }
            let category = scene.category(id).unwrap_or_default();
            if config.excludes_type(&category) {
                continue;
            }
            let Some(bounds) = self.cache.get(scene, id) else {
                continue;
            };
            // Cheap reject before the authoritative shape test
            if !target_bounds.intersects(&bounds) {
                continue;
            }
            if !scene.shapes_intersect(target, id) {
                continue;
            }
            collisions.push(detail_for(id, category, &target_bounds, &bounds));
        }

        // Largest estimated overlap first; stable sort keeps tie order
        collisions.sort_by(|a, b| {
            b.overlap_volume
                .partial_cmp(&a.overlap_volume)
                .unwrap_or(Ordering::Equal)
        });

        if !collisions.is_empty() {
            log::debug!("object {} overlaps {} neighbor(s)", target, collisions.len());
        }

        let colliding_ids = collisions.iter().map(|c| c.object_id).collect();
        DetectionReport {
            has_collision: !collisions.is_empty(),
            colliding_ids,
            collisions,
        }
    }
}

fn detail_for(
    id: ObjectId,
    category: String,
    target_bounds: &AABB,
    bounds: &AABB,
) -> CollisionDetail {
    CollisionDetail {
        object_id: id,
        category,
        center_distance: target_bounds.center_distance(bounds),
        overlap_volume: target_bounds.overlap_volume(bounds),
    }
}

/// Run `f` with `id` transiently moved to `position`.
///
/// The original position is restored before returning, so the mutation is
/// invisible to the caller. Returns `None` when the object is absent.
fn with_position_at<R>(
    scene: &mut dyn SceneProvider,
    id: ObjectId,
    position: Vec3,
    f: impl FnOnce(&mut dyn SceneProvider) -> R,
) -> Option<R> {
    let original = scene.position(id)?;
    scene.set_position(id, position);
    let result = f(scene);
    scene.set_position(id, original);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SimpleScene;
    use approx::assert_relative_eq;

    fn detect_current_position(
        detector: &mut CollisionDetector,
        scene: &mut SimpleScene,
        target: ObjectId,
    ) -> DetectionReport {
        detector.detect(scene, target, None, &[], &ResolutionConfig::default())
    }

    #[test]
    fn test_absent_target_is_no_collision() {
        let mut scene = SimpleScene::new();
        let mut detector = CollisionDetector::new();

        let report = detect_current_position(&mut detector, &mut scene, ObjectId::new(42));
        assert!(!report.has_collision);
        assert!(report.collisions.is_empty());
    }

    #[test]
    fn test_detects_overlapping_neighbor() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let wall = scene.add_object(
            "wall_01",
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let mut detector = CollisionDetector::new();

        let report = detect_current_position(&mut detector, &mut scene, target);
        assert!(report.has_collision);
        assert_eq!(report.colliding_ids, vec![wall]);
        assert_eq!(report.collisions[0].category, "wall");
        assert_relative_eq!(report.collisions[0].center_distance, 1.0);
    }

    #[test]
    fn test_collisions_sorted_by_overlap_volume() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let grazing = scene.add_object(
            "box_far",
            Vec3::new(1.8, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let deep = scene.add_object(
            "box_near",
            Vec3::new(0.2, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let mut detector = CollisionDetector::new();

        let report = detect_current_position(&mut detector, &mut scene, target);
        assert_eq!(report.colliding_ids, vec![deep, grazing]);
        assert!(report.collisions[0].overlap_volume > report.collisions[1].overlap_volume);
    }

    #[test]
    fn test_excluded_ids_and_flags_skip_neighbors() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let excluded = scene.add_object("box_a", Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let hidden = scene.add_object("box_b", Vec3::new(-0.5, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let disabled = scene.add_object("box_c", Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.0, 1.0, 1.0));
        scene.set_visible(hidden, false);
        scene.set_enabled(disabled, false);
        let mut detector = CollisionDetector::new();

        let report = detector.detect(
            &mut scene,
            target,
            None,
            &[excluded],
            &ResolutionConfig::default(),
        );
        assert!(!report.has_collision);
    }

    #[test]
    fn test_ground_category_excluded_by_default() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        scene.add_object(
            "ground_plane",
            Vec3::new(0.0, -0.9, 0.0),
            Vec3::new(50.0, 1.0, 50.0),
        );
        let mut detector = CollisionDetector::new();

        let report = detect_current_position(&mut detector, &mut scene, target);
        assert!(!report.has_collision);
    }

    #[test]
    fn test_hypothetical_detection_is_non_mutating() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        scene.add_object("wall_01", Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let mut detector = CollisionDetector::new();
        let config = ResolutionConfig::default();

        let before = scene.position(target).unwrap();
        let report = detector.detect(
            &mut scene,
            target,
            Some(Vec3::new(0.0, 0.0, 40.0)),
            &[],
            &config,
        );
        let after = scene.position(target).unwrap();

        assert!(!report.has_collision);
        assert_eq!(before, after);

        // Current position still collides and is not served from the
        // hypothetical-position box.
        let report = detector.detect(&mut scene, target, None, &[], &config);
        assert!(report.has_collision);
    }

    #[test]
    fn test_detection_metrics_advance() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let mut detector = CollisionDetector::new();

        detect_current_position(&mut detector, &mut scene, target);
        detect_current_position(&mut detector, &mut scene, target);
        assert_eq!(detector.detection_times().count(), 2);
    }
}
