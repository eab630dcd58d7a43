//! Concentric-ring radial search
//!
//! Tests 8 equally spaced angular points on each ring, ring radius
//! growing by `search_step_size` out to the search radius. With vertical
//! search enabled, each horizontal point is followed by its `±vertical_
//! step_size` offsets before the next angle. First free candidate wins in
//! ring, then angle, then vertical-offset order.

use crate::foundation::math::Vec3;
use crate::search::{SearchContext, SearchStrategy};
use std::f32::consts::TAU;

const POINTS_PER_RING: u32 = 8;

/// Concentric rings of 8 angular points
pub struct RadialSearch;

impl SearchStrategy for RadialSearch {
    fn name(&self) -> &'static str {
        "radial"
    }

    fn search(&self, ctx: &mut SearchContext<'_>, center: Vec3) -> Option<Vec3> {
        let step = ctx.config().search_step_size;
        let max_distance = ctx.config().max_search_distance;
        let vertical = ctx.config().search_vertical;
        let vertical_step = ctx.config().vertical_step_size;

        let rings = (max_distance / step).floor() as u32;
        for ring in 1..=rings {
            let radius = ring as f32 * step;
            for point in 0..POINTS_PER_RING {
                let angle = point as f32 / POINTS_PER_RING as f32 * TAU;
                let candidate = Vec3::new(
                    center.x + angle.cos() * radius,
                    center.y,
                    center.z + angle.sin() * radius,
                );
                if ctx.is_position_free(candidate) {
                    return Some(ctx.finalize(candidate));
                }
                if !vertical {
                    continue;
                }
                for offset in [vertical_step, -vertical_step] {
                    let lifted = Vec3::new(candidate.x, candidate.y + offset, candidate.z);
                    if (lifted - center).magnitude() > max_distance {
                        continue;
                    }
                    if ctx.is_position_free(lifted) {
                        return Some(ctx.finalize(lifted));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionDetector;
    use crate::config::ResolutionConfig;
    use crate::scene::{ObjectId, SimpleScene};
    use crate::search::SearchContext;

    fn run_search(
        scene: &mut SimpleScene,
        target: ObjectId,
        config: &ResolutionConfig,
    ) -> (Option<Vec3>, u32) {
        let mut detector = CollisionDetector::new();
        let mut ctx = SearchContext::new(scene, &mut detector, target, &[], config);
        let found = RadialSearch.search(&mut ctx, Vec3::zeros());
        (found, ctx.attempts())
    }

    #[test]
    fn test_first_ring_point_wins() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.2, 0.2, 0.2));
        scene.add_object(
            "box_01",
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.1, 0.1, 0.1),
        );
        let config = ResolutionConfig::default();

        let (found, attempts) = run_search(&mut scene, target, &config);
        // Ring 1, angle 0 is the +x point and already clears
        assert_eq!(found, Some(Vec3::new(0.5, 0.0, 0.0)));
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_vertical_offsets_tested_per_point() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.4, 0.4, 0.4));
        // Slab blocks the whole plane at y = 0; one vertical step clears
        scene.add_object("block_01", Vec3::zeros(), Vec3::new(30.0, 0.5, 30.0));
        let config = ResolutionConfig::default();

        let (found, attempts) = run_search(&mut scene, target, &config);
        // Ring 1, angle 0, upward offset
        let expected = Vec3::new(0.5, 1.0, 0.0);
        assert_eq!(found, Some(expected));
        assert_eq!(attempts, 2);
    }

    #[test]
    fn test_exhausted_search_is_bounded() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.4, 0.4, 0.4));
        // Nothing clears anywhere inside the search sphere
        scene.add_object("block_01", Vec3::zeros(), Vec3::new(40.0, 40.0, 40.0));
        let config = ResolutionConfig::default();

        let (found, attempts) = run_search(&mut scene, target, &config);
        assert_eq!(found, None);
        let rings = (config.max_search_distance / config.search_step_size) as u32;
        assert!(attempts <= rings * POINTS_PER_RING * 3);
    }

    #[test]
    fn test_result_never_exceeds_radius() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.4, 0.4, 0.4));
        scene.add_object("block_01", Vec3::zeros(), Vec3::new(4.0, 4.0, 4.0));
        let config = ResolutionConfig::default();

        let (found, _) = run_search(&mut scene, target, &config);
        let position = found.unwrap();
        assert!(position.magnitude() <= config.max_search_distance + 1e-3);
    }
}
