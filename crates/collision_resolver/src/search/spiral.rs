//! Expanding square spiral search
//!
//! Walks an expanding square spiral in the horizontal plane: unit steps
//! of `search_step_size`, a 90° counter-clockwise turn at the end of each
//! leg, and the leg length growing by one step every two turns. A pass
//! ends as soon as the walk leaves its distance budget.
//!
//! With vertical search enabled, additional spiral passes run at stacked
//! offsets `±k · vertical_step_size`, above before below at each `k`.
//! Each offset pass gets a reduced horizontal budget so no candidate
//! leaves the overall search sphere.

use crate::config::ResolutionPriority;
use crate::foundation::math::Vec3;
use crate::search::{SearchContext, SearchStrategy};

/// Expanding square spiral in the horizontal plane
pub struct SpiralSearch;

impl SearchStrategy for SpiralSearch {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn search(&self, ctx: &mut SearchContext<'_>, center: Vec3) -> Option<Vec3> {
        let vertical = ctx.config().search_vertical;
        let priority = ctx.config().resolution_priority;
        let max_distance = ctx.config().max_search_distance;

        if !vertical || priority == ResolutionPriority::Horizontal {
            return horizontal_pass(ctx, center, max_distance, false);
        }
        match priority {
            ResolutionPriority::Vertical => vertical_passes(ctx, center),
            _ => {
                if let Some(found) = horizontal_pass(ctx, center, max_distance, false) {
                    return Some(found);
                }
                vertical_passes(ctx, center)
            }
        }
    }
}

/// One spiral pass at `origin`'s height, bounded by `budget` in-plane.
///
/// `test_origin` additionally tests the origin itself before spiraling;
/// used by offset passes, where the origin is a new candidate.
fn horizontal_pass(
    ctx: &mut SearchContext<'_>,
    origin: Vec3,
    budget: f32,
    test_origin: bool,
) -> Option<Vec3> {
    if test_origin && ctx.is_position_free(origin) {
        return Some(ctx.finalize(origin));
    }

    let step = ctx.config().search_step_size;
    // Walk on an integer grid to keep the spiral free of float drift
    let (mut gx, mut gz) = (0i32, 0i32);
    let (mut dx, mut dz) = (1i32, 0i32);
    let mut leg = 1u32;
    let mut steps_in_leg = 0u32;
    let mut turns = 0u32;

    loop {
        gx += dx;
        gz += dz;
        steps_in_leg += 1;

        let offset_x = gx as f32 * step;
        let offset_z = gz as f32 * step;
        if (offset_x * offset_x + offset_z * offset_z).sqrt() > budget {
            // The walk has left the search disc
            return None;
        }

        let candidate = Vec3::new(origin.x + offset_x, origin.y, origin.z + offset_z);
        if ctx.is_position_free(candidate) {
            return Some(ctx.finalize(candidate));
        }

        if steps_in_leg == leg {
            steps_in_leg = 0;
            // 90° counter-clockwise in the x-z plane
            let previous_dx = dx;
            dx = -dz;
            dz = previous_dx;
            turns += 1;
            if turns % 2 == 0 {
                leg += 1;
            }
        }
    }
}

/// Spiral passes at stacked vertical offsets, above before below.
fn vertical_passes(ctx: &mut SearchContext<'_>, center: Vec3) -> Option<Vec3> {
    let vertical_step = ctx.config().vertical_step_size;
    let max_distance = ctx.config().max_search_distance;

    let mut level = 1u32;
    loop {
        let rise = level as f32 * vertical_step;
        if rise > max_distance {
            return None;
        }
        // Remaining in-plane budget inside the search sphere
        let budget = (max_distance * max_distance - rise * rise).sqrt();
        for sign in [1.0f32, -1.0] {
            let origin = Vec3::new(center.x, center.y + sign * rise, center.z);
            if let Some(found) = horizontal_pass(ctx, origin, budget, true) {
                return Some(found);
            }
        }
        level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionDetector;
    use crate::config::ResolutionConfig;
    use crate::scene::{ObjectId, SimpleScene};
    use crate::search::SearchContext;

    // All tests place the target at the origin and search from there.
    fn run_search(
        scene: &mut SimpleScene,
        target: ObjectId,
        config: &ResolutionConfig,
    ) -> (Option<Vec3>, u32) {
        let mut detector = CollisionDetector::new();
        let mut ctx = SearchContext::new(scene, &mut detector, target, &[], config);
        let found = SpiralSearch.search(&mut ctx, Vec3::zeros());
        (found, ctx.attempts())
    }

    #[test]
    fn test_first_clearing_candidate_wins() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.2, 0.2, 0.2));
        scene.add_object(
            "box_01",
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.1, 0.1, 0.1),
        );
        let config = ResolutionConfig::default();

        let (found, attempts) = run_search(&mut scene, target, &config);
        // First spiral step (+x) already clears the blocking box
        assert_eq!(found, Some(Vec3::new(0.5, 0.0, 0.0)));
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_vertical_priority_stacks_upward() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.4, 0.4, 0.4));
        // Broad slab: every in-plane candidate collides, straight up is free
        scene.add_object("block_01", Vec3::zeros(), Vec3::new(30.0, 0.5, 30.0));
        let config = ResolutionConfig {
            resolution_priority: ResolutionPriority::Vertical,
            ..ResolutionConfig::default()
        };

        let (found, _) = run_search(&mut scene, target, &config);
        assert_eq!(found, Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_horizontal_priority_never_leaves_plane() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.4, 0.4, 0.4));
        // Slab wider than the whole search disc; only a vertical move
        // could resolve, and horizontal priority must not take it
        scene.add_object("block_01", Vec3::zeros(), Vec3::new(30.0, 0.5, 30.0));
        let config = ResolutionConfig::default();

        let (found, attempts) = run_search(&mut scene, target, &config);
        assert_eq!(found, None);
        // Bounded by the spiral leaving the search disc
        let max_cells = (2 * 20 + 2) * (2 * 20 + 2);
        assert!(attempts <= max_cells);
    }

    #[test]
    fn test_nearest_priority_falls_back_to_vertical() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.4, 0.4, 0.4));
        scene.add_object("block_01", Vec3::zeros(), Vec3::new(30.0, 0.5, 30.0));
        let config = ResolutionConfig {
            resolution_priority: ResolutionPriority::Nearest,
            ..ResolutionConfig::default()
        };

        let (found, _) = run_search(&mut scene, target, &config);
        // In-plane pass exhausts, then the first upward offset clears
        assert_eq!(found, Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_result_within_search_radius() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.4, 0.4, 0.4));
        scene.add_object("block_01", Vec3::zeros(), Vec3::new(3.0, 3.0, 3.0));
        let config = ResolutionConfig::default();

        let (found, _) = run_search(&mut scene, target, &config);
        let position = found.unwrap();
        assert!(position.magnitude() <= config.max_search_distance + 1e-3);
    }

    #[test]
    fn test_grid_snap_applies_to_result() {
        let mut scene = SimpleScene::new();
        let target = scene.add_object("crate_01", Vec3::zeros(), Vec3::new(0.2, 0.2, 0.2));
        scene.add_object(
            "box_01",
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.1, 0.1, 0.1),
        );
        let config = ResolutionConfig {
            search_step_size: 0.3,
            respect_grid_snap: true,
            ..ResolutionConfig::default()
        }
        .validated();

        let (found, _) = run_search(&mut scene, target, &config);
        let position = found.unwrap();
        for coordinate in [position.x, position.y, position.z] {
            let remainder = (coordinate / 0.5).round() * 0.5 - coordinate;
            assert!(remainder.abs() < 1e-5);
        }
    }
}
