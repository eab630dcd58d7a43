//! Expanding grid-ring search
//!
//! Searches square rings of a horizontal grid around the center, layer by
//! layer: the full top and bottom edges left-to-right, then the left and
//! right columns excluding the corners already covered. Candidates beyond
//! the search radius are skipped. First free candidate in edge order wins.

use crate::foundation::math::{utils, Vec3};
use crate::search::{SearchContext, SearchStrategy};

/// Expanding square rings of a fixed grid
pub struct GridSearch;

impl SearchStrategy for GridSearch {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn search(&self, ctx: &mut SearchContext<'_>, center: Vec3) -> Option<Vec3> {
        let step = ctx.config().search_step_size;
        let max_distance = ctx.config().max_search_distance;
        let layers = (max_distance / step).ceil() as i32;

        for layer in 1..=layers {
            // Top and bottom edges, left to right
            for gz in [layer, -layer] {
                for gx in -layer..=layer {
                    if let Some(found) = try_cell(ctx, center, gx, gz, step, max_distance) {
                        return Some(found);
                    }
                }
            }
            // Left and right columns, corners already covered
            for gx in [-layer, layer] {
                for gz in (-layer + 1)..=(layer - 1) {
                    if let Some(found) = try_cell(ctx, center, gx, gz, step, max_distance) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }
}

fn try_cell(
    ctx: &mut SearchContext<'_>,
    center: Vec3,
    gx: i32,
    gz: i32,
    step: f32,
    max_distance: f32,
) -> Option<Vec3> {
    let candidate = Vec3::new(
        center.x + gx as f32 * step,
        center.y,
        center.z + gz as f32 * step,
    );
    if utils::horizontal_distance(candidate, center) > max_distance {
        return None;
    }
    if ctx.is_position_free(candidate) {
        return Some(ctx.finalize(candidate));
    }
    None
}
