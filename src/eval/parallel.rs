//! Batch field evaluation
//!
//! Sampling many points against one immutable snapshot. The snapshot is
//! shared read-only across rayon workers.

use crate::eval::eval;
use crate::types::FieldNode;
use glam::Vec2;
use rayon::prelude::*;

/// Evaluate a tree at multiple points (single-threaded)
#[inline]
pub fn eval_batch(root: Option<&FieldNode>, points: &[Vec2]) -> Vec<f32> {
    points.iter().map(|&p| eval(root, p)).collect()
}

/// Evaluate a tree at multiple points (parallel)
#[inline]
pub fn eval_batch_parallel(root: Option<&FieldNode>, points: &[Vec2]) -> Vec<f32> {
    points.par_iter().map(|&p| eval(root, p)).collect()
}

/// Sample a tree on a regular 2D grid.
///
/// Samples sit at cell centers of a `resolution × resolution` grid spanning
/// `[min, max]`. Rows are computed in parallel.
///
/// # Returns
/// Flattened grid of distances in row-major order: `x + y * resolution`
pub fn eval_grid(root: Option<&FieldNode>, min: Vec2, max: Vec2, resolution: usize) -> Vec<f32> {
    if resolution == 0 {
        return Vec::new();
    }
    let step = (max - min) / resolution as f32;

    (0..resolution)
        .into_par_iter()
        .flat_map_iter(|y| {
            let py = min.y + (y as f32 + 0.5) * step.y;
            (0..resolution).map(move |x| {
                let px = min.x + (x as f32 + 0.5) * step.x;
                eval(root, Vec2::new(px, py))
            })
        })
        .collect()
}
