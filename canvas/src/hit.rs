//! Geometry for hit-testing ink: point/segment distance and stroke proximity.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{Stroke, StrokeStore};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Shortest distance from `p` to the segment `v`–`w`.
///
/// Projects `p` onto the segment and clamps the projection into its extent.
/// A zero-length segment degenerates to the distance to `v`.
#[must_use]
pub fn distance_to_segment(p: Point, v: Point, w: Point) -> f64 {
    let dx = w.x - v.x;
    let dy = w.y - v.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return distance(p, v);
    }
    let t = (((p.x - v.x) * dx + (p.y - v.y) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(t.mul_add(dx, v.x), t.mul_add(dy, v.y)))
}

/// Whether any segment of `stroke` passes strictly within `radius` of `p`.
///
/// A stroke with fewer than two points has no segments and never matches.
#[must_use]
pub fn is_near_stroke(p: Point, stroke: &Stroke, radius: f64) -> bool {
    stroke
        .points()
        .windows(2)
        .any(|seg| distance_to_segment(p, seg[0].pos(), seg[1].pos()) < radius)
}

/// Indices of every stroke in `store` near `p`, newest first.
#[must_use]
pub fn strokes_near(p: Point, store: &StrokeStore, radius: f64) -> Vec<usize> {
    store
        .as_slice()
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, stroke)| is_near_stroke(p, stroke, radius))
        .map(|(idx, _)| idx)
        .collect()
}
