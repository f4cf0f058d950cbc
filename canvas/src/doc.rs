//! Document model: ink strokes and the in-memory store that owns them.
//!
//! A [`Stroke`] is the ordered list of [`StrokePoint`]s captured between
//! pointer-down and pointer-up. The [`StrokeStore`] keeps committed strokes in
//! insertion order, which is also draw order. Strokes only leave the store
//! through [`StrokeStore::erase_near`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use uuid::Uuid;

use crate::camera::Point;
use crate::hit;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// One captured sample: logical position plus the stroke width in effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl StrokePoint {
    #[must_use]
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }

    /// Position without the size tag.
    #[must_use]
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A single freehand mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub id: StrokeId,
    points: Vec<StrokePoint>,
}

impl Stroke {
    /// Open a new stroke at `first`.
    #[must_use]
    pub fn begin(first: StrokePoint) -> Self {
        Self { id: Uuid::new_v4(), points: vec![first] }
    }

    /// Append `point` if it moved more than `step` along either axis from the
    /// last captured point. Returns whether the point was kept.
    pub fn push_decimated(&mut self, point: StrokePoint, step: f64) -> bool {
        let keep = match self.points.last() {
            Some(last) => (point.x - last.x).abs() > step || (point.y - last.y).abs() > step,
            None => true,
        };
        if keep {
            self.points.push(point);
        }
        keep
    }

    /// Line width for the whole stroke: the size recorded on the first point.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.first().map_or(0.0, |p| p.size)
    }

    #[must_use]
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&StrokePoint> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&StrokePoint> {
        self.points.last()
    }
}

/// In-memory, insertion-ordered store of committed strokes.
#[derive(Debug, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { strokes: Vec::new() }
    }

    /// Commit a stroke on top of everything drawn so far. Empty strokes are dropped.
    pub fn push(&mut self, stroke: Stroke) {
        if stroke.is_empty() {
            return;
        }
        self.strokes.push(stroke);
    }

    #[must_use]
    pub fn get(&self, id: &StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| &s.id == id)
    }

    /// Strokes in draw order (bottom first).
    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Remove every stroke passing within `radius` of `point`.
    ///
    /// Matches are collected newest-first before anything is removed, so no
    /// stroke is skipped by index shifting. The removed strokes are returned
    /// in that same newest-first order.
    pub fn erase_near(&mut self, point: Point, radius: f64) -> Vec<Stroke> {
        let matches = hit::strokes_near(point, self, radius);
        let mut removed = Vec::with_capacity(matches.len());
        // Indices are descending, so earlier removals never shift later ones.
        for idx in matches {
            removed.push(self.strokes.remove(idx));
        }
        removed
    }
}
