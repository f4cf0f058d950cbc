//! Rendering: draws every stroke to a 2D drawing surface.
//!
//! The renderer is written against the [`Surface`] trait, which mirrors the
//! subset of `CanvasRenderingContext2d` it needs. The browser context
//! implements it directly; tests substitute a recording surface. Rendering
//! receives read-only views of the stroke store and camera and never mutates
//! application state.
//!
//! Fallible `Canvas2D` calls propagate errors via `Result<(), S::Error>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point, Viewport};
use crate::doc::{Stroke, StrokeStore};

/// The drawing operations the renderer relies on.
pub trait Surface {
    type Error;

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn save(&self);
    fn restore(&self);
    /// # Errors
    /// Surface-specific failure to update the transform.
    fn translate(&self, x: f64, y: f64) -> Result<(), Self::Error>;
    /// # Errors
    /// Surface-specific failure to update the transform.
    fn scale(&self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn set_line_width(&self, width: f64);
    fn set_line_cap(&self, cap: &str);
    fn set_stroke_color(&self, color: &str);
    fn stroke(&self);
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn scale(&self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::scale(self, x, y)
    }

    fn begin_path(&self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn quadratic_curve_to(&self, cpx: f64, cpy: f64, x: f64, y: f64) {
        CanvasRenderingContext2d::quadratic_curve_to(self, cpx, cpy, x, y);
    }

    fn set_line_width(&self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_cap(&self, cap: &str) {
        CanvasRenderingContext2d::set_line_cap(self, cap);
    }

    fn set_stroke_color(&self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn stroke(&self) {
        CanvasRenderingContext2d::stroke(self);
    }
}

/// Draw the full scene: committed strokes in order, then the in-progress one.
///
/// The context transform is pan, then zoom about the backing-store center,
/// the same mapping [`Camera::world_to_screen`] computes point by point.
///
/// # Errors
///
/// Returns `Err` if any fallible surface call fails.
pub fn draw<S: Surface>(
    surface: &S,
    doc: &StrokeStore,
    in_progress: Option<&Stroke>,
    camera: &Camera,
    viewport: &Viewport,
    color: &str,
) -> Result<(), S::Error> {
    surface.clear_rect(0.0, 0.0, viewport.pixel_width, viewport.pixel_height);
    surface.save();

    let result = draw_transformed(surface, doc, in_progress, camera, viewport.center(), color);

    // Restore even on failure so the next frame starts from identity.
    surface.restore();
    result
}

fn draw_transformed<S: Surface>(
    surface: &S,
    doc: &StrokeStore,
    in_progress: Option<&Stroke>,
    camera: &Camera,
    center: Point,
    color: &str,
) -> Result<(), S::Error> {
    surface.translate(camera.pan_x, camera.pan_y)?;
    surface.translate(center.x, center.y)?;
    surface.scale(camera.zoom, camera.zoom)?;
    surface.translate(-center.x, -center.y)?;

    for stroke in doc.iter() {
        draw_smooth_stroke(surface, stroke, color);
    }
    if let Some(stroke) = in_progress {
        draw_smooth_stroke(surface, stroke, color);
    }
    Ok(())
}

/// Draw one stroke as a chain of midpoint quadratics.
///
/// Interior points act as control points with curves ending halfway to the
/// next point; a final curve uses the second-to-last point as control and
/// lands exactly on the last point. Strokes with fewer than two points draw
/// nothing.
pub fn draw_smooth_stroke<S: Surface>(surface: &S, stroke: &Stroke, color: &str) {
    let points = stroke.points();
    let n = points.len();
    if n < 2 {
        return;
    }

    surface.set_line_width(stroke.width());
    surface.set_line_cap("round");
    surface.set_stroke_color(color);
    surface.begin_path();
    surface.move_to(points[0].x, points[0].y);

    for pair in points[1..n - 1].windows(2) {
        let (cur, next) = (pair[0], pair[1]);
        let mid_x = (cur.x + next.x) * 0.5;
        let mid_y = (cur.y + next.y) * 0.5;
        surface.quadratic_curve_to(cur.x, cur.y, mid_x, mid_y);
    }

    let control = points[n - 2];
    let end = points[n - 1];
    surface.quadratic_curve_to(control.x, control.y, end.x, end.y);
    surface.stroke();
}
