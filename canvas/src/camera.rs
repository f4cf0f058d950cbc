#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of the drawing surface as seen by the input source.
///
/// `left` / `top` / `css_width` / `css_height` describe the displayed box in
/// the same space as pointer coordinates. `pixel_width` / `pixel_height` are
/// the backing-store dimensions the renderer draws into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl Viewport {
    /// A viewport whose displayed size equals its backing size, anchored at the origin.
    #[must_use]
    pub fn unscaled(width: f64, height: f64) -> Self {
        Self { left: 0.0, top: 0.0, css_width: width, css_height: height, pixel_width: width, pixel_height: height }
    }

    /// Backing pixels per displayed pixel along each axis.
    ///
    /// A collapsed displayed box (zero width or height) maps 1:1 so the
    /// transform stays finite.
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        let sx = if self.css_width > 0.0 { self.pixel_width / self.css_width } else { 1.0 };
        let sy = if self.css_height > 0.0 { self.pixel_height / self.css_height } else { 1.0 };
        (sx, sy)
    }

    /// Center of the backing store; the pivot for zoom.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.pixel_width * 0.5, self.pixel_height * 0.5)
    }
}

/// Inclusive range the zoom factor is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// View state for pan/zoom on the whiteboard.
///
/// `pan_x` / `pan_y` are in backing pixels, applied before the zoom.
/// `zoom` is a scale factor about the canvas center (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a pointer position to logical coordinates.
    ///
    /// Scale into backing pixels, remove the pan, then undo the zoom about
    /// the canvas center. The order matters: pan lives in unzoomed space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: &Viewport) -> Point {
        let (sx, sy) = viewport.scale();
        let center = viewport.center();

        let px = (screen.x - viewport.left) * sx - self.pan_x;
        let py = (screen.y - viewport.top) * sy - self.pan_y;

        Point { x: center.x + (px - center.x) / self.zoom, y: center.y + (py - center.y) / self.zoom }
    }

    /// Convert a logical point to the pointer position that would land on it.
    ///
    /// Mirrors the renderer's context transform, so this is the exact inverse
    /// of [`Camera::screen_to_world`].
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: &Viewport) -> Point {
        let (sx, sy) = viewport.scale();
        let center = viewport.center();

        let px = center.x + (world.x - center.x) * self.zoom + self.pan_x;
        let py = center.y + (world.y - center.y) * self.zoom + self.pan_y;

        Point { x: px / sx + viewport.left, y: py / sy + viewport.top }
    }

    /// Shift the view by a raw pointer delta. Not divided by zoom, so pan
    /// speed is the same at every zoom level.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply zoom by `step`, clamped into `bounds`.
    pub fn zoom_in(&mut self, step: f64, bounds: ZoomBounds) {
        self.zoom = bounds.clamp(self.zoom * step);
    }

    /// Divide zoom by `step`, clamped into `bounds`.
    pub fn zoom_out(&mut self, step: f64, bounds: ZoomBounds) {
        self.zoom = bounds.clamp(self.zoom / step);
    }
}
