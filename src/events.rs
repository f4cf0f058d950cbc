//! Translation from DOM event payloads to engine input types.
//!
//! Everything here except [`viewport_of`] is plain data in, plain data out, so
//! it runs under native `cargo test`.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use canvas::camera::{Point, Viewport};
use canvas::input::{Button, Modifiers};
use web_sys::HtmlCanvasElement;

/// Map `MouseEvent.button` to an engine button. Unknown buttons count as primary.
#[must_use]
pub fn map_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

#[must_use]
pub fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// Whether a key press should be kept from the page (Space would scroll it).
#[must_use]
pub fn should_prevent_default_key(code: &str, pan_key: &str) -> bool {
    code == pan_key
}

/// Client coordinates of a mouse event as an engine point.
#[must_use]
pub fn client_point(client_x: i32, client_y: i32) -> Point {
    Point::new(f64::from(client_x), f64::from(client_y))
}

/// Backing-store size for a window of the given inner size.
///
/// Non-finite or sub-pixel sizes collapse to one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn backing_size(inner_width: f64, inner_height: f64) -> (u32, u32) {
    let dim = |v: f64| if v.is_finite() && v >= 1.0 { v.floor().min(f64::from(u32::MAX)) as u32 } else { 1 };
    (dim(inner_width), dim(inner_height))
}

/// Read the displayed rectangle and backing-store size of a canvas.
#[must_use]
pub fn viewport_of(canvas: &HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport {
        left: rect.left(),
        top: rect.top(),
        css_width: rect.width(),
        css_height: rect.height(),
        pixel_width: f64::from(canvas.width()),
        pixel_height: f64::from(canvas.height()),
    }
}
