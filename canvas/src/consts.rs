//! Shared numeric constants for the canvas crate.
//!
//! These are the defaults behind [`crate::config::EngineConfig`]; hosts may
//! override any of them at mount time.

// ── Stroke capture ──────────────────────────────────────────────

/// Stroke width used until the host calls `set_stroke_size`.
pub const DEFAULT_STROKE_SIZE: f64 = 5.0;

/// CSS colour every stroke is painted with.
pub const DEFAULT_STROKE_COLOR: &str = "black";

/// A new point is kept only if it moves more than this many logical units
/// along either axis from the previous one.
pub const DECIMATION_STEP: f64 = 1.0;

// ── Erasing ─────────────────────────────────────────────────────

/// Logical-space radius within which the eraser removes a stroke.
pub const ERASE_RADIUS: f64 = 10.0;

// ── Pan / zoom ──────────────────────────────────────────────────

/// Multiplicative zoom change per accelerated wheel tick.
pub const ZOOM_STEP: f64 = 1.1;

/// Smallest zoom factor reachable with the wheel.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor reachable with the wheel.
pub const ZOOM_MAX: f64 = 10.0;

/// `KeyboardEvent.code` of the key that turns primary drags into pans.
pub const PAN_KEY: &str = "Space";

// ── Cursors ─────────────────────────────────────────────────────

/// Cursor shown while the pan key is held.
pub const CURSOR_PAN: &str = "grab";

/// Cursor shown during an active pan drag.
pub const CURSOR_PANNING: &str = "grabbing";

/// Cursor shown in normal drawing mode.
pub const CURSOR_DRAW: &str = "crosshair";
