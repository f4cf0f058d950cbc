//! Ink engine for the freehand whiteboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! its logic is testable natively. It owns the whole interaction model:
//! translating raw pointer, wheel and key events into drawing, erasing,
//! panning and zooming; keeping the committed strokes; and repainting them as
//! smoothed curves. The host crate only wires DOM events to the engine and
//! applies the returned [`engine::Action`]s (cursor changes, redraw requests).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Strokes, stroke points and the stroke store |
//! | [`camera`] | Pan/zoom view state and screen ↔ logical conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Point/segment distance and eraser proximity |
//! | [`render`] | Smoothed stroke rendering over a [`render::Surface`] |
//! | [`config`] | Host-supplied [`config::EngineConfig`] |
//! | [`consts`] | Default thresholds, zoom limits and cursors |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
