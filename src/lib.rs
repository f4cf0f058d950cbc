//! `whiteboard`: WebAssembly host for the freehand canvas engine.
//!
//! [`mount`] binds an engine to a `<canvas>` element on the page and returns a
//! [`Whiteboard`] handle the page keeps for host controls. All geometry, input
//! and rendering logic lives in the `canvas` crate; this crate only wires DOM
//! events to it.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`error`] | Mount failures, converted to `JsValue` at the boundary |
//! | [`events`] | DOM event payload to engine input mapping |
//! | `host` | Listener registration and action application |

pub mod error;
pub mod events;
mod host;

use canvas::config::EngineConfig;
use wasm_bindgen::prelude::*;

pub use error::HostError;

/// Handle to a mounted whiteboard.
#[wasm_bindgen]
pub struct Whiteboard {
    engine: host::SharedEngine,
}

#[wasm_bindgen]
impl Whiteboard {
    /// Set the width for strokes started after this call.
    #[wasm_bindgen(js_name = setStrokeSize)]
    pub fn set_stroke_size(&self, size: f64) {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.set_stroke_size(size),
            Err(_) => log::warn!("engine busy; stroke size {size} not applied"),
        }
    }

    /// Repaint the canvas from current state.
    pub fn redraw(&self) {
        match self.engine.try_borrow() {
            Ok(engine) => host::render_now(&engine),
            Err(_) => log::warn!("engine busy; redraw skipped"),
        }
    }

    /// Current zoom factor.
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.engine.try_borrow().map_or(1.0, |engine| engine.camera().zoom)
    }

    /// Number of committed strokes.
    #[wasm_bindgen(js_name = strokeCount)]
    pub fn stroke_count(&self) -> usize {
        self.engine.try_borrow().map_or(0, |engine| engine.core.strokes().len())
    }
}

/// Mount a whiteboard on the canvas with id `canvas_id`.
///
/// `config_json` is an optional JSON object overriding engine defaults, for
/// example `{"stroke_color": "navy", "zoom_max": 4}`.
///
/// # Errors
///
/// Returns a string error when the page has no such canvas, the canvas has no
/// 2D context, the config is invalid, or a listener cannot be attached.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, config_json: Option<String>) -> Result<Whiteboard, JsValue> {
    init_logging();
    let config = match config_json.as_deref() {
        Some(raw) => EngineConfig::from_json(raw).map_err(HostError::from)?,
        None => EngineConfig::default(),
    };
    let engine = host::mount(canvas_id, config)?;
    Ok(Whiteboard { engine })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Warn };
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("logger already installed: {err}");
    }
}
