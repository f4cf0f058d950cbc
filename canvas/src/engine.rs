use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Viewport};
use crate::config::EngineConfig;
use crate::consts::{CURSOR_DRAW, CURSOR_PAN, CURSOR_PANNING};
use crate::doc::{Stroke, StrokeId, StrokePoint, StrokeStore};
use crate::input::{Button, InputState, Key, Mode, Modifiers, UiState, WheelDelta};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A finished stroke joined the store.
    StrokeCommitted { id: StrokeId },
    /// The eraser removed these strokes, newest first.
    StrokesErased { ids: Vec<StrokeId> },
    /// Pan or zoom changed.
    ViewChanged,
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: StrokeStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
    pub config: EngineConfig,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a core around a validated config.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let ui = UiState { stroke_size: config.stroke_size, ..UiState::default() };
        Self { ui, config, ..Self::default() }
    }

    // --- Host settings ---

    /// Change the width used for strokes started from now on.
    ///
    /// Non-positive or non-finite sizes are ignored.
    pub fn set_stroke_size(&mut self, size: f64) {
        if !(size.is_finite() && size > 0.0) {
            log::warn!("ignoring invalid stroke size {size}");
            return;
        }
        self.ui.stroke_size = size;
    }

    /// Update the surface geometry used for coordinate mapping and clearing.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }

        if self.ui.pan_key_held {
            if button != Button::Primary {
                return Vec::new();
            }
            self.input = InputState::Panning { last_screen: screen_pt };
            return vec![Action::SetCursor(CURSOR_PANNING.to_owned())];
        }

        match button {
            Button::Primary => {
                let world = self.to_world(screen_pt);
                let first = StrokePoint::new(world.x, world.y, self.ui.stroke_size);
                self.input = InputState::Drawing { stroke: Stroke::begin(first) };
                Vec::new()
            }
            Button::Secondary => {
                self.input = InputState::Erasing;
                self.erase_at(screen_pt)
            }
            Button::Middle => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if matches!(self.input, InputState::Erasing) {
            return self.erase_at(screen_pt);
        }

        let world = self.to_world(screen_pt);
        let size = self.ui.stroke_size;
        let step = self.config.decimation_step;

        match &mut self.input {
            InputState::Idle | InputState::Erasing => Vec::new(),
            InputState::Drawing { stroke } => {
                stroke.push_decimated(StrokePoint::new(world.x, world.y, size), step);
                // Redraw on every move, appended or not, so the preview tracks the pointer.
                vec![Action::RenderNeeded]
            }
            InputState::Panning { last_screen } => {
                let dx = screen_pt.x - last_screen.x;
                let dy = screen_pt.y - last_screen.y;
                *last_screen = screen_pt;
                self.camera.pan_by(dx, dy);
                vec![Action::ViewChanged, Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Drawing { stroke } => {
                let id = stroke.id;
                log::debug!("committing stroke {id} with {} points", stroke.len());
                self.doc.push(stroke);
                actions.push(Action::StrokeCommitted { id });
                actions.push(Action::RenderNeeded);
                if self.ui.pan_key_held {
                    actions.push(Action::SetCursor(CURSOR_PAN.to_owned()));
                }
            }
            InputState::Panning { .. } => {
                let cursor = if self.ui.pan_key_held { CURSOR_PAN } else { CURSOR_DRAW };
                actions.push(Action::SetCursor(cursor.to_owned()));
            }
            InputState::Erasing => {
                if self.ui.pan_key_held {
                    actions.push(Action::SetCursor(CURSOR_PAN.to_owned()));
                }
            }
            InputState::Idle => {}
        }
        actions
    }

    /// Zoom on accelerated wheel ticks; plain wheel events are left to the page.
    pub fn on_wheel(&mut self, _screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.is_accelerator() {
            return Vec::new();
        }
        let bounds = self.config.zoom_bounds();
        if delta.dy < 0.0 {
            self.camera.zoom_in(self.config.zoom_step, bounds);
        } else {
            self.camera.zoom_out(self.config.zoom_step, bounds);
        }
        log::debug!("zoom now {:.4}", self.camera.zoom);
        vec![Action::ViewChanged, Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if !key.is(&self.config.pan_key) || self.ui.pan_key_held {
            return Vec::new();
        }
        self.ui.pan_key_held = true;
        if matches!(self.input, InputState::Idle) {
            vec![Action::SetCursor(CURSOR_PAN.to_owned())]
        } else {
            Vec::new()
        }
    }

    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if !key.is(&self.config.pan_key) {
            return Vec::new();
        }
        self.ui.pan_key_held = false;
        match self.input {
            InputState::Panning { .. } => {
                self.input = InputState::Idle;
                vec![Action::SetCursor(CURSOR_DRAW.to_owned())]
            }
            InputState::Idle => vec![Action::SetCursor(CURSOR_DRAW.to_owned())],
            InputState::Drawing { .. } | InputState::Erasing => Vec::new(),
        }
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.input.mode()
    }

    #[must_use]
    pub fn strokes(&self) -> &StrokeStore {
        &self.doc
    }

    /// The stroke currently being drawn, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Stroke> {
        self.input.in_progress()
    }

    // --- Internal helpers ---

    fn to_world(&self, screen_pt: Point) -> Point {
        self.camera.screen_to_world(screen_pt, &self.viewport)
    }

    fn erase_at(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.to_world(screen_pt);
        let removed = self.doc.erase_near(world, self.config.erase_radius);
        if removed.is_empty() {
            return vec![Action::RenderNeeded];
        }
        let ids: Vec<StrokeId> = removed.iter().map(|s| s.id).collect();
        log::debug!("erased {} stroke(s) at ({:.1}, {:.1})", ids.len(), world.x, world.y);
        vec![Action::StrokesErased { ids }, Action::RenderNeeded]
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element and its 2D context.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, config: EngineConfig) -> Self {
        Self { canvas, ctx, core: EngineCore::with_config(config) }
    }

    /// The canvas element this engine draws into.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // --- Delegated settings ---

    pub fn set_stroke_size(&mut self, size: f64) {
        self.core.set_stroke_size(size);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.core.set_viewport(viewport);
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` transform call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let core = &self.core;
        render::draw(&self.ctx, &core.doc, core.in_progress(), &core.camera, &core.viewport, &core.config.stroke_color)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.core.mode()
    }
}
