//! DOM wiring: binds the engine to a `<canvas>` and routes browser events into it.
//!
//! Listeners live for the lifetime of the page, so their closures are leaked
//! with `Closure::forget`. Each handler borrows the shared engine only for the
//! duration of one event.

use std::cell::RefCell;
use std::rc::Rc;

use canvas::config::EngineConfig;
use canvas::consts::CURSOR_DRAW;
use canvas::engine::{Action, Engine};
use canvas::input::{Key, Modifiers, WheelDelta};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::{Closure, WasmClosure};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    WheelEvent, Window,
};

use crate::error::HostError;
use crate::events;

pub(crate) type SharedEngine = Rc<RefCell<Engine>>;

/// Find the canvas, build the engine and attach every listener.
pub(crate) fn mount(canvas_id: &str, config: EngineConfig) -> Result<SharedEngine, HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;
    let element = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| HostError::MissingElement(canvas_id.to_owned()))?;
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| HostError::NotACanvas(canvas_id.to_owned()))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|err| HostError::dom(&err))?
        .ok_or(HostError::NoContext)?
        .dyn_into()
        .map_err(|_| HostError::NoContext)?;

    fit_to_window(&window, &canvas)?;
    set_cursor(&canvas, CURSOR_DRAW);

    let pan_key = config.pan_key.clone();
    let mut engine = Engine::new(canvas.clone(), ctx, config);
    engine.set_viewport(events::viewport_of(&canvas));
    let engine: SharedEngine = Rc::new(RefCell::new(engine));

    attach_pointer_listeners(&window, &canvas, &engine)?;
    attach_wheel_listener(&canvas, &engine)?;
    attach_key_listeners(&document, &engine, &pan_key)?;
    attach_resize_listener(&window, &canvas, &engine)?;

    render_now(&engine.borrow());
    log::info!("whiteboard mounted on #{canvas_id}");
    Ok(engine)
}

/// Render the current state, logging any surface failure.
pub(crate) fn render_now(engine: &Engine) {
    if let Err(err) = engine.render() {
        log::error!("render failed: {err:?}");
    }
}

// =============================================================
// Listeners
// =============================================================

fn attach_pointer_listeners(window: &Window, canvas: &HtmlCanvasElement, engine: &SharedEngine) -> Result<(), HostError> {
    let shared = Rc::clone(engine);
    let on_down = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let point = events::client_point(ev.client_x(), ev.client_y());
        let button = events::map_button(ev.button());
        let modifiers = mouse_modifiers(&ev);
        dispatch(&shared, |engine| engine.on_pointer_down(point, button, modifiers));
    });
    attach(canvas, "mousedown", on_down)?;

    let shared = Rc::clone(engine);
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let point = events::client_point(ev.client_x(), ev.client_y());
        let modifiers = mouse_modifiers(&ev);
        dispatch(&shared, |engine| engine.on_pointer_move(point, modifiers));
    });
    attach(canvas, "mousemove", on_move)?;

    // Released outside the canvas still ends the gesture.
    let shared = Rc::clone(engine);
    let on_up = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let point = events::client_point(ev.client_x(), ev.client_y());
        let button = events::map_button(ev.button());
        let modifiers = mouse_modifiers(&ev);
        dispatch(&shared, |engine| engine.on_pointer_up(point, button, modifiers));
    });
    attach(window, "mouseup", on_up)?;

    let on_context_menu = Closure::<dyn FnMut(Event)>::new(|ev: Event| ev.prevent_default());
    attach(canvas, "contextmenu", on_context_menu)
}

fn attach_wheel_listener(canvas: &HtmlCanvasElement, engine: &SharedEngine) -> Result<(), HostError> {
    let shared = Rc::clone(engine);
    let on_wheel = Closure::<dyn FnMut(WheelEvent)>::new(move |ev: WheelEvent| {
        let modifiers = mouse_modifiers(&ev);
        if !modifiers.is_accelerator() {
            return;
        }
        ev.prevent_default();
        let point = events::client_point(ev.client_x(), ev.client_y());
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        dispatch(&shared, |engine| engine.on_wheel(point, delta, modifiers));
    });

    // Passive listeners cannot cancel browser zoom.
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    canvas
        .add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            on_wheel.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|err| HostError::dom(&err))?;
    on_wheel.forget();
    Ok(())
}

fn attach_key_listeners(target: &EventTarget, engine: &SharedEngine, pan_key: &str) -> Result<(), HostError> {
    let shared = Rc::clone(engine);
    let key_for_down = pan_key.to_owned();
    let on_key_down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        let code = ev.code();
        if events::should_prevent_default_key(&code, &key_for_down) {
            ev.prevent_default();
        }
        let modifiers = key_modifiers(&ev);
        dispatch(&shared, |engine| engine.on_key_down(Key::new(code), modifiers));
    });
    attach(target, "keydown", on_key_down)?;

    let shared = Rc::clone(engine);
    let key_for_up = pan_key.to_owned();
    let on_key_up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        let code = ev.code();
        if events::should_prevent_default_key(&code, &key_for_up) {
            ev.prevent_default();
        }
        let modifiers = key_modifiers(&ev);
        dispatch(&shared, |engine| engine.on_key_up(Key::new(code), modifiers));
    });
    attach(target, "keyup", on_key_up)
}

fn attach_resize_listener(window: &Window, canvas: &HtmlCanvasElement, engine: &SharedEngine) -> Result<(), HostError> {
    let shared = Rc::clone(engine);
    let resize_window = window.clone();
    let resize_canvas = canvas.clone();
    let on_resize = Closure::<dyn FnMut(Event)>::new(move |_ev: Event| {
        if let Err(err) = fit_to_window(&resize_window, &resize_canvas) {
            log::warn!("resize failed: {err}");
            return;
        }
        let Ok(mut engine) = shared.try_borrow_mut() else {
            log::warn!("engine busy during resize");
            return;
        };
        engine.set_viewport(events::viewport_of(&resize_canvas));
        render_now(&engine);
    });
    attach(window, "resize", on_resize)
}

fn attach<T: ?Sized + WasmClosure>(target: &EventTarget, kind: &str, closure: Closure<T>) -> Result<(), HostError> {
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(|err| HostError::dom(&err))?;
    closure.forget();
    Ok(())
}

// =============================================================
// Event handling
// =============================================================

/// Run one engine handler with a fresh viewport, then apply its actions.
fn dispatch(engine: &SharedEngine, handle: impl FnOnce(&mut Engine) -> Vec<Action>) {
    let Ok(mut engine) = engine.try_borrow_mut() else {
        log::warn!("engine busy; dropping event");
        return;
    };
    // The canvas may have scrolled or moved since the last event.
    let viewport = events::viewport_of(engine.canvas());
    engine.set_viewport(viewport);
    let actions = handle(&mut *engine);
    apply(&engine, actions);
}

fn apply(engine: &Engine, actions: Vec<Action>) {
    let mut needs_render = false;
    for action in actions {
        match action {
            Action::SetCursor(cursor) => set_cursor(engine.canvas(), &cursor),
            Action::RenderNeeded => needs_render = true,
            Action::StrokeCommitted { .. } | Action::StrokesErased { .. } | Action::ViewChanged => {}
        }
    }
    if needs_render {
        render_now(engine);
    }
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
    if let Err(err) = canvas.style().set_property("cursor", cursor) {
        log::warn!("failed to set cursor {cursor}: {err:?}");
    }
}

/// Size the backing store to the window's inner size.
fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), HostError> {
    let inner_width = window.inner_width().map_err(|err| HostError::dom(&err))?;
    let inner_height = window.inner_height().map_err(|err| HostError::dom(&err))?;
    let (width, height) =
        events::backing_size(inner_width.as_f64().unwrap_or(0.0), inner_height.as_f64().unwrap_or(0.0));
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(())
}

fn mouse_modifiers(ev: &MouseEvent) -> Modifiers {
    events::map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key())
}

fn key_modifiers(ev: &KeyboardEvent) -> Modifiers {
    events::map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key())
}
