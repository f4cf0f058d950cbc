#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn core() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_viewport(Viewport::unscaled(800.0, 600.0));
    core
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn ctrl_modifier() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn meta_modifier() -> Modifiers {
    Modifiers { meta: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn space() -> Key {
    Key::new("Space")
}

fn wheel(dy: f64) -> WheelDelta {
    WheelDelta { dx: 0.0, dy }
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_stroke_committed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::StrokeCommitted { .. }))
}

fn erased_ids(actions: &[Action]) -> Vec<StrokeId> {
    actions
        .iter()
        .find_map(|a| match a {
            Action::StrokesErased { ids } => Some(ids.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

fn cursor(actions: &[Action]) -> Option<&str> {
    actions.iter().find_map(|a| match a {
        Action::SetCursor(c) => Some(c.as_str()),
        _ => None,
    })
}

/// Draw a full stroke through `points` (screen space) with the primary button.
fn draw_stroke(core: &mut EngineCore, points: &[(f64, f64)]) -> Vec<Action> {
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        core.on_pointer_down(pt(x, y), Button::Primary, no_modifiers());
    }
    for &(x, y) in iter {
        core.on_pointer_move(pt(x, y), no_modifiers());
    }
    let last = points.last().copied().unwrap_or((0.0, 0.0));
    core.on_pointer_up(pt(last.0, last.1), Button::Primary, no_modifiers())
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn core_default_camera_is_identity() {
    let core = EngineCore::new();
    let cam = core.camera();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn core_default_is_idle_and_empty() {
    let core = EngineCore::new();
    assert_eq!(core.mode(), Mode::Idle);
    assert!(core.strokes().is_empty());
    assert!(core.in_progress().is_none());
}

#[test]
fn core_default_stroke_size() {
    assert_eq!(EngineCore::new().ui.stroke_size, 5.0);
}

#[test]
fn with_config_seeds_stroke_size() {
    let config = EngineConfig { stroke_size: 2.0, ..EngineConfig::default() };
    let core = EngineCore::with_config(config);
    assert_eq!(core.ui.stroke_size, 2.0);
}

// =============================================================
// Stroke size
// =============================================================

#[test]
fn set_stroke_size_accepts_positive() {
    let mut core = core();
    core.set_stroke_size(12.0);
    assert_eq!(core.ui.stroke_size, 12.0);
}

#[test]
fn set_stroke_size_ignores_invalid() {
    let mut core = core();
    for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        core.set_stroke_size(bad);
        assert_eq!(core.ui.stroke_size, 5.0);
    }
}

#[test]
fn stroke_size_change_applies_to_next_stroke_only() {
    let mut core = core();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.set_stroke_size(20.0);
    core.on_pointer_move(pt(10.0, 0.0), no_modifiers());
    core.on_pointer_up(pt(10.0, 0.0), Button::Primary, no_modifiers());
    draw_stroke(&mut core, &[(0.0, 50.0), (10.0, 50.0)]);

    let widths: Vec<f64> = core.strokes().iter().map(Stroke::width).collect();
    assert_eq!(widths, vec![5.0, 20.0]);
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn primary_down_opens_one_point_stroke() {
    let mut core = core();
    let actions = core.on_pointer_down(pt(10.0, 20.0), Button::Primary, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.mode(), Mode::Drawing);
    let stroke = core.in_progress().map(|s| s.points().to_vec()).unwrap_or_default();
    assert_eq!(stroke, vec![StrokePoint::new(10.0, 20.0, 5.0)]);
}

#[test]
fn move_while_drawing_requests_render_even_when_decimated() {
    let mut core = core();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(0.5, 0.5), no_modifiers());
    assert!(has_render_needed(&actions));
    assert_eq!(core.in_progress().map(Stroke::len), Some(1));
}

#[test]
fn move_while_idle_does_nothing() {
    let mut core = core();
    let actions = core.on_pointer_move(pt(30.0, 30.0), no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn pointer_up_commits_stroke() {
    let mut core = core();
    let actions = draw_stroke(&mut core, &[(0.0, 0.0), (5.0, 0.0), (10.0, 3.0)]);
    assert!(has_stroke_committed(&actions));
    assert!(has_render_needed(&actions));
    assert_eq!(core.mode(), Mode::Idle);
    assert_eq!(core.strokes().len(), 1);
    assert_eq!(core.strokes().iter().next().map(Stroke::len), Some(3));
}

#[test]
fn committed_id_matches_stored_stroke() {
    let mut core = core();
    let actions = draw_stroke(&mut core, &[(0.0, 0.0), (5.0, 5.0)]);
    let Some(Action::StrokeCommitted { id }) = actions.first() else {
        panic!("expected StrokeCommitted first, got {actions:?}");
    };
    assert!(core.strokes().get(id).is_some());
}

#[test]
fn single_click_commits_one_point_stroke() {
    let mut core = core();
    draw_stroke(&mut core, &[(40.0, 40.0)]);
    assert_eq!(core.strokes().len(), 1);
    assert_eq!(core.strokes().iter().next().map(Stroke::len), Some(1));
}

#[test]
fn scenario_draw_right_angle_then_erase() {
    let mut core = core();
    draw_stroke(&mut core, &[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (4.0, 2.0)]);
    assert_eq!(core.strokes().iter().next().map(Stroke::len), Some(4));

    let actions = core.on_pointer_down(pt(2.0, 0.0), Button::Secondary, no_modifiers());
    assert_eq!(erased_ids(&actions).len(), 1);
    assert!(core.strokes().is_empty());
}

#[test]
fn drawing_maps_through_camera() {
    let mut core = core();
    core.camera = Camera { pan_x: 40.0, pan_y: -20.0, zoom: 2.0 };
    core.on_pointer_down(pt(500.0, 300.0), Button::Primary, no_modifiers());
    let first = core.in_progress().and_then(|s| s.points().first().copied());
    // (500 - 40 - 400) / 2 + 400 = 430, (300 + 20 - 300) / 2 + 300 = 310
    let first = first.map(|p| (p.x, p.y));
    assert_eq!(first, Some((430.0, 310.0)));
}

#[test]
fn decimation_threshold_is_in_logical_units() {
    let mut core = core();
    core.camera.zoom = 4.0;
    core.on_pointer_down(pt(400.0, 300.0), Button::Primary, no_modifiers());
    // 3 screen px at 4x zoom is 0.75 logical units: dropped.
    core.on_pointer_move(pt(403.0, 300.0), no_modifiers());
    assert_eq!(core.in_progress().map(Stroke::len), Some(1));
    // 5 screen px is 1.25 logical units: kept.
    core.on_pointer_move(pt(405.0, 300.0), no_modifiers());
    assert_eq!(core.in_progress().map(Stroke::len), Some(2));
}

#[test]
fn second_button_during_drawing_is_ignored() {
    let mut core = core();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_down(pt(0.0, 0.0), Button::Secondary, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.mode(), Mode::Drawing);
}

#[test]
fn middle_button_does_nothing() {
    let mut core = core();
    let actions = core.on_pointer_down(pt(0.0, 0.0), Button::Middle, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.mode(), Mode::Idle);
}

// =============================================================
// Erasing
// =============================================================

#[test]
fn secondary_down_enters_erasing_and_erases_at_press() {
    let mut core = core();
    draw_stroke(&mut core, &[(100.0, 100.0), (200.0, 100.0)]);
    let actions = core.on_pointer_down(pt(150.0, 105.0), Button::Secondary, no_modifiers());
    assert_eq!(core.mode(), Mode::Erasing);
    assert_eq!(erased_ids(&actions).len(), 1);
    assert!(has_render_needed(&actions));
}

#[test]
fn erase_far_away_leaves_strokes() {
    let mut core = core();
    draw_stroke(&mut core, &[(100.0, 100.0), (200.0, 100.0)]);
    draw_stroke(&mut core, &[(100.0, 300.0), (200.0, 300.0)]);
    let actions = core.on_pointer_down(pt(150.0, 200.0), Button::Secondary, no_modifiers());
    assert!(erased_ids(&actions).is_empty());
    assert_eq!(core.strokes().len(), 2);
}

#[test]
fn erase_while_moving() {
    let mut core = core();
    draw_stroke(&mut core, &[(100.0, 100.0), (200.0, 100.0)]);
    draw_stroke(&mut core, &[(100.0, 300.0), (200.0, 300.0)]);
    core.on_pointer_down(pt(0.0, 0.0), Button::Secondary, no_modifiers());
    core.on_pointer_move(pt(150.0, 98.0), no_modifiers());
    assert_eq!(core.strokes().len(), 1);
    core.on_pointer_move(pt(150.0, 302.0), no_modifiers());
    assert!(core.strokes().is_empty());
}

#[test]
fn erase_reports_newest_first() {
    let mut core = core();
    let first = draw_stroke(&mut core, &[(0.0, 10.0), (50.0, 10.0)]);
    let second = draw_stroke(&mut core, &[(0.0, 12.0), (50.0, 12.0)]);
    let id_of = |actions: &[Action]| {
        actions.iter().find_map(|a| match a {
            Action::StrokeCommitted { id } => Some(*id),
            _ => None,
        })
    };
    let (Some(a), Some(b)) = (id_of(&first), id_of(&second)) else {
        panic!("both strokes should commit");
    };
    let actions = core.on_pointer_down(pt(25.0, 11.0), Button::Secondary, no_modifiers());
    assert_eq!(erased_ids(&actions), vec![b, a]);
}

#[test]
fn erase_radius_is_logical_under_zoom() {
    let mut core = core();
    draw_stroke(&mut core, &[(300.0, 300.0), (500.0, 300.0)]);
    core.camera.zoom = 4.0;
    // Line y=300 stays on screen row 300 (center). 30 px below is 7.5 logical.
    core.on_pointer_down(pt(400.0, 330.0), Button::Secondary, no_modifiers());
    assert!(core.strokes().is_empty());
}

#[test]
fn erase_radius_from_config() {
    let config = EngineConfig { erase_radius: 2.0, ..EngineConfig::default() };
    let mut core = EngineCore::with_config(config);
    core.set_viewport(Viewport::unscaled(800.0, 600.0));
    draw_stroke(&mut core, &[(0.0, 0.0), (100.0, 0.0)]);
    core.on_pointer_down(pt(50.0, 5.0), Button::Secondary, no_modifiers());
    assert_eq!(core.strokes().len(), 1);
}

#[test]
fn pointer_up_ends_erasing() {
    let mut core = core();
    core.on_pointer_down(pt(0.0, 0.0), Button::Secondary, no_modifiers());
    let actions = core.on_pointer_up(pt(0.0, 0.0), Button::Secondary, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.mode(), Mode::Idle);
    assert!(core.strokes().is_empty());
}

// =============================================================
// Panning
// =============================================================

#[test]
fn pan_key_sets_grab_cursor() {
    let mut core = core();
    let actions = core.on_key_down(space(), no_modifiers());
    assert_eq!(cursor(&actions), Some("grab"));
    assert!(core.ui.pan_key_held);
}

#[test]
fn pan_key_repeat_is_ignored() {
    let mut core = core();
    core.on_key_down(space(), no_modifiers());
    assert!(core.on_key_down(space(), no_modifiers()).is_empty());
}

#[test]
fn other_keys_are_ignored() {
    let mut core = core();
    assert!(core.on_key_down(Key::new("KeyA"), no_modifiers()).is_empty());
    assert!(core.on_key_up(Key::new("KeyA"), no_modifiers()).is_empty());
    assert!(!core.ui.pan_key_held);
}

#[test]
fn pan_drag_moves_offset_by_screen_delta() {
    let mut core = core();
    core.on_key_down(space(), no_modifiers());
    let down = core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert_eq!(cursor(&down), Some("grabbing"));
    assert_eq!(core.mode(), Mode::Panning);

    let actions = core.on_pointer_move(pt(110.0, 105.0), no_modifiers());
    assert!(has_action(&actions, |a| matches!(a, Action::ViewChanged)));
    assert!(has_render_needed(&actions));
    assert_eq!(core.camera().pan_x, 10.0);
    assert_eq!(core.camera().pan_y, 5.0);
    assert!(core.strokes().is_empty());
}

#[test]
fn pan_there_and_back_restores_offset() {
    let mut core = core();
    core.on_key_down(space(), no_modifiers());
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(110.0, 105.0), no_modifiers());
    core.on_pointer_move(pt(100.0, 100.0), no_modifiers());
    assert_eq!(core.camera().pan_x, 0.0);
    assert_eq!(core.camera().pan_y, 0.0);
}

#[test]
fn pan_speed_ignores_zoom() {
    let mut core = core();
    core.camera.zoom = 3.0;
    core.on_key_down(space(), no_modifiers());
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(12.0, -6.0), no_modifiers());
    assert_eq!(core.camera().pan_x, 12.0);
    assert_eq!(core.camera().pan_y, -6.0);
}

#[test]
fn pan_key_with_secondary_does_not_erase() {
    let mut core = core();
    draw_stroke(&mut core, &[(0.0, 0.0), (100.0, 0.0)]);
    core.on_key_down(space(), no_modifiers());
    let actions = core.on_pointer_down(pt(50.0, 0.0), Button::Secondary, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.mode(), Mode::Idle);
    assert_eq!(core.strokes().len(), 1);
}

#[test]
fn pointer_up_after_pan_restores_grab_cursor() {
    let mut core = core();
    core.on_key_down(space(), no_modifiers());
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_up(pt(0.0, 0.0), Button::Primary, no_modifiers());
    assert_eq!(cursor(&actions), Some("grab"));
    assert_eq!(core.mode(), Mode::Idle);
}

#[test]
fn releasing_pan_key_mid_pan_ends_pan() {
    let mut core = core();
    core.on_key_down(space(), no_modifiers());
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    let actions = core.on_key_up(space(), no_modifiers());
    assert_eq!(cursor(&actions), Some("crosshair"));
    assert_eq!(core.mode(), Mode::Idle);
    // Further moves neither pan nor draw.
    assert!(core.on_pointer_move(pt(50.0, 50.0), no_modifiers()).is_empty());
    assert_eq!(core.camera().pan_x, 0.0);
}

#[test]
fn pan_key_during_drawing_keeps_drawing() {
    let mut core = core();
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, no_modifiers());
    let actions = core.on_key_down(space(), no_modifiers());
    assert!(actions.is_empty());
    core.on_pointer_move(pt(20.0, 0.0), no_modifiers());
    assert_eq!(core.mode(), Mode::Drawing);
    assert_eq!(core.camera().pan_x, 0.0);

    let up = core.on_pointer_up(pt(20.0, 0.0), Button::Primary, no_modifiers());
    assert!(has_stroke_committed(&up));
    assert_eq!(cursor(&up), Some("grab"));
}

#[test]
fn custom_pan_key() {
    let config = EngineConfig { pan_key: "ShiftLeft".to_owned(), ..EngineConfig::default() };
    let mut core = EngineCore::with_config(config);
    assert!(core.on_key_down(space(), no_modifiers()).is_empty());
    assert_eq!(cursor(&core.on_key_down(Key::new("ShiftLeft"), no_modifiers())), Some("grab"));
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn wheel_without_accelerator_is_ignored() {
    let mut core = core();
    let actions = core.on_wheel(pt(0.0, 0.0), wheel(-100.0), no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.camera().zoom, 1.0);
}

#[test]
fn ctrl_wheel_up_zooms_in() {
    let mut core = core();
    let actions = core.on_wheel(pt(0.0, 0.0), wheel(-100.0), ctrl_modifier());
    assert!(has_action(&actions, |a| matches!(a, Action::ViewChanged)));
    assert!(has_render_needed(&actions));
    assert!(approx_eq(core.camera().zoom, 1.1));
}

#[test]
fn meta_wheel_down_zooms_out() {
    let mut core = core();
    core.on_wheel(pt(0.0, 0.0), wheel(100.0), meta_modifier());
    assert!(approx_eq(core.camera().zoom, 1.0 / 1.1));
}

#[test]
fn zero_delta_counts_as_zoom_out() {
    let mut core = core();
    core.on_wheel(pt(0.0, 0.0), wheel(0.0), ctrl_modifier());
    assert!(core.camera().zoom < 1.0);
}

#[test]
fn scenario_in_in_out() {
    let mut core = core();
    core.on_wheel(pt(0.0, 0.0), wheel(-1.0), ctrl_modifier());
    core.on_wheel(pt(0.0, 0.0), wheel(-1.0), ctrl_modifier());
    core.on_wheel(pt(0.0, 0.0), wheel(1.0), ctrl_modifier());
    assert!(approx_eq(core.camera().zoom, 1.1));
}

#[test]
fn zoom_is_bounded() {
    let mut core = core();
    for _ in 0..200 {
        core.on_wheel(pt(0.0, 0.0), wheel(-1.0), ctrl_modifier());
    }
    assert_eq!(core.camera().zoom, 10.0);
    for _ in 0..400 {
        core.on_wheel(pt(0.0, 0.0), wheel(1.0), ctrl_modifier());
    }
    assert_eq!(core.camera().zoom, 0.1);
}

#[test]
fn zoom_keeps_center_fixed() {
    let mut core = core();
    core.on_wheel(pt(0.0, 0.0), wheel(-1.0), ctrl_modifier());
    core.on_pointer_down(pt(400.0, 300.0), Button::Primary, no_modifiers());
    let first = core.in_progress().and_then(|s| s.points().first().copied());
    let first = first.map(|p| (p.x, p.y));
    assert_eq!(first, Some((400.0, 300.0)));
}
