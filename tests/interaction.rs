use diagramflow::DiagramApp;
use diagramflow::app::{Gesture, Tool};
use diagramflow::model::{DiagramElement, ShapeKind};
use eframe::egui::{self, pos2, vec2};
use proptest::prelude::*;

const ORIGIN: egui::Pos2 = egui::Pos2::ZERO;

fn app_with(elements: Vec<DiagramElement>) -> DiagramApp {
    let mut app = DiagramApp::default();
    app.elements = elements;
    app
}

fn rect(id: &str, x: f32, y: f32, w: f32, h: f32) -> DiagramElement {
    DiagramElement::new(
        id.to_string(),
        ShapeKind::Rectangle,
        egui::Rect::from_min_size(pos2(x, y), vec2(w, h)),
    )
}

/// Drives a full press-move-release gesture in world coordinates with the
/// identity view transform.
fn gesture(app: &mut DiagramApp, from: egui::Pos2, to: egui::Pos2) {
    app.pointer_pressed(from, from, false);
    app.pointer_moved(to, to);
    app.pointer_released();
}

#[test]
fn drawing_below_threshold_creates_nothing() {
    let mut app = app_with(vec![]);
    app.tool = Tool::Rectangle;
    gesture(&mut app, pos2(0.0, 0.0), pos2(4.0, 4.0));
    assert!(app.elements.is_empty());
    assert!(app.gesture.is_none());
}

#[test]
fn drawing_at_threshold_creates_one_element() {
    let mut app = app_with(vec![]);
    app.tool = Tool::Rectangle;
    gesture(&mut app, pos2(0.0, 0.0), pos2(10.0, 10.0));
    assert_eq!(app.elements.len(), 1);
    let e = &app.elements[0];
    assert_eq!((e.x, e.y, e.width, e.height), (0.0, 0.0, 10.0, 10.0));
    assert!(e.id.starts_with("rectangle_"));
}

#[test]
fn drawing_normalizes_inverted_rects() {
    let mut app = app_with(vec![]);
    app.tool = Tool::Circle;
    gesture(&mut app, pos2(50.0, 60.0), pos2(10.0, 20.0));
    let e = &app.elements[0];
    assert_eq!((e.x, e.y, e.width, e.height), (10.0, 20.0, 40.0, 40.0));
}

#[test]
fn text_tool_seeds_a_label_and_arrows_a_direction() {
    let mut app = app_with(vec![]);
    app.tool = Tool::Text;
    gesture(&mut app, pos2(0.0, 0.0), pos2(40.0, 20.0));
    assert_eq!(app.elements[0].text, "Text");

    app.tool = Tool::Arrow;
    gesture(&mut app, pos2(100.0, 0.0), pos2(180.0, 30.0));
    let arrow = &app.elements[1];
    assert_eq!(arrow.direction(), diagramflow::model::Direction::Right);
    assert!(arrow.style.fill == diagramflow::model::WHITE);
}

#[test]
fn click_selects_topmost_and_clears_on_empty() {
    let mut app = app_with(vec![
        rect("bottom", 0.0, 0.0, 100.0, 100.0),
        rect("top", 50.0, 50.0, 100.0, 100.0),
    ]);
    app.view.snap_to_grid = false;

    // Overlap region: the later element is frontmost.
    app.pointer_pressed(pos2(75.0, 75.0), pos2(75.0, 75.0), false);
    app.pointer_released();
    assert_eq!(app.selection, vec!["top".to_string()]);

    // Modifier press adds instead of replacing.
    app.pointer_pressed(pos2(10.0, 10.0), pos2(10.0, 10.0), true);
    app.pointer_released();
    assert_eq!(
        app.selection,
        vec!["top".to_string(), "bottom".to_string()]
    );

    // Empty canvas press clears and stays idle.
    app.pointer_pressed(pos2(500.0, 500.0), pos2(500.0, 500.0), false);
    assert!(app.selection.is_empty());
    assert!(app.gesture.is_none());
    app.pointer_released();
}

#[test]
fn drag_moves_all_selected_elements() {
    let mut app = app_with(vec![
        rect("a", 0.0, 0.0, 40.0, 40.0),
        rect("b", 100.0, 0.0, 40.0, 40.0),
    ]);
    app.view.snap_to_grid = false;
    app.select_element("a".to_string());
    app.select_element("b".to_string());

    gesture(&mut app, pos2(20.0, 20.0), pos2(27.5, 31.0));
    assert_eq!((app.elements[0].x, app.elements[0].y), (7.5, 11.0));
    assert_eq!((app.elements[1].x, app.elements[1].y), (107.5, 11.0));
}

#[test]
fn snapped_drag_rounds_delta_and_keeps_anchor_drift_free() {
    let mut app = app_with(vec![rect("a", 3.0, 3.0, 40.0, 40.0)]);
    app.view.snap_to_grid = true;
    app.view.grid_size = 20.0;
    app.select_only("a".to_string());

    app.pointer_pressed(pos2(10.0, 10.0), pos2(10.0, 10.0), false);
    // Raw delta (22, 19) snaps to (20, 20): drag-start alignment (x=3)
    // is preserved rather than rounding the absolute position.
    app.pointer_moved(pos2(32.0, 29.0), pos2(32.0, 29.0));
    assert_eq!((app.elements[0].x, app.elements[0].y), (23.0, 23.0));

    // The anchor advanced by the snapped amount, so the remaining raw
    // offset still counts toward the next snap step instead of drifting.
    app.pointer_moved(pos2(51.0, 51.0), pos2(51.0, 51.0));
    assert_eq!((app.elements[0].x, app.elements[0].y), (43.0, 43.0));
    app.pointer_released();
}

#[test]
fn full_drag_is_one_undo_step() {
    let mut app = app_with(vec![rect("a", 0.0, 0.0, 40.0, 40.0)]);
    app.view.snap_to_grid = false;
    app.select_only("a".to_string());

    let depth_before = app.history.depth();
    app.pointer_pressed(pos2(20.0, 20.0), pos2(20.0, 20.0), false);
    for i in 1..=10 {
        let p = pos2(20.0 + i as f32, 20.0);
        app.pointer_moved(p, p);
    }
    app.pointer_released();
    assert_eq!(app.history.depth(), depth_before + 1);
    assert_eq!(app.elements[0].x, 10.0);
}

#[test]
fn resize_gesture_through_the_se_handle() {
    let mut app = app_with(vec![rect("a", 0.0, 0.0, 50.0, 50.0)]);
    app.select_only("a".to_string());

    app.pointer_pressed(pos2(50.0, 50.0), pos2(50.0, 50.0), false);
    assert!(matches!(app.gesture, Some(Gesture::Resize { .. })));
    app.pointer_moved(pos2(80.0, 90.0), pos2(80.0, 90.0));
    app.pointer_released();

    let e = &app.elements[0];
    assert_eq!((e.width, e.height), (80.0, 90.0));
    assert_eq!((e.x, e.y), (0.0, 0.0));
    assert!(app.gesture.is_none());
}

#[test]
fn resize_gesture_never_collapses_the_element() {
    let mut app = app_with(vec![rect("a", 0.0, 0.0, 50.0, 50.0)]);
    app.select_only("a".to_string());
    app.pointer_pressed(pos2(50.0, 50.0), pos2(50.0, 50.0), false);
    app.pointer_moved(pos2(-400.0, -400.0), pos2(-400.0, -400.0));
    app.pointer_released();
    assert_eq!((app.elements[0].width, app.elements[0].height), (10.0, 10.0));
}

#[test]
fn pan_gesture_divides_screen_delta_by_zoom() {
    let mut app = app_with(vec![]);
    app.tool = Tool::Pan;
    app.view.zoom = 2.0;
    app.pointer_pressed(pos2(0.0, 0.0), pos2(100.0, 100.0), false);
    app.pointer_moved(pos2(0.0, 0.0), pos2(110.0, 120.0));
    assert_eq!(app.view.pan, vec2(5.0, 10.0));
    app.pointer_released();
}

#[test]
fn wheel_without_modifier_pans() {
    let mut app = app_with(vec![]);
    app.view.zoom = 2.0;
    app.wheel(ORIGIN, pos2(0.0, 0.0), vec2(30.0, -10.0), false);
    assert_eq!(app.view.pan, vec2(15.0, -5.0));
}

#[test]
fn wheel_zoom_is_clamped_at_both_ends() {
    let mut app = app_with(vec![]);
    for _ in 0..100 {
        app.wheel(ORIGIN, pos2(0.0, 0.0), vec2(0.0, -1.0), true);
    }
    assert_eq!(app.view.zoom, 0.1);
    for _ in 0..200 {
        app.wheel(ORIGIN, pos2(0.0, 0.0), vec2(0.0, 1.0), true);
    }
    assert_eq!(app.view.zoom, 5.0);
}

#[test]
fn wheel_zoom_keeps_the_cursor_point_fixed() {
    let mut app = app_with(vec![]);
    app.view.pan = vec2(13.0, -4.0);
    let cursor = pos2(240.0, 180.0);
    let before = app.view.screen_to_world(ORIGIN, cursor);
    app.wheel(ORIGIN, cursor, vec2(0.0, 1.0), true);
    let after = app.view.screen_to_world(ORIGIN, cursor);
    assert!((before.x - after.x).abs() < 1e-3);
    assert!((before.y - after.y).abs() < 1e-3);
}

#[test]
fn delete_removes_elements_and_selection_atomically() {
    let mut app = app_with(vec![
        rect("a", 0.0, 0.0, 40.0, 40.0),
        rect("b", 100.0, 0.0, 40.0, 40.0),
    ]);
    app.select_element("a".to_string());
    app.select_element("b".to_string());
    app.delete_selected();
    assert!(app.elements.is_empty());
    assert!(app.selection.is_empty());
}

#[test]
fn stale_selection_ids_are_noops() {
    let mut app = app_with(vec![rect("a", 0.0, 0.0, 40.0, 40.0)]);
    app.select_element("ghost".to_string());
    app.select_element("a".to_string());
    app.move_selected_by(vec2(10.0, 0.0));
    assert_eq!(app.elements[0].x, 10.0);
    app.delete_selected();
    assert!(app.elements.is_empty());
    assert!(app.selection.is_empty());
}

#[test]
fn paste_clones_get_fresh_ids_and_staggered_positions() {
    let mut app = app_with(vec![
        rect("a", 0.0, 0.0, 40.0, 40.0),
        rect("b", 100.0, 0.0, 40.0, 40.0),
    ]);
    app.select_element("a".to_string());
    app.select_element("b".to_string());
    app.copy_selected();
    app.paste_at(pos2(200.0, 300.0));

    assert_eq!(app.elements.len(), 4);
    let pasted: Vec<_> = app.elements[2..].iter().collect();
    assert!(pasted[0].id.starts_with("a_copy_"));
    assert!(pasted[1].id.starts_with("b_copy_"));
    assert_eq!((pasted[0].x, pasted[0].y), (200.0, 300.0));
    assert_eq!((pasted[1].x, pasted[1].y), (220.0, 320.0));
    // The clones become the new selection.
    assert_eq!(app.selection.len(), 2);
    assert!(app.is_selected(&pasted[0].id));
    assert!(app.is_selected(&pasted[1].id));
}

#[test]
fn shape_library_click_places_a_default_shape() {
    let mut app = app_with(vec![]);
    app.add_shape_from_library(ShapeKind::Diamond, None);
    assert_eq!(app.elements.len(), 1);
    let e = &app.elements[0];
    assert_eq!((e.x, e.y, e.width, e.height), (100.0, 100.0, 80.0, 60.0));
    assert!(app.is_selected(&e.id));

    app.add_shape_from_library(ShapeKind::Line, None);
    let line = &app.elements[1];
    assert_eq!((line.width, line.height), (100.0, 2.0));
    assert!(line.style.fill.is_transparent());
}

#[test]
fn element_updates_hit_only_their_field() {
    use diagramflow::app::actions::ElementUpdate;
    use diagramflow::model::{Color, Direction};

    let mut app = app_with(vec![rect("a", 0.0, 0.0, 40.0, 40.0)]);
    app.apply_element_update("a", ElementUpdate::Fill(Color::rgb(1, 2, 3)));
    app.apply_element_update("a", ElementUpdate::StrokeWidth(-4.0));
    app.apply_element_update("a", ElementUpdate::Opacity(3.0));
    app.apply_element_update("a", ElementUpdate::Text("hello".to_string()));
    app.apply_element_update("a", ElementUpdate::Direction(Direction::Up));
    app.apply_element_update("a", ElementUpdate::Position { x: 9.0, y: 8.0 });
    app.apply_element_update("ghost", ElementUpdate::Opacity(0.5));

    let e = &app.elements[0];
    assert_eq!(e.style.fill, Color::rgb(1, 2, 3));
    // Style invariants clamp out-of-range inputs.
    assert_eq!(e.style.stroke_width, 0.0);
    assert_eq!(e.style.opacity, 1.0);
    assert_eq!(e.text, "hello");
    assert_eq!(e.direction(), Direction::Up);
    assert_eq!((e.x, e.y), (9.0, 8.0));
    assert_eq!((e.width, e.height), (40.0, 40.0));
}

proptest! {
    #[test]
    fn zoom_stays_clamped_under_arbitrary_notches(notches in proptest::collection::vec(any::<bool>(), 0..300)) {
        let mut app = DiagramApp::default();
        for up in notches {
            let dy = if up { 1.0 } else { -1.0 };
            app.wheel(ORIGIN, pos2(50.0, 50.0), vec2(0.0, dy), true);
            prop_assert!(app.view.zoom >= 0.1 - 1e-6);
            prop_assert!(app.view.zoom <= 5.0 + 1e-6);
        }
    }
}
