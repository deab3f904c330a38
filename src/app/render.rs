use eframe::egui;

use super::geometry::{HANDLE_ORDER, handle_anchor};
use super::{HANDLE_SCREEN_SIZE, Tool, View};
use crate::model::{DiagramElement, ShapeKind};

/// Selection / preview accent.
const ACCENT: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);
const DASH: f32 = 5.0;

/// World units the arrow shaft stops short of the pointed end to leave
/// room for the chevron head.
const ARROW_HEAD: f32 = 15.0;

pub fn tool_button(ui: &mut egui::Ui, label: &str, tool: Tool, selected: &mut Tool) {
    let active = *selected == tool;
    if ui.selectable_label(active, label).clicked() {
        *selected = tool;
    }
}

/// Clears the surface and lays down the grid. Grid spacing is world
/// `grid_size` scaled by zoom; the screen-space pan remainder keeps the
/// lines attached to the world while panning.
pub fn draw_background(painter: &egui::Painter, rect: egui::Rect, view: &View) {
    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    if !view.show_grid {
        return;
    }
    let spacing = view.grid_size * view.zoom;
    if spacing < 2.0 {
        return;
    }
    let stroke = egui::Stroke::new(1.0, GRID_COLOR);
    let offset = egui::vec2(
        (view.pan.x * view.zoom).rem_euclid(spacing),
        (view.pan.y * view.zoom).rem_euclid(spacing),
    );
    let mut x = rect.min.x + offset.x - spacing;
    while x < rect.max.x {
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            stroke,
        );
        x += spacing;
    }
    let mut y = rect.min.y + offset.y - spacing;
    while y < rect.max.y {
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            stroke,
        );
        y += spacing;
    }
}

/// Draws every element in array order (array order is z-order).
pub fn draw_elements(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    elements: &[DiagramElement],
) {
    for element in elements {
        draw_element(painter, origin, view, element);
    }
}

/// Selection chrome pass, drawn after the elements and the in-progress
/// preview.
pub fn draw_selection_overlays(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    elements: &[DiagramElement],
    selection: &[String],
) {
    for element in elements {
        if selection.iter().any(|id| id == &element.id) {
            draw_selection_chrome(painter, origin, view, element);
        }
    }
}

fn screen_rect(origin: egui::Pos2, view: &View, element: &DiagramElement) -> egui::Rect {
    egui::Rect::from_min_size(
        view.world_to_screen(origin, egui::pos2(element.x, element.y)),
        egui::vec2(element.width, element.height) * view.zoom,
    )
}

fn draw_element(painter: &egui::Painter, origin: egui::Pos2, view: &View, element: &DiagramElement) {
    let r = screen_rect(origin, view, element);
    let opacity = element.style.opacity.clamp(0.0, 1.0);
    let fill = element.style.fill.to_color32().gamma_multiply(opacity);
    let stroke = egui::Stroke::new(
        element.style.stroke_width * view.zoom,
        element.style.stroke.to_color32().gamma_multiply(opacity),
    );

    match element.shape {
        ShapeKind::Rectangle => {
            if !element.style.fill.is_transparent() {
                painter.rect_filled(r, 0.0, fill);
            }
            painter.rect_stroke(r, 0.0, stroke, egui::StrokeKind::Middle);
        }
        ShapeKind::Circle => {
            // Inscribed circle: width != height still yields a circle
            // bounded by the smaller extent, never an ellipse.
            let radius = r.width().min(r.height()) * 0.5;
            if !element.style.fill.is_transparent() {
                painter.circle_filled(r.center(), radius, fill);
            }
            painter.circle_stroke(r.center(), radius, stroke);
        }
        ShapeKind::Diamond => {
            let points = vec![
                egui::pos2(r.center().x, r.min.y),
                egui::pos2(r.max.x, r.center().y),
                egui::pos2(r.center().x, r.max.y),
                egui::pos2(r.min.x, r.center().y),
            ];
            painter.add(egui::Shape::convex_polygon(
                points,
                if element.style.fill.is_transparent() {
                    egui::Color32::TRANSPARENT
                } else {
                    fill
                },
                stroke,
            ));
        }
        ShapeKind::Line => {
            // A single horizontal segment at mid-height; neither the
            // corners nor `direction` participate.
            let y = r.center().y;
            painter.line_segment([egui::pos2(r.min.x, y), egui::pos2(r.max.x, y)], stroke);
        }
        ShapeKind::Arrow => draw_arrow(painter, r, view.zoom, stroke, element),
        ShapeKind::Text | ShapeKind::Connector => {}
    }

    if !element.text.is_empty() && element.shape != ShapeKind::Line {
        let font_id = font_for(&element.style, view.zoom);
        painter.text(
            r.center(),
            egui::Align2::CENTER_CENTER,
            &element.text,
            font_id,
            egui::Color32::BLACK.gamma_multiply(opacity),
        );
    }
}

fn font_for(style: &crate::model::Style, zoom: f32) -> egui::FontId {
    let size = style.font_size() * zoom;
    if style.font_family().to_ascii_lowercase().contains("mono") {
        egui::FontId::monospace(size)
    } else {
        egui::FontId::proportional(size)
    }
}

/// Shaft stopping [`ARROW_HEAD`] world units short of the tip, plus a
/// two-stroke chevron head, oriented by `direction`.
fn draw_arrow(
    painter: &egui::Painter,
    r: egui::Rect,
    zoom: f32,
    stroke: egui::Stroke,
    element: &DiagramElement,
) {
    let head = ARROW_HEAD * zoom;
    let (cx, cy) = (r.center().x, r.center().y);
    let (shaft, chevron) = match element.direction() {
        crate::model::Direction::Right => (
            [egui::pos2(r.min.x, cy), egui::pos2(r.max.x - head, cy)],
            [
                egui::pos2(r.max.x - head, r.min.y + r.height() * 0.25),
                egui::pos2(r.max.x, cy),
                egui::pos2(r.max.x - head, r.min.y + r.height() * 0.75),
            ],
        ),
        crate::model::Direction::Left => (
            [egui::pos2(r.min.x + head, cy), egui::pos2(r.max.x, cy)],
            [
                egui::pos2(r.min.x + head, r.min.y + r.height() * 0.25),
                egui::pos2(r.min.x, cy),
                egui::pos2(r.min.x + head, r.min.y + r.height() * 0.75),
            ],
        ),
        crate::model::Direction::Up => (
            [egui::pos2(cx, r.min.y + head), egui::pos2(cx, r.max.y)],
            [
                egui::pos2(r.min.x + r.width() * 0.25, r.min.y + head),
                egui::pos2(cx, r.min.y),
                egui::pos2(r.min.x + r.width() * 0.75, r.min.y + head),
            ],
        ),
        crate::model::Direction::Down => (
            [egui::pos2(cx, r.min.y), egui::pos2(cx, r.max.y - head)],
            [
                egui::pos2(r.min.x + r.width() * 0.25, r.max.y - head),
                egui::pos2(cx, r.max.y),
                egui::pos2(r.min.x + r.width() * 0.75, r.max.y - head),
            ],
        ),
    };
    painter.line_segment(shaft, stroke);
    painter.line_segment([chevron[0], chevron[1]], stroke);
    painter.line_segment([chevron[1], chevron[2]], stroke);
}

/// Dashed bounding outline inflated by 2 px plus the eight fixed-size
/// handle squares.
fn draw_selection_chrome(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    element: &DiagramElement,
) {
    let r = screen_rect(origin, view, element).expand(2.0);
    let stroke = egui::Stroke::new(2.0, ACCENT);
    let corners = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()];
    for i in 0..4 {
        painter.extend(egui::Shape::dashed_line(
            &[corners[i], corners[(i + 1) % 4]],
            stroke,
            DASH,
            DASH,
        ));
    }
    for handle in HANDLE_ORDER {
        let anchor = handle_anchor(element, handle);
        let screen = view.world_to_screen(origin, anchor);
        painter.rect_filled(
            egui::Rect::from_center_size(
                screen,
                egui::vec2(HANDLE_SCREEN_SIZE, HANDLE_SCREEN_SIZE),
            ),
            0.0,
            ACCENT,
        );
    }
}

/// Dashed preview of the shape a pending drawing gesture would create.
pub fn draw_in_progress(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    tool: Tool,
    start: egui::Pos2,
    current: egui::Pos2,
) {
    let stroke = egui::Stroke::new(2.0, ACCENT);
    let a = view.world_to_screen(origin, start);
    let b = view.world_to_screen(origin, current);
    match tool {
        Tool::Line | Tool::Arrow => {
            painter.extend(egui::Shape::dashed_line(&[a, b], stroke, DASH, DASH));
        }
        Tool::Circle => {
            let radius = (b - a).length() * 0.5;
            let center = a + (b - a) * 0.5;
            painter.circle_stroke(center, radius, stroke);
        }
        _ => {
            let r = egui::Rect::from_two_pos(a, b);
            let corners = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()];
            for i in 0..4 {
                painter.extend(egui::Shape::dashed_line(
                    &[corners[i], corners[(i + 1) % 4]],
                    stroke,
                    DASH,
                    DASH,
                ));
            }
        }
    }
}
