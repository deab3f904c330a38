use eframe::egui;

use crate::model::{Color, DiagramElement, Direction, ShapeKind};

/// World units of padding added on every side of the content bounds.
pub const EXPORT_PADDING: f32 = 20.0;

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn svg_paint(color: Color) -> String {
    if color.is_transparent() {
        "none".to_string()
    } else {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    }
}

/// Bounding box of the whole diagram, padded by [`EXPORT_PADDING`].
pub fn content_bounds(elements: &[DiagramElement]) -> egui::Rect {
    let mut bounds: Option<egui::Rect> = None;
    for e in elements {
        let b = e.bounds();
        bounds = Some(bounds.map(|r| r.union(b)).unwrap_or(b));
    }
    bounds
        .unwrap_or(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::Vec2::ZERO))
        .expand(EXPORT_PADDING)
}

/// Emits the diagram as a standalone SVG document at unit scale, with
/// coordinates rebased to the padded content bounds. Every shape kind has
/// a vector counterpart; labels become centered `<text>` nodes.
pub fn diagram_to_svg(elements: &[DiagramElement]) -> String {
    let bounds = content_bounds(elements);
    let width = bounds.width();
    let height = bounds.height();

    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.3}" height="{height:.3}" viewBox="0 0 {width:.3} {height:.3}">"#
    ));
    out.push('\n');

    for e in elements {
        let x = e.x - bounds.min.x;
        let y = e.y - bounds.min.y;
        let (w, h) = (e.width, e.height);
        let style_attrs = format!(
            r#"fill="{}" stroke="{}" stroke-width="{:.3}" opacity="{:.3}""#,
            svg_paint(e.style.fill),
            svg_paint(e.style.stroke),
            e.style.stroke_width,
            e.style.opacity.clamp(0.0, 1.0),
        );
        let stroke_attrs = format!(
            r#"fill="none" stroke="{}" stroke-width="{:.3}" opacity="{:.3}""#,
            svg_paint(e.style.stroke),
            e.style.stroke_width,
            e.style.opacity.clamp(0.0, 1.0),
        );

        match e.shape {
            ShapeKind::Rectangle => {
                out.push_str(&format!(
                    r#"<rect x="{x:.3}" y="{y:.3}" width="{w:.3}" height="{h:.3}" {style_attrs}/>"#
                ));
                out.push('\n');
            }
            ShapeKind::Circle => {
                let r = w.min(h) * 0.5;
                out.push_str(&format!(
                    r#"<circle cx="{:.3}" cy="{:.3}" r="{r:.3}" {style_attrs}/>"#,
                    x + w * 0.5,
                    y + h * 0.5,
                ));
                out.push('\n');
            }
            ShapeKind::Diamond => {
                out.push_str(&format!(
                    r#"<polygon points="{:.3},{y:.3} {:.3},{:.3} {:.3},{:.3} {x:.3},{:.3}" {style_attrs}/>"#,
                    x + w * 0.5,
                    x + w,
                    y + h * 0.5,
                    x + w * 0.5,
                    y + h,
                    y + h * 0.5,
                ));
                out.push('\n');
            }
            ShapeKind::Line => {
                let my = y + h * 0.5;
                out.push_str(&format!(
                    r#"<line x1="{x:.3}" y1="{my:.3}" x2="{:.3}" y2="{my:.3}" {stroke_attrs}/>"#,
                    x + w,
                ));
                out.push('\n');
            }
            ShapeKind::Arrow => {
                let (shaft, chevron) = arrow_geometry(x, y, w, h, 15.0, e.direction());
                out.push_str(&format!(
                    r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {stroke_attrs}/>"#,
                    shaft[0].x, shaft[0].y, shaft[1].x, shaft[1].y,
                ));
                out.push('\n');
                out.push_str(&format!(
                    r#"<polyline points="{:.3},{:.3} {:.3},{:.3} {:.3},{:.3}" {stroke_attrs}/>"#,
                    chevron[0].x,
                    chevron[0].y,
                    chevron[1].x,
                    chevron[1].y,
                    chevron[2].x,
                    chevron[2].y,
                ));
                out.push('\n');
            }
            ShapeKind::Text | ShapeKind::Connector => {}
        }

        if !e.text.is_empty() && e.shape != ShapeKind::Line {
            out.push_str(&format!(
                r#"<text x="{:.3}" y="{:.3}" text-anchor="middle" dominant-baseline="middle" font-size="{:.3}" font-family="{}" opacity="{:.3}">{}</text>"#,
                x + w * 0.5,
                y + h * 0.5,
                e.style.font_size(),
                escape_xml(e.style.font_family()),
                e.style.opacity.clamp(0.0, 1.0),
                escape_xml(&e.text),
            ));
            out.push('\n');
        }
    }

    out.push_str("</svg>\n");
    out
}

fn arrow_geometry(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    head: f32,
    direction: Direction,
) -> ([egui::Pos2; 2], [egui::Pos2; 3]) {
    let (cx, cy) = (x + w * 0.5, y + h * 0.5);
    match direction {
        Direction::Right => (
            [egui::pos2(x, cy), egui::pos2(x + w - head, cy)],
            [
                egui::pos2(x + w - head, y + h * 0.25),
                egui::pos2(x + w, cy),
                egui::pos2(x + w - head, y + h * 0.75),
            ],
        ),
        Direction::Left => (
            [egui::pos2(x + head, cy), egui::pos2(x + w, cy)],
            [
                egui::pos2(x + head, y + h * 0.25),
                egui::pos2(x, cy),
                egui::pos2(x + head, y + h * 0.75),
            ],
        ),
        Direction::Up => (
            [egui::pos2(cx, y + head), egui::pos2(cx, y + h)],
            [
                egui::pos2(x + w * 0.25, y + head),
                egui::pos2(cx, y),
                egui::pos2(x + w * 0.75, y + head),
            ],
        ),
        Direction::Down => (
            [egui::pos2(cx, y), egui::pos2(cx, y + h - head)],
            [
                egui::pos2(x + w * 0.25, y + h - head),
                egui::pos2(cx, y + h),
                egui::pos2(x + w * 0.75, y + h - head),
            ],
        ),
    }
}
