use eframe::egui;

use crate::model::{Color, DiagramElement, Direction, ShapeKind};

#[derive(Clone, Copy, Debug)]
pub struct TemplateSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

pub const TEMPLATES: &[TemplateSpec] = &[
    TemplateSpec {
        id: "flowchart",
        name: "Basic Flowchart",
        category: "Process",
    },
    TemplateSpec {
        id: "org-chart",
        name: "Organization Chart",
        category: "Business",
    },
];

/// Builds the element list for a template id; unknown ids yield nothing.
pub fn instantiate(id: &str) -> Option<Vec<DiagramElement>> {
    match id {
        "flowchart" => Some(flowchart()),
        "org-chart" => Some(org_chart()),
        _ => None,
    }
}

fn shape(
    id: &str,
    kind: ShapeKind,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    text: &str,
    fill: Color,
    stroke: Color,
) -> DiagramElement {
    let mut e = DiagramElement::new(
        id.to_string(),
        kind,
        egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, h)),
    );
    e.text = text.to_string();
    e.style.fill = fill;
    e.style.stroke = stroke;
    e
}

fn arrow(id: &str, x: f32, y: f32, w: f32, h: f32, direction: Direction) -> DiagramElement {
    let mut e = shape(
        id,
        ShapeKind::Arrow,
        x,
        y,
        w,
        h,
        "",
        crate::model::TRANSPARENT,
        Color::rgb(0x37, 0x47, 0x4f),
    );
    e.direction = Some(direction);
    e
}

fn flowchart() -> Vec<DiagramElement> {
    let blue_fill = Color::rgb(0xe3, 0xf2, 0xfd);
    let blue = Color::rgb(0x19, 0x76, 0xd2);
    let purple_fill = Color::rgb(0xf3, 0xe5, 0xf5);
    let purple = Color::rgb(0x7b, 0x1f, 0xa2);
    let amber_fill = Color::rgb(0xff, 0xf8, 0xe1);
    let amber = Color::rgb(0xff, 0x8f, 0x00);
    vec![
        shape("start", ShapeKind::Circle, 100.0, 50.0, 80.0, 60.0, "Start", blue_fill, blue),
        arrow("flow_1", 130.0, 110.0, 20.0, 40.0, Direction::Down),
        shape("process", ShapeKind::Rectangle, 80.0, 150.0, 120.0, 60.0, "Process", purple_fill, purple),
        arrow("flow_2", 130.0, 210.0, 20.0, 40.0, Direction::Down),
        shape("decision", ShapeKind::Diamond, 80.0, 250.0, 120.0, 80.0, "Decision?", amber_fill, amber),
        arrow("flow_3", 130.0, 330.0, 20.0, 40.0, Direction::Down),
        shape("end", ShapeKind::Circle, 100.0, 370.0, 80.0, 60.0, "End", blue_fill, blue),
    ]
}

fn org_chart() -> Vec<DiagramElement> {
    let orange_fill = Color::rgb(0xff, 0xf3, 0xe0);
    let orange = Color::rgb(0xf5, 0x7c, 0x00);
    let green_fill = Color::rgb(0xe8, 0xf5, 0xe9);
    let green = Color::rgb(0x2e, 0x7d, 0x32);
    vec![
        shape("ceo", ShapeKind::Rectangle, 150.0, 50.0, 100.0, 60.0, "CEO", orange_fill, orange),
        shape("link_left", ShapeKind::Line, 80.0, 109.0, 120.0, 2.0, "", crate::model::TRANSPARENT, orange),
        shape("link_right", ShapeKind::Line, 200.0, 109.0, 120.0, 2.0, "", crate::model::TRANSPARENT, orange),
        shape("eng", ShapeKind::Rectangle, 40.0, 150.0, 100.0, 60.0, "Engineering", green_fill, green),
        shape("ops", ShapeKind::Rectangle, 260.0, 150.0, 100.0, 60.0, "Operations", green_fill, green),
    ]
}
