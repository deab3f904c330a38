use eframe::egui;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn from_pos2(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

/// RGBA color that round-trips CSS hex notation (`#rgb`, `#rrggbb`,
/// `#rrggbbaa`, or the keyword `transparent`) through serde, so diagram
/// files written by other front-ends keep their colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    pub fn from_color32(c: egui::Color32) -> Self {
        let [r, g, b, a] = c.to_array();
        Self { r, g, b, a }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") || s.eq_ignore_ascii_case("none") {
            return Some(TRANSPARENT);
        }
        let hex = s.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self {
                r: nibble(0)? * 17,
                g: nibble(1)? * 17,
                b: nibble(2)? * 17,
                a: 255,
            }),
            6 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: 255,
            }),
            8 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }

    pub fn to_css(self) -> String {
        if self.is_transparent() {
            "transparent".to_string()
        } else if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color {s:?}")))
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Diamond,
    Arrow,
    Text,
    Line,
    Connector,
}

impl ShapeKind {
    /// Prefix used when minting element ids, e.g. `rectangle_7`.
    pub fn key(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text => "text",
            ShapeKind::Line => "line",
            ShapeKind::Connector => "connector",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Diamond => "Diamond",
            ShapeKind::Arrow => "Arrow",
            ShapeKind::Text => "Text",
            ShapeKind::Line => "Line",
            ShapeKind::Connector => "Connector",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub opacity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

pub const DEFAULT_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: WHITE,
            stroke: BLACK,
            stroke_width: 2.0,
            opacity: 1.0,
            font_size: Some(DEFAULT_FONT_SIZE),
            font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
        }
    }
}

impl Style {
    pub fn default_for(shape: ShapeKind) -> Self {
        let mut style = Self::default();
        if shape == ShapeKind::Line {
            style.fill = TRANSPARENT;
        }
        style
    }

    pub fn font_size(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }
}

/// Endpoint bookkeeping for connector elements. Parsed and re-emitted for
/// file compatibility; not consulted by hit-testing or rendering.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Connections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
}

/// One placed shape. The diagram is an ordered `Vec<DiagramElement>`;
/// array order is z-order (later entries draw on top and hit-test first).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiagramElement {
    pub id: String,
    #[serde(rename = "type")]
    pub shape: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub text: String,
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Connections>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouped: Option<Vec<String>>,
}

impl DiagramElement {
    pub fn new(id: String, shape: ShapeKind, rect: egui::Rect) -> Self {
        Self {
            id,
            shape,
            x: rect.min.x,
            y: rect.min.y,
            width: rect.width(),
            height: rect.height(),
            text: if shape == ShapeKind::Text {
                "Text".to_string()
            } else {
                String::new()
            },
            style: Style::default_for(shape),
            direction: (shape == ShapeKind::Arrow).then_some(Direction::Right),
            connections: None,
            rotation: None,
            locked: None,
            grouped: None,
        }
    }

    pub fn bounds(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.x, self.y),
            egui::vec2(self.width, self.height),
        )
    }

    pub fn center(&self) -> egui::Pos2 {
        egui::pos2(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }

    /// Closed axis-aligned bounding-box test in world coordinates. The
    /// reserved `rotation` field is deliberately not applied here.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}
