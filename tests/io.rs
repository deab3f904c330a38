use diagramflow::app::export::{self, ExportFormat, ExportQuality};
use diagramflow::app::file_io::{self, DiagramFile};
use diagramflow::app::library::DiagramLibrary;
use diagramflow::app::{svg, templates};
use diagramflow::error::Error;
use diagramflow::model::{Color, DiagramElement, Direction, ShapeKind};
use eframe::egui::{self, pos2, vec2};

fn element(id: &str, shape: ShapeKind, x: f32, y: f32, w: f32, h: f32) -> DiagramElement {
    DiagramElement::new(
        id.to_string(),
        shape,
        egui::Rect::from_min_size(pos2(x, y), vec2(w, h)),
    )
}

#[test]
fn import_rejects_payload_without_elements_array() {
    let err = file_io::parse_diagram(r#"{"fileName": "x"}"#).unwrap_err();
    assert!(matches!(err, Error::MissingElements));
    let err = file_io::parse_diagram(r#"{"elements": 7}"#).unwrap_err();
    assert!(matches!(err, Error::MissingElements));
    let err = file_io::parse_diagram("not json").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn import_accepts_minimal_payload() {
    let file = file_io::parse_diagram(r#"{"elements": []}"#).unwrap();
    assert_eq!(file.file_name, "Untitled Diagram");
    assert_eq!(file.version, "1.0");
    assert!(file.elements.is_empty());
}

#[test]
fn import_reads_web_frontend_payloads() {
    let json = r##"{
        "fileName": "demo",
        "timestamp": "2024-01-15T10:00:00Z",
        "version": "1.0",
        "elements": [{
            "id": "arrow_1700000000",
            "type": "arrow",
            "x": 10, "y": 20, "width": 80, "height": 40,
            "text": "",
            "style": {
                "fill": "transparent",
                "stroke": "#1976d2",
                "strokeWidth": 2,
                "opacity": 0.8,
                "fontSize": 14,
                "fontFamily": "Arial"
            },
            "direction": "down",
            "rotation": 0,
            "locked": false
        }]
    }"##;
    let file = file_io::parse_diagram(json).unwrap();
    let e = &file.elements[0];
    assert_eq!(e.shape, ShapeKind::Arrow);
    assert_eq!(e.direction(), Direction::Down);
    assert!(e.style.fill.is_transparent());
    assert_eq!(e.style.stroke, Color::rgb(0x19, 0x76, 0xd2));
    assert_eq!(e.style.opacity, 0.8);
    // Reserved fields survive the round-trip untouched.
    assert_eq!(e.rotation, Some(0.0));
    assert_eq!(e.locked, Some(false));
}

#[test]
fn diagram_file_roundtrip_keeps_wire_names() {
    let file = DiagramFile::snapshot(
        "My Flow",
        &[element("rectangle_1", ShapeKind::Rectangle, 0.0, 0.0, 50.0, 50.0)],
    );
    let json = file_io::to_json(&file).unwrap();
    assert!(json.contains("\"fileName\""));
    assert!(json.contains("\"strokeWidth\""));
    assert!(json.contains("\"type\": \"rectangle\""));
    assert!(json.contains("\"version\": \"1.0\""));

    let parsed = file_io::parse_diagram(&json).unwrap();
    assert_eq!(parsed, file);
}

#[test]
fn color_css_parsing() {
    assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
    assert_eq!(Color::parse("#1976d2"), Some(Color::rgb(0x19, 0x76, 0xd2)));
    assert_eq!(
        Color::parse("#10203040"),
        Some(Color {
            r: 0x10,
            g: 0x20,
            b: 0x30,
            a: 0x40
        })
    );
    assert!(Color::parse("transparent").unwrap().is_transparent());
    assert_eq!(Color::parse("red"), None);
    assert_eq!(Color::parse("#12345"), None);
    assert_eq!(Color::rgb(0x19, 0x76, 0xd2).to_css(), "#1976d2");
}

#[test]
fn iso8601_formatting() {
    assert_eq!(file_io::format_iso8601(0), "1970-01-01T00:00:00Z");
    assert_eq!(file_io::format_iso8601(1_700_000_000), "2023-11-14T22:13:20Z");
    assert!(!file_io::iso8601_utc_now().is_empty());
}

#[test]
fn export_rejects_empty_diagram() {
    for format in [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Svg] {
        let err = export::export_bytes(&[], format, ExportQuality::Low).unwrap_err();
        assert!(matches!(err, Error::EmptyDiagram));
    }
}

#[test]
fn raster_export_dimensions_follow_bounds_padding_and_scale() {
    let elements = vec![element(
        "rectangle_1",
        ShapeKind::Rectangle,
        0.0,
        0.0,
        50.0,
        50.0,
    )];
    // 50 world units + 20 padding each side = 90, times the scale factor.
    for (quality, expected) in [
        (ExportQuality::Low, 90),
        (ExportQuality::Medium, 135),
        (ExportQuality::High, 180),
    ] {
        let bytes = export::export_bytes(&elements, ExportFormat::Png, quality).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (expected, expected));
    }
}

#[test]
fn jpeg_export_is_decodable() {
    let elements = vec![element("circle_1", ShapeKind::Circle, 5.0, 5.0, 60.0, 40.0)];
    let bytes = export::export_bytes(&elements, ExportFormat::Jpeg, ExportQuality::Low).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (100, 80));
}

#[test]
fn svg_export_covers_every_shape_kind() {
    let mut arrow = element("arrow_1", ShapeKind::Arrow, 200.0, 0.0, 80.0, 40.0);
    arrow.direction = Some(Direction::Up);
    let elements = vec![
        element("rectangle_1", ShapeKind::Rectangle, 0.0, 0.0, 50.0, 50.0),
        element("circle_1", ShapeKind::Circle, 100.0, 0.0, 50.0, 50.0),
        element("diamond_1", ShapeKind::Diamond, 0.0, 100.0, 50.0, 50.0),
        element("line_1", ShapeKind::Line, 100.0, 100.0, 80.0, 2.0),
        arrow,
        element("text_1", ShapeKind::Text, 300.0, 0.0, 60.0, 20.0),
    ];
    let svg_text = String::from_utf8(
        export::export_bytes(&elements, ExportFormat::Svg, ExportQuality::Low).unwrap(),
    )
    .unwrap();
    assert!(svg_text.contains("<rect "));
    assert!(svg_text.contains("<circle "));
    assert!(svg_text.contains("<polygon "));
    assert!(svg_text.contains("<line "));
    assert!(svg_text.contains("<polyline "));
    // The text element contributes its (escaped) label.
    assert!(svg_text.contains(">Text</text>"));
}

#[test]
fn svg_labels_are_escaped_and_lines_never_labelled() {
    let mut labelled = element("rectangle_1", ShapeKind::Rectangle, 0.0, 0.0, 50.0, 50.0);
    labelled.text = "a < b & c".to_string();
    let mut line = element("line_1", ShapeKind::Line, 0.0, 100.0, 50.0, 2.0);
    line.text = "never drawn".to_string();

    let svg_text = svg::diagram_to_svg(&[labelled, line]);
    assert!(svg_text.contains("a &lt; b &amp; c"));
    assert!(!svg_text.contains("never drawn"));
}

#[test]
fn svg_viewbox_is_padded_content_bounds() {
    let elements = vec![element("rectangle_1", ShapeKind::Rectangle, 30.0, 40.0, 50.0, 60.0)];
    let bounds = svg::content_bounds(&elements);
    assert_eq!(bounds.min, pos2(10.0, 20.0));
    assert_eq!(bounds.size(), vec2(90.0, 100.0));
    let svg_text = svg::diagram_to_svg(&elements);
    assert!(svg_text.contains(r#"width="90.000" height="100.000""#));
}

#[test]
fn library_upserts_by_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let library = DiagramLibrary::new(dir.path().join("diagrams.json"));

    assert!(library.load_all().unwrap().is_empty());

    library
        .save(DiagramFile::snapshot("first", &[]))
        .unwrap();
    library
        .save(DiagramFile::snapshot(
            "second",
            &[element("rectangle_1", ShapeKind::Rectangle, 0.0, 0.0, 50.0, 50.0)],
        ))
        .unwrap();
    assert_eq!(library.load_all().unwrap().len(), 2);

    // Saving under an existing name replaces that entry in place.
    library
        .save(DiagramFile::snapshot(
            "first",
            &[element("circle_1", ShapeKind::Circle, 0.0, 0.0, 30.0, 30.0)],
        ))
        .unwrap();
    let all = library.load_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].file_name, "first");
    assert_eq!(all[0].elements.len(), 1);
    assert_eq!(all[0].elements[0].shape, ShapeKind::Circle);

    assert!(library.remove("second").unwrap());
    assert!(!library.remove("second").unwrap());
    assert_eq!(library.load_all().unwrap().len(), 1);
}

#[test]
fn templates_instantiate_with_stable_ids() {
    let flow = templates::instantiate("flowchart").unwrap();
    assert!(flow.iter().any(|e| e.id == "start" && e.shape == ShapeKind::Circle));
    assert!(flow.iter().any(|e| e.shape == ShapeKind::Diamond));

    let org = templates::instantiate("org-chart").unwrap();
    assert!(org.iter().any(|e| e.id == "ceo"));
    assert!(templates::instantiate("nope").is_none());
}
