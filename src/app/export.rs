use std::io::Cursor;
use std::path::Path;

use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use super::svg;
use crate::error::{Error, Result};
use crate::model::DiagramElement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Svg => "SVG",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportQuality {
    Low,
    Medium,
    High,
}

impl ExportQuality {
    pub fn scale(self) -> f32 {
        match self {
            ExportQuality::Low => 1.0,
            ExportQuality::Medium => 1.5,
            ExportQuality::High => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportQuality::Low => "Low (1x)",
            ExportQuality::Medium => "Medium (1.5x)",
            ExportQuality::High => "High (2x)",
        }
    }
}

/// Renders the diagram to encoded bytes in the requested format. An empty
/// diagram is rejected before any work happens.
pub fn export_bytes(
    elements: &[DiagramElement],
    format: ExportFormat,
    quality: ExportQuality,
) -> Result<Vec<u8>> {
    if elements.is_empty() {
        return Err(Error::EmptyDiagram);
    }
    let svg_text = svg::diagram_to_svg(elements);
    match format {
        ExportFormat::Svg => Ok(svg_text.into_bytes()),
        ExportFormat::Png | ExportFormat::Jpeg => {
            let pixmap = rasterize(&svg_text, quality.scale())?;
            encode(pixmap, format)
        }
    }
}

pub fn export_to_file(
    path: &Path,
    elements: &[DiagramElement],
    format: ExportFormat,
    quality: ExportQuality,
) -> Result<()> {
    let bytes = export_bytes(elements, format, quality)?;
    std::fs::write(path, bytes)?;
    log::info!(
        "exported {} element(s) as {} to {}",
        elements.len(),
        format.label(),
        path.display()
    );
    Ok(())
}

/// Rasterizes the SVG onto a white pixmap whose dimensions are the SVG's
/// own, multiplied by `scale` (so a 50x50 rect at the origin with 20 units
/// of padding lands on a `(50+40)*scale` square canvas).
fn rasterize(svg_text: &str, scale: f32) -> Result<Pixmap> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree =
        usvg::Tree::from_str(svg_text, &options).map_err(|e| Error::Svg(e.to_string()))?;
    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| Error::Svg("render surface too large".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap)
}

fn encode(pixmap: Pixmap, format: ExportFormat) -> Result<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| Error::Encode("pixel buffer size mismatch".to_string()))?;
    let mut out = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => img
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| Error::Encode(e.to_string()))?,
        ExportFormat::Jpeg => image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_to(&mut out, image::ImageFormat::Jpeg)
            .map_err(|e| Error::Encode(e.to_string()))?,
        ExportFormat::Svg => unreachable!("svg is emitted without rasterizing"),
    }
    Ok(out.into_inner())
}
