//! Output emission: SVG documents, PNG rasterization, JSON shape dumps.

use resvg::usvg;
use tiny_skia::Pixmap;
use zellige::{RenderOptions, RenderedShape};

/// Build the SVG document for a rendered shape list.
///
/// A full-canvas background rect in palette slot 0, then every shape as a
/// closed, filled, unstroked path in painter's order.
pub fn shapes_to_svg(shapes: &[RenderedShape], options: &RenderOptions) -> String {
    let background = &options.palette[0];

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect x="0" y="0" width="{w}" height="{h}" fill="{bg}"/>
"#,
        w = options.width,
        h = options.height,
        bg = background
    ));

    for shape in shapes {
        if shape.path.len() < 3 {
            continue;
        }
        svg.push_str("<path d=\"");
        for (i, pt) in shape.path.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            svg.push_str(&format!("{} {:.2} {:.2} ", cmd, pt.x, pt.y));
        }
        svg.push_str(&format!("Z\" fill=\"{}\" stroke=\"none\"/>\n", shape.color));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Rasterize an SVG document to a PNG file via resvg.
pub fn write_png(svg: &str, width: u32, height: u32, path: &str) -> Result<(), String> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| format!("Failed to parse generated SVG: {}", e))?;

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| "Failed to create pixmap".to_string())?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba = image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| "Failed to convert pixmap".to_string())?;
    rgba.save(path)
        .map_err(|e| format!("Failed to write {}: {}", path, e))
}

/// Serialize the shape list as JSON.
pub fn shapes_to_json(shapes: &[RenderedShape]) -> Result<String, String> {
    serde_json::to_string_pretty(shapes).map_err(|e| format!("Failed to serialize shapes: {}", e))
}
