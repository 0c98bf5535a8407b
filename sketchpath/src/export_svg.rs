// SVG export module
// Draws each segment as straight <line> primitives on a fixed-size pixel canvas

use crate::error::ExportError;
use log::info;
use sketchpath_common::{SvgOptions, ToolPath};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Write one <line> per adjacent point pair inside a segment
/// Coordinates are not rescaled; anything outside the canvas is clipped by the viewer
pub fn write_svg<W: Write>(path: &ToolPath, options: &SvgOptions, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        r#"<svg xmlns="{ns}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        ns = SVG_NS,
        w = options.width,
        h = options.height
    )?;
    writeln!(out, r#"  <g stroke="black" fill="none">"#)?;

    for (from, to) in path.drawn_pairs() {
        writeln!(
            out,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" />"#,
            from.x, from.y, to.x, to.y
        )?;
    }

    writeln!(out, "  </g>")?;
    writeln!(out, "</svg>")?;
    Ok(())
}

/// Export the toolpath to an SVG file
pub fn export_svg(
    path: &ToolPath,
    options: &SvgOptions,
    output_path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(output_path).map_err(|e| ExportError::io(output_path, e))?;
    let mut writer = BufWriter::new(file);
    write_svg(path, options, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::io(output_path, e))?;

    info!(
        "exported {} segment(s) to SVG: {} ({}x{} canvas)",
        path.segment_count(),
        output_path.display(),
        options.width,
        options.height
    );
    Ok(())
}
