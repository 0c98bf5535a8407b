// G-code export module
// Drives a pen plotter: rapid moves with the pen up, feed moves with the pen down

use crate::error::ExportError;
use log::info;
use sketchpath_common::{GcodeOptions, PathEvent, Point, ToolPath};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PenState {
    Up,
    Down,
}

/// Write a complete G-code program for the toolpath
///
/// Each segment starts with a `G0` rapid move to its first point, followed by
/// one `G1` feed move per further point. A pen lift returns to rapid mode for the
/// next segment. The program always ends with a return to the origin and `M30`.
pub fn write_gcode<W: Write>(
    path: &ToolPath,
    options: &GcodeOptions,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "G21 ; units: millimeters")?;
    writeln!(out, "G90 ; absolute positioning")?;
    writeln!(out, "G28 ; home all axes")?;

    let mut state = PenState::Up;
    for event in path.events() {
        state = match (state, event) {
            (PenState::Up, PathEvent::Point(p)) => {
                writeln!(out, "G0 {}", coords(p, options.scale))?;
                PenState::Down
            }
            (PenState::Down, PathEvent::Point(p)) => {
                writeln!(out, "G1 {} F{}", coords(p, options.scale), options.feed_rate)?;
                PenState::Down
            }
            (_, PathEvent::PenLift) => PenState::Up,
        };
    }

    writeln!(out, "G0 X0 Y0 ; return to origin")?;
    writeln!(out, "M30 ; end of program")?;
    Ok(())
}

/// Export the toolpath to a G-code file
pub fn export_gcode(
    path: &ToolPath,
    options: &GcodeOptions,
    output_path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(output_path).map_err(|e| ExportError::io(output_path, e))?;
    let mut writer = BufWriter::new(file);
    write_gcode(path, options, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::io(output_path, e))?;

    info!(
        "exported {} segment(s) to G-code: {} (feed F{}, scale {})",
        path.segment_count(),
        output_path.display(),
        options.feed_rate,
        options.scale
    );
    Ok(())
}

fn coords(p: Point, scale: f64) -> String {
    format!("X{} Y{}", format_value(p.x, scale), format_value(p.y, scale))
}

/// Integers stay integers at unit scale; scaled values keep at most 3 decimals
fn format_value(v: i32, scale: f64) -> String {
    if scale == 1.0 {
        return v.to_string();
    }

    let text = format!("{:.3}", v as f64 * scale);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        t => t.to_string(),
    }
}
