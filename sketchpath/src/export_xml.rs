// XML export module
// Writes every toolpath vertex as a <Point> element with <X> and <Y> text fields

use crate::error::ExportError;
use log::info;
use sketchpath_common::ToolPath;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write the point list in traversal order
/// Pen lifts are not represented, so segment boundaries cannot be recovered from this format
pub fn write_xml<W: Write>(path: &ToolPath, out: &mut W) -> io::Result<()> {
    if path.is_empty() {
        writeln!(out, "<Coordinates />")?;
        return Ok(());
    }

    writeln!(out, "<Coordinates>")?;
    for pt in path.points() {
        writeln!(out, "  <Point><X>{}</X><Y>{}</Y></Point>", pt.x, pt.y)?;
    }
    writeln!(out, "</Coordinates>")?;
    Ok(())
}

/// Export the point list to an XML file
pub fn export_xml(path: &ToolPath, output_path: &Path) -> Result<(), ExportError> {
    let file = File::create(output_path).map_err(|e| ExportError::io(output_path, e))?;
    let mut writer = BufWriter::new(file);
    write_xml(path, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::io(output_path, e))?;

    info!("exported {} point(s) to XML: {}", path.point_count(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpath_common::{Point, Segment};

    fn render(path: &ToolPath) -> String {
        let mut buf = Vec::new();
        write_xml(path, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_points_in_traversal_order() {
        let path = ToolPath::new(vec![
            Segment::new(vec![Point::new(1, 2), Point::new(3, 4)]).unwrap(),
            Segment::new(vec![Point::new(50, 60)]).unwrap(),
        ]);
        let xml = render(&path);

        assert_eq!(
            xml,
            concat!(
                "<Coordinates>\n",
                "  <Point><X>1</X><Y>2</Y></Point>\n",
                "  <Point><X>3</X><Y>4</Y></Point>\n",
                "  <Point><X>50</X><Y>60</Y></Point>\n",
                "</Coordinates>\n",
            )
        );
    }

    #[test]
    fn test_empty_path_is_self_closing_root() {
        assert_eq!(render(&ToolPath::empty()), "<Coordinates />\n");
    }

    #[test]
    fn test_export_to_missing_directory_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.xml");

        let err = export_xml(&ToolPath::empty(), &target).unwrap_err();
        assert!(err.to_string().contains("out.xml"));
    }
}
