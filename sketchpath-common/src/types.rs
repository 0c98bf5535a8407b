use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer 2D point in image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One continuous pen-down stroke: the vertices of a single traced contour
///
/// A segment always holds at least one point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Segment {
    points: Vec<Point>,
}

impl Segment {
    /// Returns `None` for an empty point list
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Adjacent point pairs a pen draws a line between
    pub fn drawn_pairs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl TryFrom<Vec<Point>> for Segment {
    type Error = &'static str;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Segment::new(points).ok_or("segment must contain at least one point")
    }
}

impl From<Segment> for Vec<Point> {
    fn from(segment: Segment) -> Self {
        segment.points
    }
}

/// Element of the flattened point stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEvent {
    Point(Point),
    /// Pen is lifted; no line to whatever point follows
    PenLift,
}

/// Ordered segments traced from one image, in contour discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPath {
    segments: Vec<Segment>,
}

impl ToolPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild a path from a flat stream of points and pen lifts
    ///
    /// Leading, repeated and trailing pen lifts never produce empty segments.
    /// Points after the last pen lift still form a final segment.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = PathEvent>,
    {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for event in events {
            match event {
                PathEvent::Point(p) => current.push(p),
                PathEvent::PenLift => {
                    if let Some(segment) = Segment::new(std::mem::take(&mut current)) {
                        segments.push(segment);
                    }
                }
            }
        }

        if let Some(segment) = Segment::new(current) {
            segments.push(segment);
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All points in traversal order (segment order, then point order)
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| s.points().iter().copied())
    }

    /// Every pair of points joined by a drawn line; never spans two segments
    pub fn drawn_pairs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.segments.iter().flat_map(Segment::drawn_pairs)
    }

    /// Flattened stream with a pen lift after every segment, including the last
    pub fn events(&self) -> impl Iterator<Item = PathEvent> + '_ {
        self.segments.iter().flat_map(|s| {
            s.points()
                .iter()
                .map(|&p| PathEvent::Point(p))
                .chain(std::iter::once(PathEvent::PenLift))
        })
    }
}

/// Output format for serialized toolpaths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xml,
    Svg,
    Gcode,
    All,
}

impl OutputFormat {
    /// Concrete formats, in the order they are written
    pub const CONCRETE: [OutputFormat; 3] =
        [OutputFormat::Xml, OutputFormat::Svg, OutputFormat::Gcode];

    /// Whether writing `self` produces `format`
    pub fn includes(&self, format: OutputFormat) -> bool {
        *self == OutputFormat::All || *self == format
    }

    /// File extension; `None` for `All`
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Xml => Some("xml"),
            OutputFormat::Svg => Some("svg"),
            OutputFormat::Gcode => Some("gcode"),
            OutputFormat::All => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Xml => write!(f, "XML point list"),
            OutputFormat::Svg => write!(f, "SVG"),
            OutputFormat::Gcode => write!(f, "G-code"),
            OutputFormat::All => write!(f, "XML + SVG + G-code"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(points: &[(i32, i32)]) -> Segment {
        Segment::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(Segment::new(Vec::new()).is_none());
        assert!(serde_json::from_str::<Segment>("[]").is_err());
    }

    #[test]
    fn test_events_mark_every_segment_end() {
        let path = ToolPath::new(vec![seg(&[(0, 0), (1, 0)]), seg(&[(5, 5)])]);
        let events: Vec<_> = path.events().collect();

        assert_eq!(
            events,
            vec![
                PathEvent::Point(Point::new(0, 0)),
                PathEvent::Point(Point::new(1, 0)),
                PathEvent::PenLift,
                PathEvent::Point(Point::new(5, 5)),
                PathEvent::PenLift,
            ]
        );
        assert_eq!(ToolPath::from_events(events), path);
    }

    #[test]
    fn test_from_events_tolerates_stray_pen_lifts() {
        let events = vec![
            PathEvent::PenLift,
            PathEvent::Point(Point::new(1, 1)),
            PathEvent::PenLift,
            PathEvent::PenLift,
            PathEvent::Point(Point::new(2, 2)),
            PathEvent::Point(Point::new(3, 3)),
        ];
        let path = ToolPath::from_events(events);

        assert_eq!(path.segment_count(), 2);
        assert_eq!(path.segments()[1].points(), &[Point::new(2, 2), Point::new(3, 3)]);
    }

    #[test]
    fn test_drawn_pairs_stay_inside_segments() {
        let path = ToolPath::new(vec![seg(&[(0, 0), (4, 0), (4, 4)]), seg(&[(10, 10), (12, 10)])]);
        let pairs: Vec<_> = path.drawn_pairs().collect();

        assert_eq!(pairs.len(), 3);
        assert!(!pairs.contains(&(Point::new(4, 4), Point::new(10, 10))));
        assert_eq!(path.point_count(), 5);
    }

    #[test]
    fn test_empty_path() {
        let path = ToolPath::empty();
        assert!(path.is_empty());
        assert_eq!(path.events().count(), 0);
        assert_eq!(path.drawn_pairs().count(), 0);
    }

    #[test]
    fn test_output_format_includes() {
        assert!(OutputFormat::All.includes(OutputFormat::Svg));
        assert!(OutputFormat::Gcode.includes(OutputFormat::Gcode));
        assert!(!OutputFormat::Xml.includes(OutputFormat::Gcode));
        assert_eq!(OutputFormat::All.extension(), None);
    }
}
