// Contour tracing module
// Turns the cleaned ink mask into ordered pen-down segments

use image::imageops::replace;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use log::{debug, info};
use sketchpath_common::{Point, Segment, ToolPath};

/// Trace the outer boundary of every ink region and simplify it to its vertices
///
/// Only borders that are not nested inside a hole are kept, so each
/// connected region contributes exactly one segment and holes are not traced.
/// Segments come out in raster discovery order, which is stable for a given mask.
pub fn extract_path(mask: &GrayImage) -> ToolPath {
    // border following never starts an outer border in column 0, so trace
    // inside a one-pixel background frame and shift the points back
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    replace(&mut padded, mask, 1, 1);

    let contours = find_contours::<i32>(&padded);
    let total = contours.len();

    let segments: Vec<Segment> = contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let points: Vec<Point> = c
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            Segment::new(simplify_collinear(&points))
        })
        .collect();

    debug!("found {} border(s), {} external", total, segments.len());

    let path = ToolPath::new(segments);
    info!(
        "traced {} segment(s) with {} vertices",
        path.segment_count(),
        path.point_count()
    );
    path
}

/// Drop points that sit on a straight run between their neighbours
///
/// The contour is treated as a closed loop. A point stays when the direction
/// changes there, including the turnaround at the tip of a one-pixel-wide stroke.
fn simplify_collinear(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.dedup();
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }

    let n = pts.len();
    if n <= 2 {
        return pts;
    }

    let kept: Vec<Point> = (0..n)
        .filter(|&i| {
            let prev = pts[(i + n - 1) % n];
            let cur = pts[i];
            let next = pts[(i + 1) % n];
            !is_straight_run(prev, cur, next)
        })
        .map(|i| pts[i])
        .collect();

    // all-collinear input keeps its first point
    if kept.is_empty() {
        vec![pts[0]]
    } else {
        kept
    }
}

fn is_straight_run(prev: Point, cur: Point, next: Point) -> bool {
    let (ax, ay) = (cur.x - prev.x, cur.y - prev.y);
    let (bx, by) = (next.x - cur.x, next.y - cur.y);
    let cross = ax as i64 * by as i64 - ay as i64 * bx as i64;
    let dot = ax as i64 * bx as i64 + ay as i64 * by as i64;
    cross == 0 && dot > 0
}
