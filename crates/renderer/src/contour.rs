//! Isoline tracing with the marching squares algorithm.
//!
//! Traced paths are expressed in grid-index space: `x` is a fractional
//! column index and `y` a fractional row index into the traced field.
//! Segments produced for neighboring cells share edge crossings with
//! bit-identical coordinates, which is what the joiner relies on.

use geodraw_common::{GeoDrawError, GeoDrawResult};
use std::collections::{HashMap, HashSet};

/// A point in grid-index space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Exact hash key; `-0.0` and `0.0` map to the same key.
    fn key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    /// Endpoint keys in sorted order, equal for both directions.
    fn undirected_key(&self) -> ((u64, u64), (u64, u64)) {
        let (a, b) = (self.start.key(), self.end.key());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// A traced isoline path
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    /// First and last point coincide
    pub closed: bool,
}

/// Planar isoline tracer over a row-major scalar field.
pub trait IsolineTracer: Send + Sync {
    /// Trace the isolines of `field` (`width` columns, `height` rows) at
    /// `level`, returning zero or more open or closed paths.
    fn trace(
        &self,
        field: &[f64],
        width: usize,
        height: usize,
        level: f64,
    ) -> GeoDrawResult<Vec<Polyline>>;
}

/// Marching squares with linear edge interpolation and exact segment joining.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarchingSquares;

impl IsolineTracer for MarchingSquares {
    fn trace(
        &self,
        field: &[f64],
        width: usize,
        height: usize,
        level: f64,
    ) -> GeoDrawResult<Vec<Polyline>> {
        if field.len() != width * height {
            return Err(GeoDrawError::Generation(format!(
                "field has {} values but a {}x{} grid needs {}",
                field.len(),
                width,
                height,
                width * height
            )));
        }
        if !level.is_finite() {
            return Err(GeoDrawError::Generation(format!(
                "contour level {} is not finite",
                level
            )));
        }

        let segments = march_squares(field, width, height, level);
        Ok(connect_segments(&segments))
    }
}

/// Marching squares algorithm to generate contour segments
///
/// # Arguments
/// * `data` - Grid data in row-major order
/// * `width` - Grid width
/// * `height` - Grid height
/// * `level` - Contour level to extract
///
/// # Returns
/// Unordered line segments of the isoline. Grids smaller than 2x2 or with a
/// mismatched buffer produce none.
pub fn march_squares(data: &[f64], width: usize, height: usize, level: f64) -> Vec<Segment> {
    if width < 2 || height < 2 || data.len() != width * height {
        return vec![];
    }

    let mut segments = Vec::new();

    for y in 0..(height - 1) {
        for x in 0..(width - 1) {
            let tl = data[y * width + x];
            let tr = data[y * width + x + 1];
            let bl = data[(y + 1) * width + x];
            let br = data[(y + 1) * width + x + 1];

            // Cells touching missing data carry no isoline
            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut case = 0u8;
            if tl >= level {
                case |= 1;
            }
            if tr >= level {
                case |= 2;
            }
            if br >= level {
                case |= 4;
            }
            if bl >= level {
                case |= 8;
            }

            push_cell_segments(
                &mut segments,
                case,
                x as f64,
                y as f64,
                [tl, tr, br, bl],
                level,
            );
        }
    }

    segments
}

/// Append the segments of one marching squares cell.
///
/// Corners are ordered top-left, top-right, bottom-right, bottom-left.
/// Zero-length segments (level exactly at two adjacent corners) are dropped.
fn push_cell_segments(
    out: &mut Vec<Segment>,
    case: u8,
    x: f64,
    y: f64,
    corners: [f64; 4],
    level: f64,
) {
    let [tl, tr, br, bl] = corners;

    let top = || interpolate_edge(x, y, x + 1.0, y, tl, tr, level);
    let right = || interpolate_edge(x + 1.0, y, x + 1.0, y + 1.0, tr, br, level);
    let bottom = || interpolate_edge(x, y + 1.0, x + 1.0, y + 1.0, bl, br, level);
    let left = || interpolate_edge(x, y, x, y + 1.0, tl, bl, level);

    let mut push = |start: Point, end: Point| {
        if start != end {
            out.push(Segment { start, end });
        }
    };

    match case {
        0 | 15 => {}
        1 | 14 => push(left(), top()),
        2 | 13 => push(top(), right()),
        3 | 12 => push(left(), right()),
        4 | 11 => push(right(), bottom()),
        5 => {
            // Saddle: keep the two high corners separated
            push(left(), top());
            push(right(), bottom());
        }
        6 | 9 => push(top(), bottom()),
        7 | 8 => push(left(), bottom()),
        10 => {
            push(top(), right());
            push(left(), bottom());
        }
        _ => {}
    }
}

/// Linearly interpolate the level crossing along a cell edge.
fn interpolate_edge(x1: f64, y1: f64, x2: f64, y2: f64, val1: f64, val2: f64, level: f64) -> Point {
    if (val2 - val1).abs() < 1e-12 {
        return Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    }

    // An infinite corner pulls the crossing onto the finite end
    let t = if val1.is_infinite() {
        1.0
    } else if val2.is_infinite() {
        0.0
    } else {
        ((level - val1) / (val2 - val1)).clamp(0.0, 1.0)
    };
    Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

/// Connect unordered segments into polylines.
///
/// Segments with the same endpoints in either order are joined once; a
/// ridge lying exactly on the level is emitted by the cells on both of its
/// sides. Each chain is grown from its seed segment in both directions by
/// exact endpoint matching. A chain whose ends meet is marked closed.
pub fn connect_segments(segments: &[Segment]) -> Vec<Polyline> {
    if segments.is_empty() {
        return vec![];
    }

    let mut seen = HashSet::with_capacity(segments.len());
    let segments: Vec<Segment> = segments
        .iter()
        .copied()
        .filter(|seg| seen.insert(seg.undirected_key()))
        .collect();
    let segments = segments.as_slice();

    let mut by_endpoint: HashMap<(u64, u64), Vec<usize>> = HashMap::with_capacity(segments.len() * 2);
    for (i, seg) in segments.iter().enumerate() {
        by_endpoint.entry(seg.start.key()).or_default().push(i);
        by_endpoint.entry(seg.end.key()).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();

    for seed in 0..segments.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;

        let mut forward = vec![segments[seed].start, segments[seed].end];
        extend_chain(&mut forward, segments, &by_endpoint, &mut used);

        let closed = forward.len() > 2 && forward[0].key() == forward[forward.len() - 1].key();
        let points = if closed {
            forward
        } else {
            let mut backward = vec![segments[seed].start];
            extend_chain(&mut backward, segments, &by_endpoint, &mut used);
            backward.reverse();
            backward.pop();
            backward.extend(forward);
            backward
        };

        let closed = points.len() > 2 && points[0].key() == points[points.len() - 1].key();
        lines.push(Polyline { points, closed });
    }

    lines
}

/// Follow unused segments from the chain's tail until none connect.
fn extend_chain(
    chain: &mut Vec<Point>,
    segments: &[Segment],
    by_endpoint: &HashMap<(u64, u64), Vec<usize>>,
    used: &mut [bool],
) {
    while let Some(&tail) = chain.last() {
        let key = tail.key();
        let next = by_endpoint
            .get(&key)
            .and_then(|candidates| candidates.iter().copied().find(|&i| !used[i]));

        let Some(i) = next else { break };
        used[i] = true;

        let seg = &segments[i];
        let other = if seg.start.key() == key { seg.end } else { seg.start };
        chain.push(other);
    }
}
