use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{WavefieldError, WavefieldResult};

/// One vertex of a [`SmoothPath`] with bezier handles relative to its point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Anchor point.
    pub point: Point,
    /// Incoming handle, relative to `point`.
    pub handle_in: Vec2,
    /// Outgoing handle, relative to `point`.
    pub handle_out: Vec2,
}

impl Segment {
    /// A corner segment without handles.
    pub fn corner(point: Point) -> Self {
        Self {
            point,
            handle_in: Vec2::ZERO,
            handle_out: Vec2::ZERO,
        }
    }
}

/// Retained vector path: ordered segments, optionally closed.
///
/// Handles are stored relative to their anchor, so moving a vertex carries its handles along and
/// the curve stays smooth without re-running [`SmoothPath::smooth_geometric`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmoothPath {
    segments: Vec<Segment>,
    closed: bool,
}

impl SmoothPath {
    /// Create an empty open path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a corner vertex.
    pub fn add(&mut self, point: Point) {
        self.segments.push(Segment::corner(point));
    }

    /// Connect the last vertex back to the first.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether [`SmoothPath::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Segments in drawing order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Fit handles through the current vertices.
    ///
    /// For a vertex `p1` with neighbours `p0` and `p2`, `k = f * d1 / (d1 + d2)` where `d1 = |p0 p1|`
    /// and `d2 = |p1 p2|`; the incoming handle is `(p0 - p2) * k` and the outgoing handle is
    /// `(p0 - p2) * (k - f)`. On an open path the end vertices keep no handles.
    pub fn smooth_geometric(&mut self, factor: f64) {
        let n = self.segments.len();
        if n < 3 && !self.closed {
            return;
        }
        let points: Vec<Point> = self.segments.iter().map(|s| s.point).collect();
        for i in 0..n {
            let (prev, next) = if self.closed {
                ((i + n - 1) % n, (i + 1) % n)
            } else if i == 0 || i + 1 == n {
                continue;
            } else {
                (i - 1, i + 1)
            };
            let (p0, p1, p2) = (points[prev], points[i], points[next]);
            let d1 = p0.distance(p1);
            let d2 = p1.distance(p2);
            let total = d1 + d2;
            if total <= f64::EPSILON {
                continue;
            }
            let vector = p0 - p2;
            let k = factor * d1 / total;
            let seg = &mut self.segments[i];
            seg.handle_in = vector * k;
            seg.handle_out = vector * (k - factor);
        }
    }

    /// Flatten into a `kurbo` path: lines where both facing handles are zero, cubics otherwise.
    pub fn to_bezpath(&self) -> BezPath {
        let mut out = BezPath::new();
        let Some(first) = self.segments.first() else {
            return out;
        };
        out.move_to(first.point);
        for pair in self.segments.windows(2) {
            push_edge(&mut out, &pair[0], &pair[1]);
        }
        if self.closed {
            if let Some(last) = self.segments.last()
                && self.segments.len() > 1
            {
                push_edge(&mut out, last, first);
            }
            out.close_path();
        }
        out
    }
}

fn push_edge(out: &mut BezPath, from: &Segment, to: &Segment) {
    if from.handle_out == Vec2::ZERO && to.handle_in == Vec2::ZERO {
        out.line_to(to.point);
    } else {
        out.curve_to(
            from.point + from.handle_out,
            to.point + to.handle_in,
            to.point,
        );
    }
}

/// Indexed access to a render target's vertices.
///
/// The animator only ever talks to paths through this trait, so any backend representation can
/// sit behind it.
pub trait VertexAccess {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;
    /// Vertex position at `index`.
    fn vertex(&self, index: usize) -> Option<Point>;
    /// Overwrite the vertical coordinate of vertex `index`.
    fn set_vertex_y(&mut self, index: usize, y: f64) -> WavefieldResult<()>;
}

impl VertexAccess for SmoothPath {
    fn vertex_count(&self) -> usize {
        self.segments.len()
    }

    fn vertex(&self, index: usize) -> Option<Point> {
        self.segments.get(index).map(|s| s.point)
    }

    fn set_vertex_y(&mut self, index: usize, y: f64) -> WavefieldResult<()> {
        let len = self.segments.len();
        let seg = self.segments.get_mut(index).ok_or_else(|| {
            WavefieldError::render(format!("vertex index {index} out of range (len {len})"))
        })?;
        seg.point.y = y;
        Ok(())
    }
}
