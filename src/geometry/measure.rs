//! Arc-length measurement over the contours of a path.
//!
//! Curves are measured by adaptive flattening: a quad or cubic is split at
//! `t = 0.5` while its control points stray from the chord by more than the
//! tolerance, and each leaf contributes its chord length. The resulting
//! table maps cumulative distance back to `(segment, t)` so sub-ranges can be
//! extracted with the original verb types.
//!
//! All distances and curve parameters are `f64`. Parameters are linearly
//! interpolated between table entries, so a distance always maps to the same
//! `t` no matter which caller asks.

use kurbo::{
    BezPath, CubicBez, Line, ParamCurve, ParamCurveDeriv, PathSeg, Point, QuadBez, Rect, Vec2,
};

use crate::geometry::contour::{Contours, contours, push_seg};

/// Maximum control-point deviation (in device pixels) accepted as flat.
const CHEAP_DIST_LIMIT: f64 = 0.5;

/// Smallest parameter span that is still subdivided.
const MIN_T_SPAN: f64 = 1.0 / (1u32 << 20) as f64;

#[derive(Clone, Copy, Debug)]
struct Piece {
    /// Cumulative distance at the end of this piece.
    distance: f64,
    /// Index into `ArcLengthMeasure::segs`.
    seg: usize,
    /// Curve parameter at the end of this piece.
    t: f64,
    end: Point,
}

/// Walks the contours of a path one at a time, measuring each.
///
/// A fresh measure is positioned on the first drawable contour. Contours of
/// zero length are still visited (with `length() == 0`) so callers can treat
/// them as dots; a contour whose length overflows ends the iteration.
pub struct ArcLengthMeasure<'a> {
    contours: Contours<'a>,
    force_closed: bool,
    tolerance: f64,
    segs: Vec<PathSeg>,
    pieces: Vec<Piece>,
    start: Point,
    bounds: Rect,
    length: f64,
    closed: bool,
    current: bool,
    exhausted: bool,
}

impl<'a> ArcLengthMeasure<'a> {
    /// Measure `path`, optionally treating every contour as closed.
    ///
    /// `res_scale` is the number of device pixels per path unit; larger
    /// values flatten curves more finely.
    pub fn new(path: &'a BezPath, force_closed: bool, res_scale: f64) -> Self {
        let res_scale = if res_scale.is_finite() && res_scale > 0.0 {
            res_scale
        } else {
            1.0
        };
        let mut m = Self {
            contours: contours(path),
            force_closed,
            tolerance: CHEAP_DIST_LIMIT / res_scale,
            segs: Vec::new(),
            pieces: Vec::new(),
            start: Point::ZERO,
            bounds: Rect::ZERO,
            length: 0.0,
            closed: false,
            current: false,
            exhausted: false,
        };
        m.next_contour();
        m
    }

    /// Length of the current contour, 0 when there is none.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Whether the current contour is closed (or force-closed).
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the measure is positioned on a contour.
    pub fn has_contour(&self) -> bool {
        self.current
    }

    /// First point of the current contour.
    pub fn start_point(&self) -> Option<Point> {
        self.current.then_some(self.start)
    }

    /// Bounding box of the current contour's control points.
    pub(crate) fn control_bounds(&self) -> Rect {
        self.bounds
    }

    /// Advance to the next contour. Returns `false` once the path is exhausted.
    pub fn next_contour(&mut self) -> bool {
        self.segs.clear();
        self.pieces.clear();
        self.length = 0.0;
        self.closed = false;
        self.current = false;

        if self.exhausted {
            return false;
        }
        let Some(contour) = self.contours.next() else {
            self.exhausted = true;
            return false;
        };

        let closing = if self.force_closed && !contour.closed {
            let end = contour.end();
            (end != contour.start).then(|| Line::new(end, contour.start))
        } else {
            contour.closing_line()
        };

        self.start = contour.start;
        self.bounds = contour.control_bounds();
        self.closed = contour.closed || self.force_closed;
        self.segs = contour.segments;
        if let Some(line) = closing {
            self.segs.push(PathSeg::Line(line));
        }

        let mut distance = 0.0;
        for i in 0..self.segs.len() {
            let seg = self.segs[i];
            distance = match seg {
                PathSeg::Line(l) => self.line_piece(l, distance, i),
                PathSeg::Quad(q) => self.quad_pieces(q, distance, 0.0, 1.0, i),
                PathSeg::Cubic(c) => self.cubic_pieces(c, distance, 0.0, 1.0, i),
            };
        }

        if !distance.is_finite() {
            self.segs.clear();
            self.pieces.clear();
            self.closed = false;
            self.exhausted = true;
            return false;
        }

        self.length = distance;
        self.current = true;
        true
    }

    /// Append the part of the current contour between arc lengths `start_d`
    /// and `stop_d` to `dst`.
    ///
    /// The range is clamped to `[0, length]`. A MoveTo is emitted when
    /// `start_with_move_to` is set or `dst` is empty. Returns `false` (and
    /// appends nothing) for an inverted or NaN range or a zero-length contour.
    pub fn get_segment(
        &self,
        start_d: f64,
        stop_d: f64,
        dst: &mut BezPath,
        start_with_move_to: bool,
    ) -> bool {
        if self.pieces.is_empty() || start_d.is_nan() || stop_d.is_nan() {
            return false;
        }
        let start_d = start_d.max(0.0);
        let stop_d = stop_d.min(self.length);
        if !(start_d <= stop_d) {
            return false;
        }

        let (si, start_t) = self.distance_to_segment(start_d);
        let (ei, stop_t) = self.distance_to_segment(stop_d);
        let first = self.pieces[si].seg;
        let last = self.pieces[ei].seg;

        if start_with_move_to || dst.elements().is_empty() {
            dst.move_to(self.segs[first].eval(start_t));
        }

        if first == last {
            if start_t == stop_t {
                // Zero-length "on" span: keep a zero-length line so caps are drawn.
                dst.line_to(self.segs[first].eval(stop_t));
            } else {
                push_seg(dst, subsegment(self.segs[first], start_t, stop_t));
            }
            return true;
        }

        if start_t < 1.0 {
            push_seg(dst, subsegment(self.segs[first], start_t, 1.0));
        }
        let mut prev = first;
        for piece in &self.pieces[si + 1..ei] {
            if piece.seg != prev && piece.seg != last {
                push_seg(dst, self.segs[piece.seg]);
                prev = piece.seg;
            }
        }
        if stop_t > 0.0 {
            push_seg(dst, subsegment(self.segs[last], 0.0, stop_t));
        }
        true
    }

    /// Position and unit tangent at `distance` (clamped to the contour).
    ///
    /// The tangent is zero where the curve has no direction.
    pub fn pos_tan(&self, distance: f64) -> Option<(Point, Vec2)> {
        if self.pieces.is_empty() || distance.is_nan() {
            return None;
        }
        let (i, t) = self.distance_to_segment(distance.clamp(0.0, self.length));
        let seg = self.segs[self.pieces[i].seg];
        let mut tan = match seg {
            PathSeg::Line(l) => l.p1 - l.p0,
            PathSeg::Quad(q) => q.deriv().eval(t).to_vec2(),
            PathSeg::Cubic(c) => c.deriv().eval(t).to_vec2(),
        };
        if tan.hypot() == 0.0 {
            tan = seg.end() - seg.start();
        }
        let len = tan.hypot();
        let tan = if len > 0.0 { tan / len } else { Vec2::ZERO };
        Some((seg.eval(t), tan))
    }

    /// Smallest arc-length range of the current contour that may intersect
    /// `bounds`, or `None` when the contour lies entirely outside.
    ///
    /// Straight pieces are clipped exactly; curved pieces count as a whole
    /// when their chord, widened by the tolerance, touches `bounds`.
    pub fn visible_range(&self, bounds: Rect) -> Option<(f64, f64)> {
        if self.pieces.is_empty() {
            return None;
        }
        let bounds = bounds.inflate(self.tolerance, self.tolerance);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut prev_end = self.start;
        let mut prev_d = 0.0;
        for piece in &self.pieces {
            let chord = Line::new(prev_end, piece.end);
            let span = piece.distance - prev_d;
            let hit = match self.segs[piece.seg] {
                PathSeg::Line(_) => clip_line(chord, bounds)
                    .map(|(t0, t1)| (prev_d + span * t0, prev_d + span * t1)),
                _ => overlaps(Rect::from_points(chord.p0, chord.p1), bounds)
                    .then_some((prev_d, piece.distance)),
            };
            if let Some((a, b)) = hit {
                lo = lo.min(a);
                hi = hi.max(b);
            }
            prev_end = piece.end;
            prev_d = piece.distance;
        }
        (lo <= hi).then_some((lo, hi))
    }

    fn distance_to_segment(&self, distance: f64) -> (usize, f64) {
        let idx = self
            .pieces
            .partition_point(|p| p.distance < distance)
            .min(self.pieces.len() - 1);
        let piece = self.pieces[idx];

        let (start_t, start_d) = match idx.checked_sub(1).map(|i| self.pieces[i]) {
            Some(prev) if prev.seg == piece.seg => (prev.t, prev.distance),
            Some(prev) => (0.0, prev.distance),
            None => (0.0, 0.0),
        };

        let span = piece.distance - start_d;
        let t = start_t + (piece.t - start_t) * ((distance - start_d) / span);
        (idx, t.clamp(start_t, piece.t))
    }

    fn line_piece(&mut self, l: Line, distance: f64, seg: usize) -> f64 {
        let next = distance + l.p0.distance(l.p1);
        // A tiny step can vanish against a large running total.
        if next > distance {
            self.pieces.push(Piece {
                distance: next,
                seg,
                t: 1.0,
                end: l.p1,
            });
        }
        next
    }

    fn quad_pieces(&mut self, q: QuadBez, distance: f64, t0: f64, t1: f64, seg: usize) -> f64 {
        if t1 - t0 >= MIN_T_SPAN && quad_too_curvy(q, self.tolerance) {
            let half = 0.5 * (t0 + t1);
            let (a, b) = q.subdivide();
            let distance = self.quad_pieces(a, distance, t0, half, seg);
            return self.quad_pieces(b, distance, half, t1, seg);
        }
        let next = distance + q.p0.distance(q.p2);
        if next > distance {
            self.pieces.push(Piece {
                distance: next,
                seg,
                t: t1,
                end: q.p2,
            });
        }
        next
    }

    fn cubic_pieces(&mut self, c: CubicBez, distance: f64, t0: f64, t1: f64, seg: usize) -> f64 {
        if t1 - t0 >= MIN_T_SPAN && cubic_too_curvy(c, self.tolerance) {
            let half = 0.5 * (t0 + t1);
            let (a, b) = c.subdivide();
            let distance = self.cubic_pieces(a, distance, t0, half, seg);
            return self.cubic_pieces(b, distance, half, t1, seg);
        }
        let next = distance + c.p0.distance(c.p3);
        if next > distance {
            self.pieces.push(Piece {
                distance: next,
                seg,
                t: t1,
                end: c.p3,
            });
        }
        next
    }
}

/// `seg` restricted to `[t0, t1]`, with the untouched endpoints kept bit-exact.
fn subsegment(seg: PathSeg, t0: f64, t1: f64) -> PathSeg {
    if t0 <= 0.0 && t1 >= 1.0 {
        return seg;
    }
    let mut sub = seg.subsegment(t0..t1);
    if t0 <= 0.0 {
        set_start(&mut sub, seg.start());
    }
    if t1 >= 1.0 {
        set_end(&mut sub, seg.end());
    }
    sub
}

fn set_start(seg: &mut PathSeg, p: Point) {
    match seg {
        PathSeg::Line(l) => l.p0 = p,
        PathSeg::Quad(q) => q.p0 = p,
        PathSeg::Cubic(c) => c.p0 = p,
    }
}

fn set_end(seg: &mut PathSeg, p: Point) {
    match seg {
        PathSeg::Line(l) => l.p1 = p,
        PathSeg::Quad(q) => q.p2 = p,
        PathSeg::Cubic(c) => c.p3 = p,
    }
}

fn quad_too_curvy(q: QuadBez, tolerance: f64) -> bool {
    // Midpoint of the curve minus midpoint of the chord: p1/2 - (p0 + p2)/4.
    let dx = 0.5 * q.p1.x - 0.25 * (q.p0.x + q.p2.x);
    let dy = 0.5 * q.p1.y - 0.25 * (q.p0.y + q.p2.y);
    dx.abs().max(dy.abs()) > tolerance
}

fn cubic_too_curvy(c: CubicBez, tolerance: f64) -> bool {
    cheap_dist_exceeds(c.p1, c.p0.lerp(c.p3, 1.0 / 3.0), tolerance)
        || cheap_dist_exceeds(c.p2, c.p0.lerp(c.p3, 2.0 / 3.0), tolerance)
}

fn cheap_dist_exceeds(a: Point, b: Point, tolerance: f64) -> bool {
    (a.x - b.x).abs().max((a.y - b.y).abs()) > tolerance
}

/// Parameter range of `line` inside `r` (Liang-Barsky), if any.
fn clip_line(line: Line, r: Rect) -> Option<(f64, f64)> {
    let d = line.p1 - line.p0;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let edges = [
        (-d.x, line.p0.x - r.x0),
        (d.x, r.x1 - line.p0.x),
        (-d.y, line.p0.y - r.y0),
        (d.y, r.y1 - line.p0.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

/// Inclusive overlap test; degenerate rects still count.
pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Whether `outer` fully contains `inner`.
pub(crate) fn contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/measure.rs"]
mod tests;
