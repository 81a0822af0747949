//! Contour splitting and small path predicates on top of `kurbo::BezPath`.

use kurbo::{BezPath, CubicBez, Line, ParamCurve, PathEl, PathSeg, Point, QuadBez, Rect};

/// One drawable contour: a start point, its segments and whether it was closed.
///
/// The implicit closing edge of a closed contour is not part of `segments`;
/// see [`Contour::closing_line`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Contour {
    pub(crate) start: Point,
    pub(crate) segments: Vec<PathSeg>,
    pub(crate) closed: bool,
}

impl Contour {
    pub(crate) fn end(&self) -> Point {
        self.segments.last().map_or(self.start, |s| s.end())
    }

    /// Edge from the last point back to the start, if closed and not already there.
    pub(crate) fn closing_line(&self) -> Option<Line> {
        let end = self.end();
        (self.closed && end != self.start).then(|| Line::new(end, self.start))
    }

    /// Bounding box of all control points; contains the curve itself.
    pub(crate) fn control_bounds(&self) -> Rect {
        let mut r = Rect::from_points(self.start, self.start);
        for seg in &self.segments {
            match *seg {
                PathSeg::Line(l) => r = r.union_pt(l.p1),
                PathSeg::Quad(q) => r = r.union_pt(q.p1).union_pt(q.p2),
                PathSeg::Cubic(c) => r = r.union_pt(c.p1).union_pt(c.p2).union_pt(c.p3),
            }
        }
        r
    }
}

/// Iterator over the drawable contours of a path.
///
/// A MoveTo with no following drawing verb is dropped. Drawing verbs after a
/// ClosePath continue from the closed contour's start point.
pub(crate) struct Contours<'a> {
    els: &'a [PathEl],
    pos: usize,
    start: Point,
    last: Point,
}

pub(crate) fn contours(path: &BezPath) -> Contours<'_> {
    Contours {
        els: path.elements(),
        pos: 0,
        start: Point::ZERO,
        last: Point::ZERO,
    }
}

impl Iterator for Contours<'_> {
    type Item = Contour;

    fn next(&mut self) -> Option<Contour> {
        let mut segments = Vec::new();
        let mut has_draw = false;
        let mut after_move = false;

        while let Some(&el) = self.els.get(self.pos) {
            match el {
                PathEl::MoveTo(p) => {
                    if has_draw {
                        return Some(Contour {
                            start: self.start,
                            segments,
                            closed: false,
                        });
                    }
                    self.start = p;
                    self.last = p;
                    after_move = true;
                }
                PathEl::LineTo(p) => {
                    segments.push(PathSeg::Line(Line::new(self.last, p)));
                    self.last = p;
                    has_draw = true;
                }
                PathEl::QuadTo(p1, p2) => {
                    segments.push(PathSeg::Quad(QuadBez::new(self.last, p1, p2)));
                    self.last = p2;
                    has_draw = true;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    segments.push(PathSeg::Cubic(CubicBez::new(self.last, p1, p2, p3)));
                    self.last = p3;
                    has_draw = true;
                }
                PathEl::ClosePath => {
                    self.pos += 1;
                    self.last = self.start;
                    if has_draw || after_move {
                        return Some(Contour {
                            start: self.start,
                            segments,
                            closed: true,
                        });
                    }
                    continue;
                }
            }
            self.pos += 1;
        }

        has_draw.then(|| Contour {
            start: self.start,
            segments,
            closed: false,
        })
    }
}

/// Append a segment's verbs to `dst`; the pen is assumed to be at `seg.start()`.
pub(crate) fn push_seg(dst: &mut BezPath, seg: PathSeg) {
    match seg {
        PathSeg::Line(l) => dst.line_to(l.p1),
        PathSeg::Quad(q) => dst.quad_to(q.p1, q.p2),
        PathSeg::Cubic(c) => dst.curve_to(c.p1, c.p2, c.p3),
    }
}

/// Return the endpoints when `path` is exactly one MoveTo followed by one LineTo.
pub fn as_line(path: &BezPath) -> Option<(Point, Point)> {
    match path.elements() {
        [PathEl::MoveTo(a), PathEl::LineTo(b)] => Some((*a, *b)),
        _ => None,
    }
}

/// Return every contour's endpoints when each contour is a single open line.
pub fn as_lines(path: &BezPath) -> Option<Vec<(Point, Point)>> {
    let mut out = Vec::new();
    for c in contours(path) {
        match c.segments.as_slice() {
            [PathSeg::Line(l)] if !c.closed => out.push((l.p0, l.p1)),
            _ => return None,
        }
    }
    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/contour.rs"]
mod tests;
