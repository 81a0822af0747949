//! Round the corners between consecutive line segments.

use kurbo::{BezPath, PathSeg, Point, Vec2};

use crate::foundation::error::{PathFxError, PathFxResult};
use crate::geometry::contour::contours;

/// Replaces each line-line corner with a quadratic arc of the given radius.
///
/// Curves are passed through unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerEffect {
    radius: f64,
}

impl CornerEffect {
    /// `radius` must be finite and positive.
    pub fn new(radius: f64) -> PathFxResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PathFxError::validation(
                "corner radius must be finite and > 0",
            ));
        }
        Ok(Self { radius })
    }

    /// Corner radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub(crate) fn filter(&self, src: &BezPath) -> PathFxResult<BezPath> {
        if !(self.radius > 0.0) {
            return Err(PathFxError::filter("corner radius must be > 0"));
        }

        let mut dst = BezPath::new();
        for contour in contours(src) {
            let closing = contour.closing_line();
            let mut segs = contour.segments;
            if let Some(line) = closing {
                segs.push(PathSeg::Line(line));
            }
            if segs.is_empty() {
                continue;
            }

            let closed = contour.closed;
            let mut pen_down = !closed;
            if !closed {
                dst.move_to(contour.start);
            }

            let mut first_step = Vec2::ZERO;
            let mut last_corner = contour.start;
            let mut last_was_line = false;

            for (i, seg) in segs.into_iter().enumerate() {
                match seg {
                    PathSeg::Line(l) => {
                        let (step, draw_line) = compute_step(l.p0, l.p1, self.radius);
                        if pen_down {
                            dst.quad_to(l.p0, l.p0 + step);
                        } else {
                            dst.move_to(l.p0 + step);
                            pen_down = true;
                        }
                        if draw_line {
                            dst.line_to(l.p1 - step);
                        }
                        if i == 0 {
                            first_step = step;
                        }
                        last_corner = l.p1;
                        last_was_line = true;
                    }
                    PathSeg::Quad(q) => {
                        if !pen_down {
                            dst.move_to(q.p0);
                            pen_down = true;
                        }
                        dst.quad_to(q.p1, q.p2);
                        first_step = Vec2::ZERO;
                        last_corner = q.p2;
                        last_was_line = false;
                    }
                    PathSeg::Cubic(c) => {
                        if !pen_down {
                            dst.move_to(c.p0);
                            pen_down = true;
                        }
                        dst.curve_to(c.p1, c.p2, c.p3);
                        first_step = Vec2::ZERO;
                        last_corner = c.p3;
                        last_was_line = false;
                    }
                }
            }

            if closed {
                if first_step != Vec2::ZERO {
                    dst.quad_to(last_corner, last_corner + first_step);
                }
                dst.close_path();
            } else if last_was_line {
                dst.line_to(last_corner);
            }
        }

        Ok(dst)
    }
}

/// Offset from `a` towards `b` by `radius`, or halfway when the edge is too
/// short. The flag is false in the halfway case: no straight part remains.
fn compute_step(a: Point, b: Point, radius: f64) -> (Vec2, bool) {
    let dist = a.distance(b);
    let v = b - a;
    if dist <= radius * 2.0 {
        (v * 0.5, false)
    } else {
        (v * (radius / dist), true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/corner.rs"]
mod tests;
