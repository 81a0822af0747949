//! On/off dashing along the arc length of each contour.

use kurbo::{BezPath, Point, Rect};
use smallvec::SmallVec;

use crate::foundation::core::{PaintStyle, StrokeCap, StrokeStyle};
use crate::foundation::error::{PathFxError, PathFxResult};
use crate::geometry::contour::as_lines;
use crate::geometry::measure::{ArcLengthMeasure, contains_rect, overlaps};

/// Upper bound on the number of dashes a single filter call may emit.
pub(crate) const MAX_DASH_COUNT: f64 = 1_000_000.0;

/// Reflection of a dash effect: its intervals and canonical phase.
#[derive(Clone, Debug, PartialEq)]
pub struct DashInfo {
    /// On/off lengths, exactly as given at construction.
    pub intervals: Vec<f64>,
    /// Phase reduced into `[0, sum(intervals))`.
    pub phase: f64,
}

/// Shape drawn at each stamp point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StampShape {
    /// Axis-aligned square centered on the point.
    Square {
        /// Half the side length.
        half_side: f64,
    },
    /// Disc centered on the point.
    Circle {
        /// Disc radius.
        radius: f64,
    },
}

/// A dashed line expressed as identical stamps plus leftover partial dashes.
#[derive(Clone, Debug, PartialEq)]
pub struct PointData {
    /// Stamp centers.
    pub points: Vec<Point>,
    /// Stamp drawn at every point.
    pub shape: StampShape,
    /// Cull rect the stamps were computed against, if any.
    pub clip: Option<Rect>,
    /// Dashes cut short by a line end; these must be stroked normally.
    pub remainder: BezPath,
}

/// Validated dash pattern with its phase already resolved to a starting interval.
#[derive(Clone, Debug, PartialEq)]
pub struct DashEffect {
    intervals: SmallVec<[f64; 8]>,
    phase: f64,
    interval_len: f64,
    first_index: usize,
    first_len: f64,
}

impl DashEffect {
    /// Validate `intervals` and canonicalize `phase`.
    ///
    /// Intervals must come in on/off pairs, be finite and non-negative, and
    /// add up to a finite positive length. The phase must be finite.
    pub fn new(intervals: &[f64], phase: f64) -> PathFxResult<Self> {
        if intervals.len() < 2 || intervals.len() % 2 != 0 {
            return Err(PathFxError::validation(format!(
                "dash needs an even number (>= 2) of intervals, got {}",
                intervals.len()
            )));
        }
        if intervals.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(PathFxError::validation(
                "dash intervals must be finite and >= 0",
            ));
        }
        let interval_len: f64 = intervals.iter().sum();
        if !interval_len.is_finite() || interval_len <= 0.0 {
            return Err(PathFxError::validation(
                "dash intervals must add up to a finite length > 0",
            ));
        }
        if !phase.is_finite() {
            return Err(PathFxError::validation("dash phase must be finite"));
        }

        let phase = adjust_phase(phase, interval_len);
        let (first_len, first_index) = find_first_interval(intervals, phase);

        Ok(Self {
            intervals: SmallVec::from_slice(intervals),
            phase,
            interval_len,
            first_index,
            first_len,
        })
    }

    /// On/off lengths.
    pub fn intervals(&self) -> &[f64] {
        &self.intervals
    }

    /// Phase in `[0, interval_len)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Length of one full on/off pattern.
    pub fn interval_len(&self) -> f64 {
        self.interval_len
    }

    pub(crate) fn info(&self) -> DashInfo {
        DashInfo {
            intervals: self.intervals.to_vec(),
            phase: self.phase,
        }
    }

    pub(crate) fn filter(
        &self,
        src: &BezPath,
        style: &StrokeStyle,
        cull: Option<Rect>,
    ) -> PathFxResult<BezPath> {
        if matches!(style.style, PaintStyle::Fill | PaintStyle::StrokeAndFill) {
            return Err(PathFxError::filter("dashing requires a stroke or hairline"));
        }

        let cull = cull.map(|r| {
            let outset = style.inflation_radius();
            r.inflate(outset, outset)
        });
        let draws_dots = style.cap != StrokeCap::Butt && self.first_index % 2 == 0;
        let pairs = (self.intervals.len() / 2) as f64;

        let mut dst = BezPath::new();
        let mut dash_count = 0.0;
        let mut meas = ArcLengthMeasure::new(src, false, style.measure_res_scale());

        while meas.has_contour() {
            let length = meas.length();

            if length == 0.0 {
                if draws_dots
                    && let Some(p) = meas.start_point()
                    && cull.is_none_or(|r| overlaps(Rect::from_points(p, p), r))
                {
                    dst.move_to(p);
                    dst.line_to(p);
                }
                meas.next_contour();
                continue;
            }

            let visible = match cull {
                Some(r) if !contains_rect(r, meas.control_bounds()) => meas.visible_range(r),
                _ => Some((0.0, length)),
            };
            let Some((lo, hi)) = visible else {
                meas.next_contour();
                continue;
            };

            dash_count += (hi - lo) * pairs / self.interval_len;
            if dash_count > MAX_DASH_COUNT {
                tracing::warn!(dash_count, "dash count limit exceeded");
                return Err(PathFxError::filter(format!(
                    "dash would emit more than {MAX_DASH_COUNT} segments"
                )));
            }

            self.dash_contour(&meas, lo, hi, &mut dst)?;
            meas.next_contour();
        }

        Ok(dst)
    }

    /// Dash the measure's current contour, only walking `[lo, hi]`.
    fn dash_contour(
        &self,
        meas: &ArcLengthMeasure<'_>,
        lo: f64,
        hi: f64,
        dst: &mut BezPath,
    ) -> PathFxResult<()> {
        let length = meas.length();
        let closed = meas.is_closed();
        let mut skip_first_segment = closed;
        let mut added_segment = false;
        let mut index = self.first_index;
        let mut distance = 0.0;
        let mut d_len = self.first_len;

        // Jump whole periods towards the visible range; the phase is unchanged.
        if lo > d_len {
            distance = d_len;
            skip_first_segment = false;
            index = self.next_index(index);
            d_len = self.intervals[index];
            let periods = ((lo - distance) / self.interval_len).floor();
            if periods > 0.0 {
                distance += periods * self.interval_len;
            }
        }

        let stop = hi.min(length);
        while distance < stop {
            added_segment = false;
            if index % 2 == 0 && !skip_first_segment {
                added_segment = true;
                meas.get_segment(distance, distance + d_len, dst, true);
            }

            let next = distance + d_len;
            if d_len > 0.0 && next <= distance {
                return Err(PathFxError::filter(
                    "dash intervals are too short for the path's coordinates",
                ));
            }
            distance = next;
            skip_first_segment = false;
            index = self.next_index(index);
            d_len = self.intervals[index];
        }

        if distance < length {
            added_segment = false;
        }

        // Join the skipped first dash onto the last one across the start point.
        if closed && self.first_index % 2 == 0 && lo <= self.first_len {
            meas.get_segment(0.0, self.first_len, dst, !added_segment);
        }
        Ok(())
    }

    fn next_index(&self, index: usize) -> usize {
        if index + 1 == self.intervals.len() {
            0
        } else {
            index + 1
        }
    }

    /// Describe the dashed `src` as stamps when every dash is a square or dot
    /// exactly as wide as the stroke.
    pub(crate) fn as_points(
        &self,
        src: &BezPath,
        style: &StrokeStyle,
        cull: Option<Rect>,
    ) -> Option<PointData> {
        if style.style != PaintStyle::Stroke || !(style.width > 0.0) {
            return None;
        }
        let width = style.width;
        let ons = || self.intervals.iter().step_by(2).copied();
        let shape = match style.cap {
            StrokeCap::Butt if ons().all(|on| on == width) => StampShape::Square {
                half_side: width * 0.5,
            },
            StrokeCap::Square if ons().all(|on| on == 0.0) => StampShape::Square {
                half_side: width * 0.5,
            },
            StrokeCap::Round if ons().all(|on| on == 0.0) => StampShape::Circle {
                radius: width * 0.5,
            },
            _ => return None,
        };

        let lines = as_lines(src)?;
        for &(a, b) in &lines {
            if a == b {
                return None;
            }
            if matches!(shape, StampShape::Square { .. }) && a.x != b.x && a.y != b.y {
                return None;
            }
        }

        let pairs = (self.intervals.len() / 2) as f64;
        let dash_count: f64 = lines
            .iter()
            .map(|(a, b)| a.distance(*b) * pairs / self.interval_len)
            .sum();
        if !(dash_count <= MAX_DASH_COUNT) {
            tracing::warn!(dash_count, "dash count limit exceeded");
            return None;
        }

        let reach = width * 0.5;
        let visible = cull.map(|r| r.inflate(reach, reach));
        let mut points = Vec::new();
        let mut remainder = BezPath::new();

        for (a, b) in lines {
            let len = a.distance(b);
            let at = |d: f64| a.lerp(b, d / len);
            let mut index = self.first_index;
            let mut distance = 0.0;
            let mut d_len = self.first_len;

            while distance < len {
                if index % 2 == 0 {
                    let full = d_len == self.intervals[index] && distance + d_len <= len;
                    if full {
                        let center = at(distance + d_len * 0.5);
                        if visible.is_none_or(|r| overlaps(Rect::from_points(center, center), r)) {
                            points.push(center);
                        }
                    } else {
                        remainder.move_to(at(distance));
                        remainder.line_to(at((distance + d_len).min(len)));
                    }
                }
                let next = distance + d_len;
                if d_len > 0.0 && next <= distance {
                    return None;
                }
                distance = next;
                index = self.next_index(index);
                d_len = self.intervals[index];
            }
        }

        Some(PointData {
            points,
            shape,
            clip: cull,
            remainder,
        })
    }
}

/// Reduce `phase` into `[0, len)`; a negative phase counts back from `len`.
fn adjust_phase(phase: f64, len: f64) -> f64 {
    if phase < 0.0 {
        let mut p = -phase;
        if p > len {
            p %= len;
        }
        p = len - p;
        if p == len { 0.0 } else { p }
    } else if phase >= len {
        phase % len
    } else {
        phase
    }
}

/// Remaining length and index of the interval that `phase` falls in.
fn find_first_interval(intervals: &[f64], mut phase: f64) -> (f64, usize) {
    for (i, &gap) in intervals.iter().enumerate() {
        if phase > gap || (phase == gap && gap != 0.0) {
            phase -= gap;
        } else {
            return (gap - phase, i);
        }
    }
    // Rounding in the interval sum can leave a sliver of phase unconsumed.
    (intervals[0], 0)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/dash.rs"]
mod tests;
