//! Extract a normalized arc-length range (or its complement) from a path.

use kurbo::BezPath;

use crate::foundation::core::StrokeStyle;
use crate::foundation::error::{PathFxError, PathFxResult};
use crate::geometry::measure::ArcLengthMeasure;

/// Which part of the `[start, stop]` range a trim keeps.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrimMode {
    /// Keep `[start, stop]`.
    #[default]
    Normal,
    /// Keep everything outside `[start, stop]`.
    Inverted,
}

/// Trim parameters, clamped to `[0, 1]` fractions of the total path length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimEffect {
    start: f64,
    stop: f64,
    mode: TrimMode,
}

impl TrimEffect {
    /// Build a trim; `start` and `stop` are clamped to `[0, 1]`.
    pub fn new(start: f64, stop: f64, mode: TrimMode) -> PathFxResult<Self> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(PathFxError::validation("trim start/stop must be finite"));
        }
        Ok(Self {
            start: start.clamp(0.0, 1.0),
            stop: stop.clamp(0.0, 1.0),
            mode,
        })
    }

    /// Clamped start fraction.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Clamped stop fraction.
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Kept side of the range.
    pub fn mode(&self) -> TrimMode {
        self.mode
    }

    /// Whether applying this trim would leave every path unchanged.
    pub fn is_noop(&self) -> bool {
        match self.mode {
            TrimMode::Normal => self.start <= 0.0 && self.stop >= 1.0,
            TrimMode::Inverted => self.start >= self.stop,
        }
    }

    pub(crate) fn filter(&self, src: &BezPath, style: &StrokeStyle) -> PathFxResult<BezPath> {
        let res_scale = style.measure_res_scale();

        let mut total = 0.0;
        let mut contour_count = 0usize;
        let mut single_closed = false;
        let mut meas = ArcLengthMeasure::new(src, false, res_scale);
        while meas.has_contour() {
            total += meas.length();
            contour_count += 1;
            single_closed = meas.is_closed();
            meas.next_contour();
        }
        let single_closed = contour_count == 1 && single_closed;

        let arc_start = total * self.start;
        let arc_stop = total * self.stop;
        let mut dst = BezPath::new();

        match self.mode {
            TrimMode::Normal => {
                if arc_start < arc_stop {
                    add_range(src, res_scale, arc_start, arc_stop, true, &mut dst);
                }
            }
            TrimMode::Inverted => {
                let mut tail = false;
                if arc_stop < total {
                    tail = add_range(src, res_scale, arc_stop, total, true, &mut dst);
                }
                if arc_start > 0.0 {
                    // Continue the tail into the head so a closed loop stays one contour.
                    let move_to = !(tail && single_closed);
                    add_range(src, res_scale, 0.0, arc_start, move_to, &mut dst);
                }
            }
        }

        Ok(dst)
    }
}

/// Append the whole-path arc range `[start, stop]` to `dst`, one piece per
/// contour it crosses. Returns whether anything was appended.
fn add_range(
    src: &BezPath,
    res_scale: f64,
    start: f64,
    stop: f64,
    mut move_to: bool,
    dst: &mut BezPath,
) -> bool {
    let mut added = false;
    let mut offset = 0.0;
    let mut meas = ArcLengthMeasure::new(src, false, res_scale);
    while meas.has_contour() {
        let next_offset = offset + meas.length();
        if start < next_offset {
            added |= meas.get_segment(start - offset, stop - offset, dst, move_to);
            if stop <= next_offset {
                break;
            }
        }
        offset = next_offset;
        move_to = true;
        meas.next_contour();
    }
    added
}

#[cfg(test)]
#[path = "../../tests/unit/effects/trim.rs"]
mod tests;
