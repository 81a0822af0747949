//! Chop contours into short lines and jitter every vertex along the normal.

use kurbo::{BezPath, Rect, Vec2};

use crate::foundation::core::StrokeStyle;
use crate::foundation::error::{PathFxError, PathFxResult};
use crate::foundation::math::{Lcg32, NEARLY_ZERO};
use crate::geometry::measure::ArcLengthMeasure;

/// Per-contour cap on generated pieces.
const MAX_PIECES: f64 = 100_000.0;

/// Deterministic "hand drawn" jitter.
///
/// The same path, parameters and seed always produce the same output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscreteEffect {
    seg_length: f64,
    deviation: f64,
    seed_assist: u32,
}

impl DiscreteEffect {
    /// `seg_length` must exceed 1/4096; both lengths must be finite.
    pub fn new(seg_length: f64, deviation: f64, seed_assist: u32) -> PathFxResult<Self> {
        if !seg_length.is_finite() || !deviation.is_finite() {
            return Err(PathFxError::validation(
                "discrete seg_length/deviation must be finite",
            ));
        }
        if seg_length <= NEARLY_ZERO {
            return Err(PathFxError::validation(
                "discrete seg_length must be > 1/4096",
            ));
        }
        Ok(Self {
            seg_length,
            deviation,
            seed_assist,
        })
    }

    /// Target length of each piece.
    pub fn seg_length(&self) -> f64 {
        self.seg_length
    }

    /// Largest displacement applied to a vertex.
    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    /// Caller-provided seed mixed into the per-path seed.
    pub fn seed_assist(&self) -> u32 {
        self.seed_assist
    }

    pub(crate) fn filter(&self, src: &BezPath, style: &StrokeStyle) -> PathFxResult<BezPath> {
        let fill = style.is_fill_style();
        let mut meas = ArcLengthMeasure::new(src, fill, style.measure_res_scale());

        let seed = self.seed_assist ^ ((meas.length() + 0.5).floor() as i32 as u32);
        let mut rng = Lcg32::new_mixed(seed);
        let min_length = self.seg_length * if fill { 3.0 } else { 2.0 };
        let mut dst = BezPath::new();

        while meas.has_contour() {
            let length = meas.length();
            if min_length > length {
                // Too short to chop; pass through.
                if meas.get_segment(0.0, length, &mut dst, true) && meas.is_closed() {
                    dst.close_path();
                }
                meas.next_contour();
                continue;
            }

            let mut n = (length / self.seg_length).round().min(MAX_PIECES) as u32;
            let delta = length / f64::from(n);
            let mut distance = 0.0;
            if meas.is_closed() {
                n -= 1;
                distance += delta * 0.5;
            }

            let mut jitter = |d: f64| {
                meas.pos_tan(d).map(|(p, tan)| {
                    let normal = Vec2::new(tan.y, -tan.x);
                    p + normal * (rng.next_signed_unit() * self.deviation)
                })
            };
            if let Some(p) = jitter(distance) {
                dst.move_to(p);
            }
            for _ in 0..n {
                distance += delta;
                if let Some(p) = jitter(distance) {
                    dst.line_to(p);
                }
            }
            if meas.is_closed() {
                dst.close_path();
            }
            meas.next_contour();
        }

        Ok(dst)
    }

    pub(crate) fn compute_fast_bounds(&self, bounds: &mut Rect) -> bool {
        let d = self.deviation.abs();
        *bounds = bounds.inflate(d, d);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/discrete.rs"]
mod tests;
