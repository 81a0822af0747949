//! The shared path-effect handle and its combinators.

use std::sync::Arc;

use kurbo::{BezPath, Rect};

use crate::effects::corner::CornerEffect;
use crate::effects::dash::{DashEffect, DashInfo, PointData};
use crate::effects::discrete::DiscreteEffect;
use crate::effects::trim::{TrimEffect, TrimMode};
use crate::foundation::core::StrokeStyle;
use crate::foundation::error::PathFxResult;

/// Every kind of path effect, including the two combinators.
#[derive(Debug)]
pub enum EffectKind {
    /// On/off dashing.
    Dash(DashEffect),
    /// Arc-length sub-range extraction.
    Trim(TrimEffect),
    /// Deterministic vertex jitter.
    Discrete(DiscreteEffect),
    /// Rounded line corners.
    Corner(CornerEffect),
    /// `outer(inner(path))`.
    Compose {
        /// Applied second.
        outer: PathEffect,
        /// Applied first.
        inner: PathEffect,
    },
    /// `first(path)` followed by `second(path)` in one output.
    Sum {
        /// Contributes the leading contours.
        first: PathEffect,
        /// Contributes the trailing contours.
        second: PathEffect,
    },
}

impl EffectKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Dash(_) => "dash",
            Self::Trim(_) => "trim",
            Self::Discrete(_) => "discrete",
            Self::Corner(_) => "corner",
            Self::Compose { .. } => "compose",
            Self::Sum { .. } => "sum",
        }
    }
}

/// Immutable, cheaply clonable path effect that can be shared across threads.
///
/// An effect rewrites a source path (and possibly the stroke style) before
/// it is painted. Effects never modify their input; on failure the caller's
/// destination path and style are left as they were.
#[derive(Clone, Debug)]
pub struct PathEffect(Arc<EffectKind>);

impl PathEffect {
    fn new(kind: EffectKind) -> Self {
        Self(Arc::new(kind))
    }

    fn from_result<T>(
        what: &'static str,
        built: PathFxResult<T>,
        wrap: impl FnOnce(T) -> EffectKind,
    ) -> Option<Self> {
        match built {
            Ok(v) => Some(Self::new(wrap(v))),
            Err(err) => {
                tracing::debug!(effect = what, %err, "path effect rejected");
                None
            }
        }
    }

    /// Dash with on/off `intervals` starting `phase` units into the pattern.
    ///
    /// Returns `None` for an odd or too short interval list, negative or
    /// non-finite values, a zero-length pattern, or a non-finite phase.
    pub fn dash(intervals: &[f64], phase: f64) -> Option<Self> {
        Self::from_result("dash", DashEffect::new(intervals, phase), EffectKind::Dash)
    }

    /// Keep (or with [`TrimMode::Inverted`], drop) the `[start, stop]` fraction
    /// of the path's total length.
    ///
    /// Returns `None` for non-finite values and for trims that would leave
    /// every path unchanged.
    pub fn trim(start: f64, stop: f64, mode: TrimMode) -> Option<Self> {
        let trim = match TrimEffect::new(start, stop, mode) {
            Ok(t) if t.is_noop() => {
                tracing::debug!(start, stop, ?mode, "trim is a no-op");
                return None;
            }
            other => other,
        };
        Self::from_result("trim", trim, EffectKind::Trim)
    }

    /// Chop into `seg_length` pieces and jitter vertices by up to `deviation`.
    pub fn discrete(seg_length: f64, deviation: f64, seed_assist: u32) -> Option<Self> {
        Self::from_result(
            "discrete",
            DiscreteEffect::new(seg_length, deviation, seed_assist),
            EffectKind::Discrete,
        )
    }

    /// Round line-line corners with `radius`.
    pub fn corner(radius: f64) -> Option<Self> {
        Self::from_result("corner", CornerEffect::new(radius), EffectKind::Corner)
    }

    /// Apply `inner`, then `outer` to its result.
    pub fn compose(outer: PathEffect, inner: PathEffect) -> Self {
        Self::new(EffectKind::Compose { outer, inner })
    }

    /// Apply both effects to the same source and concatenate the results.
    pub fn sum(first: PathEffect, second: PathEffect) -> Self {
        Self::new(EffectKind::Sum { first, second })
    }

    /// The effect's variant.
    pub fn kind(&self) -> &EffectKind {
        &self.0
    }

    /// Filter `src` into `dst`.
    ///
    /// On success `dst` is replaced and any style change is committed; on
    /// failure both are untouched and `false` is returned.
    pub fn filter_path(
        &self,
        dst: &mut BezPath,
        src: &BezPath,
        style: &mut StrokeStyle,
        cull: Option<Rect>,
    ) -> bool {
        match self.try_filter(src, style, cull) {
            Ok(path) => {
                *dst = path;
                true
            }
            Err(err) => {
                tracing::debug!(effect = self.0.name(), %err, "filter failed");
                false
            }
        }
    }

    /// Like [`PathEffect::filter_path`], but returns the path or the reason it
    /// could not be produced.
    #[tracing::instrument(skip(self, src, style), fields(effect = self.0.name()))]
    pub fn try_filter(
        &self,
        src: &BezPath,
        style: &mut StrokeStyle,
        cull: Option<Rect>,
    ) -> PathFxResult<BezPath> {
        let mut working = *style;
        let out = self.apply(src, &mut working, cull)?;
        *style = working;
        Ok(out)
    }

    fn apply(
        &self,
        src: &BezPath,
        style: &mut StrokeStyle,
        cull: Option<Rect>,
    ) -> PathFxResult<BezPath> {
        match self.kind() {
            EffectKind::Dash(d) => d.filter(src, style, cull),
            EffectKind::Trim(t) => t.filter(src, style),
            EffectKind::Discrete(d) => d.filter(src, style),
            EffectKind::Corner(c) => c.filter(src),
            EffectKind::Compose { outer, inner } => {
                let mid = inner.apply(src, style, cull)?;
                outer.apply(&mid, style, cull)
            }
            EffectKind::Sum { first, second } => {
                let mut out = first.apply(src, style, cull)?;
                let tail = second.apply(src, style, cull)?;
                out.extend(tail.elements().iter().copied());
                Ok(out)
            }
        }
    }

    /// Grow `bounds` to cover everything the effect could draw for a path
    /// that fits inside it. Returns `false` (leaving `bounds` untouched) when
    /// no such bound is known.
    pub fn compute_fast_bounds(&self, bounds: &mut Rect) -> bool {
        match self.kind() {
            EffectKind::Dash(_) | EffectKind::Trim(_) | EffectKind::Corner(_) => true,
            EffectKind::Discrete(d) => d.compute_fast_bounds(bounds),
            EffectKind::Compose { outer, inner } => {
                let mut r = *bounds;
                if inner.compute_fast_bounds(&mut r) && outer.compute_fast_bounds(&mut r) {
                    *bounds = r;
                    true
                } else {
                    false
                }
            }
            EffectKind::Sum { first, second } => {
                let mut a = *bounds;
                let mut b = *bounds;
                if first.compute_fast_bounds(&mut a) && second.compute_fast_bounds(&mut b) {
                    *bounds = a.union(b);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Point-stamp description of the filtered path, when this is a dash whose
    /// marks are all full-width squares or dots on straight lines.
    pub fn as_points(
        &self,
        src: &BezPath,
        style: &StrokeStyle,
        cull: Option<Rect>,
    ) -> Option<PointData> {
        match self.kind() {
            EffectKind::Dash(d) => d.as_points(src, style, cull),
            _ => None,
        }
    }

    /// Intervals and canonical phase, when this is a bare dash.
    pub fn as_a_dash(&self) -> Option<DashInfo> {
        match self.kind() {
            EffectKind::Dash(d) => Some(d.info()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/path_effect.rs"]
mod tests;
