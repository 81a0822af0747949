//! pathfx rewrites 2D vector paths before they are filled or stroked.
//!
//! A [`PathEffect`] is built once (from the factories on it, or from a JSON
//! [`EffectInstance`]) and then applied to any number of paths:
//!
//! - [`PathEffect::dash`] cuts each contour into on/off dashes
//! - [`PathEffect::trim`] keeps a fraction of the total arc length
//! - [`PathEffect::discrete`] and [`PathEffect::corner`] jitter or round contours
//! - [`PathEffect::compose`] and [`PathEffect::sum`] combine effects
//!
//! Paths are [`kurbo::BezPath`] values; arc length is measured with
//! [`ArcLengthMeasure`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod effects;
mod foundation;
mod geometry;

pub use crate::foundation::core::{
    BezPath, PaintStyle, PathEl, PathSeg, Point, Rect, StrokeCap, StrokeJoin, StrokeStyle, Vec2,
};
pub use crate::foundation::error::{PathFxError, PathFxResult};

pub use crate::config::model::EffectInstance;
pub use crate::config::parse::{
    parse_path_effect, path_effect_from_json_file, path_effect_from_json_str,
};
pub use crate::effects::corner::CornerEffect;
pub use crate::effects::dash::{DashEffect, DashInfo, PointData, StampShape};
pub use crate::effects::discrete::DiscreteEffect;
pub use crate::effects::path_effect::{EffectKind, PathEffect};
pub use crate::effects::trim::{TrimEffect, TrimMode};
pub use crate::geometry::contour::{as_line, as_lines};
pub use crate::geometry::measure::ArcLengthMeasure;
