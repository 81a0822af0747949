pub use kurbo::{BezPath, PathEl, PathSeg, Point, Rect, Vec2};

/// How a path is painted once effects have run.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    /// Interior is filled; no stroke.
    #[default]
    Fill,
    /// Outline is stroked with `width`.
    Stroke,
    /// Outline is stroked one device pixel wide regardless of `width`.
    Hairline,
    /// Interior is filled and the outline stroked.
    StrokeAndFill,
}

/// Shape at the ends of open contours (and of every dash).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    /// Flat end exactly at the endpoint.
    #[default]
    Butt,
    /// Half-disc of radius `width / 2`.
    Round,
    /// Square extending `width / 2` past the endpoint.
    Square,
}

/// Shape where two stroked segments meet.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StrokeJoin {
    /// Extend edges to their intersection, bounded by the miter limit.
    #[default]
    Miter,
    /// Arc around the joint.
    Round,
    /// Straight cut across the joint.
    Bevel,
}

/// Stroke parameters handed to (and possibly rewritten by) path effects.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    /// Paint style.
    #[serde(default)]
    pub style: PaintStyle,
    /// Stroke width in path units. Ignored for `Fill` and `Hairline`.
    #[serde(default)]
    pub width: f64,
    /// End cap.
    #[serde(default)]
    pub cap: StrokeCap,
    /// Corner join.
    #[serde(default)]
    pub join: StrokeJoin,
    /// Miter limit, only meaningful for [`StrokeJoin::Miter`].
    #[serde(default = "default_miter_limit")]
    pub miter_limit: f64,
    /// Device pixels per path unit; scales curve flattening precision.
    #[serde(default = "default_res_scale")]
    pub res_scale: f64,
}

fn default_miter_limit() -> f64 {
    4.0
}

fn default_res_scale() -> f64 {
    1.0
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::fill()
    }
}

impl StrokeStyle {
    /// A fill style.
    pub fn fill() -> Self {
        Self {
            style: PaintStyle::Fill,
            width: 0.0,
            cap: StrokeCap::Butt,
            join: StrokeJoin::Miter,
            miter_limit: default_miter_limit(),
            res_scale: default_res_scale(),
        }
    }

    /// A stroke style of the given width with butt caps and miter joins.
    ///
    /// A zero width produces a hairline.
    pub fn stroke(width: f64) -> Self {
        let mut s = Self::fill();
        s.set_stroke(width, false);
        s
    }

    /// Builder method for setting the cap.
    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    /// Builder method for setting the join.
    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    /// Builder method for setting the miter limit.
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    /// Builder method for setting the resolution scale.
    pub fn with_res_scale(mut self, res_scale: f64) -> Self {
        self.res_scale = res_scale;
        self
    }

    /// Switch to filling.
    pub fn set_fill(&mut self) {
        self.style = PaintStyle::Fill;
        self.width = 0.0;
    }

    /// Switch to hairline stroking.
    pub fn set_hairline(&mut self) {
        self.style = PaintStyle::Hairline;
        self.width = 0.0;
    }

    /// Switch to stroking with `width`; a zero width means hairline.
    pub fn set_stroke(&mut self, width: f64, stroke_and_fill: bool) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.width = width;
        self.style = if width == 0.0 {
            PaintStyle::Hairline
        } else if stroke_and_fill {
            PaintStyle::StrokeAndFill
        } else {
            PaintStyle::Stroke
        };
    }

    /// Return `true` for [`PaintStyle::Fill`].
    pub fn is_fill_style(&self) -> bool {
        self.style == PaintStyle::Fill
    }

    /// Return `true` for [`PaintStyle::Hairline`].
    pub fn is_hairline_style(&self) -> bool {
        self.style == PaintStyle::Hairline
    }

    /// Resolution scale used for arc-length measurement; invalid values fall back to 1.
    pub fn measure_res_scale(&self) -> f64 {
        if self.res_scale.is_finite() && self.res_scale > 0.0 {
            self.res_scale
        } else {
            1.0
        }
    }

    /// How far the painted outline may extend past the path geometry.
    pub fn inflation_radius(&self) -> f64 {
        let mut radius = match self.style {
            PaintStyle::Fill => 0.0,
            PaintStyle::Hairline => 1.0,
            PaintStyle::Stroke | PaintStyle::StrokeAndFill => {
                if self.width > 0.0 {
                    self.width * 0.5
                } else {
                    1.0
                }
            }
        };
        if self.join == StrokeJoin::Miter && self.miter_limit > 1.0 && radius > 0.0 {
            radius *= self.miter_limit;
        }
        // Square caps reach width/2 * sqrt(2) at the corners.
        if self.cap == StrokeCap::Square && radius > 0.0 {
            radius = radius.max(self.width * 0.5 * std::f64::consts::SQRT_2);
        }
        radius
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
