//! Placard geometry: where the upright and the half-turned copy of a name land on the surface.

use std::f64::consts::PI;

use crate::foundation::core::{Affine, Point, Rect, SurfaceSize};

/// What to do when a name is wider than the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Center using the width clamped to the surface, keep the font size. Long names run off the
    /// right edge.
    #[default]
    Clamp,
    /// Shrink the font until the name fits the surface width.
    ShrinkToFit,
}

/// Text extents relative to the pen origin (`x = 0` on the baseline), y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Offset of the left edge from the pen origin.
    pub left: f64,
    /// Top edge (negative above the baseline).
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl TextMetrics {
    /// Metrics of a run with no ink: zero width, one em tall with a typical ascent.
    pub fn empty(font_px: f64) -> Self {
        Self {
            left: 0.0,
            top: -0.8 * font_px,
            width: 0.0,
            height: font_px,
        }
    }

    fn scaled(self, s: f64) -> Self {
        Self {
            left: self.left * s,
            top: self.top * s,
            width: self.width * s,
            height: self.height * s,
        }
    }

    fn mid_y(self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Resolved placement of both copies of a name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacardLayout {
    /// Target surface.
    pub surface: SurfaceSize,
    /// Font size actually drawn, in pixels.
    pub font_px: f64,
    /// Pen origin of the upright copy (left end of the baseline).
    pub origin: Point,
    /// Maps the upright copy onto the lower half: `translate(W, H) * rotate(pi)`.
    pub half_turn: Affine,
    /// Measured text was wider than the surface.
    pub overflowed: bool,
    metrics: TextMetrics,
}

impl PlacardLayout {
    /// Lay out a name measured at `font_px`.
    ///
    /// The upright copy is centered horizontally and vertically centered in the upper half; the
    /// second copy is the upright one turned 180 degrees about the surface center.
    pub fn compute(
        surface: SurfaceSize,
        font_px: f64,
        metrics: TextMetrics,
        policy: OverflowPolicy,
    ) -> Self {
        let w = surface.width_f64();
        let h = surface.height_f64();
        let overflowed = metrics.width > w;

        let (font_px, metrics) = match policy {
            OverflowPolicy::ShrinkToFit if overflowed && metrics.width > 0.0 => {
                let s = w / metrics.width;
                (font_px * s, metrics.scaled(s))
            }
            _ => (font_px, metrics),
        };

        let drawn_w = metrics.width.min(w);
        let x = (w - drawn_w) / 2.0 - metrics.left;
        let baseline = h / 4.0 - metrics.mid_y();

        Self {
            surface,
            font_px,
            origin: Point::new(x, baseline),
            half_turn: Affine::translate((w, h)) * Affine::rotate(PI),
            overflowed,
            metrics,
        }
    }

    /// Box covered by the upright copy.
    pub fn upright_box(&self) -> Rect {
        let x0 = self.origin.x + self.metrics.left;
        let y0 = self.origin.y + self.metrics.top;
        Rect::new(x0, y0, x0 + self.metrics.width, y0 + self.metrics.height)
    }

    /// Box covered by the half-turned copy.
    pub fn mirrored_box(&self) -> Rect {
        self.half_turn.transform_rect_bbox(self.upright_box())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
