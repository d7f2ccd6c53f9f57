use crate::foundation::error::{NameCardError, NameCardResult};

pub use kurbo::{Affine, Point, Rect};

/// Raster surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    // Large enough for A3 at the default oversampling (2970 x 4202) with headroom.
    const MAX_DIM: u32 = 16_384;

    /// Create a validated, non-empty surface size.
    pub fn new(width: u32, height: u32) -> NameCardResult<Self> {
        if width == 0 || height == 0 {
            return Err(NameCardError::validation(
                "surface width/height must be non-zero",
            ));
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(NameCardError::validation(format!(
                "surface size too large: {width}x{height} (max {max}x{max})",
                max = Self::MAX_DIM
            )));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`, for layout math.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`, for layout math.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// The full surface as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
