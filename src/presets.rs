use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{NameCardError, NameCardResult};

/// Named physical page preset.
///
/// The table is fixed; dimensions are portrait width x height in centimeters.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum PageSize {
    /// 29.7 x 42.02 cm.
    A3,
    /// 20.99 x 29.7 cm.
    #[default]
    A4,
    /// 14.82 x 20.99 cm.
    A5,
}

impl PageSize {
    /// Every preset, in menu order.
    pub const ALL: [PageSize; 3] = [PageSize::A3, PageSize::A4, PageSize::A5];

    /// Preset label as shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
        }
    }

    /// Page width in centimeters.
    pub fn width_cm(self) -> f64 {
        self.dims_cm().0
    }

    /// Page height in centimeters.
    pub fn height_cm(self) -> f64 {
        self.dims_cm().1
    }

    /// `(width, height)` in centimeters.
    pub fn dims_cm(self) -> (f64, f64) {
        match self {
            PageSize::A3 => (29.7, 42.02),
            PageSize::A4 => (20.99, 29.7),
            PageSize::A5 => (14.82, 20.99),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PageSize {
    type Err = NameCardError;

    fn from_str(s: &str) -> NameCardResult<Self> {
        let s = s.trim();
        PageSize::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                NameCardError::validation(format!("unknown page size '{s}' (expected A3, A4 or A5)"))
            })
    }
}

/// Font size in points, restricted to the fixed choice list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    /// Allowed point sizes, in menu order.
    pub const CHOICES: [u32; 5] = [12, 24, 36, 48, 64];

    /// Validate a point size against [`FontSize::CHOICES`].
    pub fn new(points: u32) -> NameCardResult<Self> {
        if Self::CHOICES.contains(&points) {
            Ok(Self(points))
        } else {
            Err(NameCardError::validation(format!(
                "unsupported font size {points} (expected one of {:?})",
                Self::CHOICES
            )))
        }
    }

    /// Every allowed size.
    pub fn all() -> impl Iterator<Item = FontSize> {
        Self::CHOICES.into_iter().map(FontSize)
    }

    /// Size in points.
    pub fn points(self) -> u32 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(36)
    }
}

impl TryFrom<u32> for FontSize {
    type Error = NameCardError;

    fn try_from(points: u32) -> NameCardResult<Self> {
        Self::new(points)
    }
}

impl From<FontSize> for u32 {
    fn from(v: FontSize) -> u32 {
        v.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FontSize {
    type Err = NameCardError;

    fn from_str(s: &str) -> NameCardResult<Self> {
        let points: u32 = s
            .trim()
            .parse()
            .map_err(|_| NameCardError::validation(format!("font size '{s}' is not a number")))?;
        Self::new(points)
    }
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
