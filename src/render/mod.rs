//! Placard rendering.

use crate::card::NameCard;
use crate::foundation::error::NameCardResult;
use crate::input::CardParams;

/// Placard geometry and overflow handling.
pub mod layout;
/// SVG-based CPU renderer (usvg + resvg).
pub mod svg;

/// Draws one name into a [`NameCard`].
///
/// Implementations may own a single drawing surface and reuse it for every call; `&mut self`
/// keeps one card's draw from overlapping another's read-back.
pub trait CardRenderer {
    /// Render `name` with the active presets.
    fn render(&mut self, name: &str, params: &CardParams) -> NameCardResult<NameCard>;
}
