//! Name-card placards: render names into double-sided images and export them.
//!
//! A placard shows a name twice on one page: upright in the upper half and turned 180 degrees in
//! the lower half, so a folded card reads correctly from both sides.
//!
//! - Collect names and presets in a [`NameCardSession`] (or [`CardInputs`] directly)
//! - Render cards with a [`CardRenderer`] such as [`SvgCardRenderer`]
//! - Export all or selected cards as PNG files or a DOCX through a [`FileDelivery`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Rendered card value type.
pub mod card;
/// Image and document export.
pub mod export;
/// Form inputs and name-list parsing.
pub mod input;
/// JSON job files.
pub mod job;
/// Fixed page and font size tables.
pub mod presets;
/// Placard layout and rasterization.
pub mod render;
/// Selection state.
pub mod selection;
/// Input-to-export orchestration.
pub mod session;

pub use crate::foundation::core::{Affine, Point, Rect, SurfaceSize};
pub use crate::foundation::error::{NameCardError, NameCardResult};

pub use crate::card::NameCard;
pub use crate::export::docx::{DocxOpts, build_docx, document_file_name};
pub use crate::export::{
    DeliveredFile, DirectoryDelivery, ExportMenu, ExportReport, ExportScope, FileDelivery,
    InMemoryDelivery,
};
pub use crate::input::{CardInputs, CardParams, parse_names};
pub use crate::job::CardJob;
pub use crate::presets::{FontSize, PageSize};
pub use crate::render::CardRenderer;
pub use crate::render::layout::{OverflowPolicy, PlacardLayout, TextMetrics};
pub use crate::render::svg::{SvgCardRenderer, SvgRendererOpts};
pub use crate::selection::SelectionSet;
pub use crate::session::NameCardSession;
