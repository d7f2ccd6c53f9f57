//! Form state for the name-card page: the name list plus the two preset choices.

use crate::presets::{FontSize, PageSize};

/// Characters that end a name token while typing.
///
/// `，` is the full-width comma produced by CJK input methods.
pub const NAME_SEPARATORS: [char; 3] = [',', ' ', '，'];

/// Split free text into an ordered name list.
///
/// Tokens are trimmed and empty tokens dropped; order and duplicates are kept.
pub fn parse_names(text: &str) -> Vec<String> {
    text.split(|c: char| NAME_SEPARATORS.contains(&c) || c == '\n' || c == '\r' || c == '\t')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Everything placard generation depends on.
///
/// Exactly one page size and one font size are active at any time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardInputs {
    names: Vec<String>,
    font_size: FontSize,
    page_size: PageSize,
}

/// Parameters handed to a renderer for every card of one regeneration pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardParams {
    /// Active font size.
    pub font_size: FontSize,
    /// Active page size.
    pub page_size: PageSize,
}

impl CardInputs {
    /// Inputs with the given names and default presets.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inputs = Self::default();
        inputs.set_names(names);
        inputs
    }

    /// Current names, in entry order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Active font size.
    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    /// Active page size.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Renderer parameters derived from the active presets.
    pub fn params(&self) -> CardParams {
        CardParams {
            font_size: self.font_size,
            page_size: self.page_size,
        }
    }

    /// Replace the name list. Blank entries are dropped, everything else is kept verbatim.
    ///
    /// Returns `true` when the list changed.
    pub fn set_names<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n| !n.trim().is_empty())
            .collect();
        if next == self.names {
            return false;
        }
        self.names = next;
        true
    }

    /// Replace the name list from free text (see [`parse_names`]).
    pub fn set_names_text(&mut self, text: &str) -> bool {
        self.set_names(parse_names(text))
    }

    /// Returns `true` when the font size changed.
    pub fn set_font_size(&mut self, font_size: FontSize) -> bool {
        let changed = self.font_size != font_size;
        self.font_size = font_size;
        changed
    }

    /// Returns `true` when the page size changed.
    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        let changed = self.page_size != page_size;
        self.page_size = page_size;
        changed
    }
}
