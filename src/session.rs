use chrono::{DateTime, Utc};

use crate::card::NameCard;
use crate::export::delivery::FileDelivery;
use crate::export::docx::{DocxOpts, export_document};
use crate::export::images::export_images;
use crate::export::{ExportMenu, ExportReport, ExportScope};
use crate::foundation::error::NameCardResult;
use crate::input::CardInputs;
use crate::presets::{FontSize, PageSize};
use crate::render::CardRenderer;
use crate::selection::SelectionSet;

/// State of one name-card page: the form inputs, the derived card list and the selection.
///
/// Every input mutation regenerates the full card list before returning, one card at a time and
/// in name order, through the session's single renderer.
pub struct NameCardSession {
    inputs: CardInputs,
    cards: Vec<NameCard>,
    selection: SelectionSet,
    renderer: Box<dyn CardRenderer>,
    docx: DocxOpts,
}

impl NameCardSession {
    /// Empty session with default presets.
    pub fn new(renderer: Box<dyn CardRenderer>) -> Self {
        Self {
            inputs: CardInputs::default(),
            cards: Vec::new(),
            selection: SelectionSet::new(),
            renderer,
            docx: DocxOpts::default(),
        }
    }

    /// Replace the document options used by [`NameCardSession::export_document`].
    pub fn with_docx_opts(mut self, docx: DocxOpts) -> Self {
        self.docx = docx;
        self
    }

    /// Current inputs.
    pub fn inputs(&self) -> &CardInputs {
        &self.inputs
    }

    /// Generated cards, in name order.
    pub fn cards(&self) -> &[NameCard] {
        &self.cards
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Replace the name list and regenerate.
    pub fn set_names<I, S>(&mut self, names: I) -> NameCardResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.set_names(names);
        self.regenerate()
    }

    /// Replace the name list from free text and regenerate.
    pub fn set_names_text(&mut self, text: &str) -> NameCardResult<()> {
        self.inputs.set_names_text(text);
        self.regenerate()
    }

    /// Change the font size and regenerate.
    pub fn set_font_size(&mut self, font_size: FontSize) -> NameCardResult<()> {
        self.inputs.set_font_size(font_size);
        self.regenerate()
    }

    /// Change the page size and regenerate.
    pub fn set_page_size(&mut self, page_size: PageSize) -> NameCardResult<()> {
        self.inputs.set_page_size(page_size);
        self.regenerate()
    }

    /// Replace all inputs at once with a single regeneration.
    pub fn apply(&mut self, inputs: CardInputs) -> NameCardResult<()> {
        self.inputs = inputs;
        self.regenerate()
    }

    /// Rebuild every card from the current inputs.
    ///
    /// The list is replaced wholesale. Selected names that no longer appear are dropped. If any
    /// card fails to render the list is left empty and the error returned.
    #[tracing::instrument(skip(self), fields(names = self.inputs.names().len()))]
    pub fn regenerate(&mut self) -> NameCardResult<()> {
        self.cards.clear();
        let params = self.inputs.params();

        let mut cards = Vec::with_capacity(self.inputs.names().len());
        for name in self.inputs.names() {
            cards.push(self.renderer.render(name, &params)?);
        }
        self.cards = cards;

        let dropped = self
            .selection
            .retain_present(self.cards.iter().map(NameCard::name));
        if dropped > 0 {
            tracing::debug!(dropped, "pruned selections for removed names");
        }
        tracing::debug!(
            cards = self.cards.len(),
            font = %params.font_size,
            page = %params.page_size,
            "cards regenerated"
        );
        Ok(())
    }

    /// Flip selection of the card named `name`. Returns `true` if it is selected afterwards.
    ///
    /// Names without a generated card are ignored and reported as unselected.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.cards.iter().any(|c| c.name() == name) {
            tracing::debug!(name, "ignoring selection of unknown card");
            return false;
        }
        self.selection.toggle(name)
    }

    /// Whether the card named `name` is selected.
    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }

    /// Enabled state of the export menu entries.
    pub fn menu(&self) -> ExportMenu {
        ExportMenu {
            all_enabled: !self.cards.is_empty(),
            selected_enabled: !self.selection.is_empty(),
        }
    }

    /// Cards covered by `scope`, in card order.
    pub fn cards_in_scope(&self, scope: ExportScope) -> Vec<&NameCard> {
        match scope {
            ExportScope::All => self.cards.iter().collect(),
            ExportScope::Selected => self
                .cards
                .iter()
                .filter(|c| self.selection.contains(c.name()))
                .collect(),
        }
    }

    /// Deliver one PNG per card in scope. Disabled scopes are a no-op.
    pub fn export_images(
        &self,
        scope: ExportScope,
        delivery: &mut dyn FileDelivery,
    ) -> NameCardResult<ExportReport> {
        let Some(cards) = self.enabled_cards(scope) else {
            return Ok(ExportReport::default());
        };
        export_images(&cards, delivery)
    }

    /// Deliver a DOCX of the cards in scope, stamped with the current time. Disabled scopes are a
    /// no-op.
    pub fn export_document(
        &self,
        scope: ExportScope,
        delivery: &mut dyn FileDelivery,
    ) -> NameCardResult<ExportReport> {
        self.export_document_at(scope, delivery, Utc::now())
    }

    /// [`NameCardSession::export_document`] with an explicit creation time.
    pub fn export_document_at(
        &self,
        scope: ExportScope,
        delivery: &mut dyn FileDelivery,
        created: DateTime<Utc>,
    ) -> NameCardResult<ExportReport> {
        let Some(cards) = self.enabled_cards(scope) else {
            return Ok(ExportReport::default());
        };
        export_document(
            &cards,
            self.inputs.page_size(),
            &self.docx,
            created,
            delivery,
        )
    }

    fn enabled_cards(&self, scope: ExportScope) -> Option<Vec<&NameCard>> {
        if !self.menu().is_enabled(scope) {
            tracing::debug!(?scope, "export disabled");
            return None;
        }
        let cards = self.cards_in_scope(scope);
        if cards.is_empty() {
            tracing::debug!(?scope, "nothing in export scope");
            return None;
        }
        Some(cards)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
