//! Export paths for generated cards.
//!
//! Both exporters hand finished bytes to a [`FileDelivery`]; neither touches the filesystem.

/// File delivery collaborators.
pub mod delivery;
/// Paginated DOCX assembly.
pub mod docx;
/// One PNG download per card.
pub mod images;

pub use delivery::{DeliveredFile, DirectoryDelivery, FileDelivery, InMemoryDelivery};

/// Which cards an export action covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportScope {
    /// Every generated card.
    All,
    /// Only cards whose name is in the selection set.
    Selected,
}

/// Enabled state of the two export menu entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportMenu {
    /// "Export all" needs at least one card.
    pub all_enabled: bool,
    /// "Export selected" needs a non-empty selection.
    pub selected_enabled: bool,
}

impl ExportMenu {
    /// Whether the entry for `scope` can be invoked.
    pub fn is_enabled(self, scope: ExportScope) -> bool {
        match scope {
            ExportScope::All => self.all_enabled,
            ExportScope::Selected => self.selected_enabled,
        }
    }
}

/// What an export action handed to the delivery collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// File names in delivery order.
    pub files: Vec<String>,
    /// Total bytes delivered.
    pub bytes: u64,
}

impl ExportReport {
    /// `true` when nothing was delivered (disabled action or empty scope).
    pub fn is_noop(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn record(&mut self, file_name: String, len: usize) {
        self.files.push(file_name);
        self.bytes += len as u64;
    }
}
