/// Convenience result alias used across the crate.
pub type NameCardResult<T> = Result<T, NameCardError>;

/// Top-level error for input handling, placard rendering, document assembly and delivery.
#[derive(thiserror::Error, Debug)]
pub enum NameCardError {
    /// Rejected input (unknown preset, empty export, malformed job file).
    #[error("validation error: {0}")]
    Validation(String),

    /// Placard measurement, rasterization or PNG encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Document assembly failed.
    #[error("export error: {0}")]
    Export(String),

    /// The file delivery collaborator could not hand the bytes over.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Any other error, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NameCardError {
    /// Build a [`NameCardError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NameCardError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`NameCardError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`NameCardError::Delivery`].
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }
}
