//! Folio error types.

use thiserror::Error;

/// Folio result type.
pub type Result<T> = std::result::Result<T, FolioError>;

/// Errors surfaced by feature initializers and the submission store.
///
/// Missing page elements are not errors for the animation cascade; those
/// paths no-op. Features that cannot work at all without an element (the
/// navbar, for instance) report [`FolioError::MissingElement`].
#[derive(Debug, Error)]
pub enum FolioError {
    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A feature's required element is absent from the page
    #[error("missing element: {selector}")]
    MissingElement { selector: String },

    /// Local storage unavailable or write refused
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON encoding failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Browser API call failed
    #[error("host error: {0}")]
    Host(String),
}

impl FolioError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }
}
