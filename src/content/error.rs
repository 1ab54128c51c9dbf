//! Content loading errors

use thiserror::Error;

/// Everything that can go wrong between a view and its content resource
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource answered with a non-success status
    #[error("failed to fetch content: HTTP {status}")]
    Fetch { status: u16 },

    /// The resource could not be reached at all
    #[error("failed to fetch content: {0}")]
    Transport(String),

    /// The body was not valid JSON
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested slug is not in the collection
    #[error("no entry with slug {slug:?}")]
    NotFound { slug: String },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}
