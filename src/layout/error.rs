//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur during layout computation.
///
/// Invalid child bounds, empty containers, and zero usable area are not
/// errors; the pass skips or no-ops on those. The only failure mode is
/// malformed configuration.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Layout options that violate the caller contract
    #[error("invalid layout options for element '{element}': {reason}")]
    InvalidOptions { element: String, reason: String },
}

impl LayoutError {
    /// Create an invalid options error
    pub fn invalid_options(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            element: element.into(),
            reason: reason.into(),
        }
    }
}
