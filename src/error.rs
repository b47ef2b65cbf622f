//! Error types for rs-reader-view.
//!
//! Most of these never reach the caller: selector and style failures are
//! handled inside the stage that hit them, and the pipeline boundary turns
//! everything else into `None`.

use crate::style::StyleError;

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A CSS selector from the pattern tables could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector {
        /// The offending selector text.
        selector: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A classification regex from the pattern tables could not be compiled.
    #[error("invalid pattern `{pattern}`: {reason}")]
    Pattern {
        /// The offending pattern text.
        pattern: String,
        /// Regex compiler diagnostic.
        reason: String,
    },

    /// The style resolver failed for an element.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Options could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No main-content element was found in the document.
    #[error("No main content found")]
    NoContent,

    /// General extraction failure.
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
