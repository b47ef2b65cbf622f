//! # rs-reader-view
//!
//! Reader-view content extraction over an already-parsed HTML document.
//!
//! The pipeline removes hidden elements and boilerplate, locates the element
//! holding the article body, strips presentation and script attributes from
//! it and returns its markup, ready for a distraction-free view.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_reader_view::dom::Document;
//! use rs_reader_view::style::InlineStyleResolver;
//!
//! let doc = Document::from(r#"<html><body>
//!     <nav>Home | About</nav>
//!     <article><p onclick="track()">Main content here.</p></article>
//! </body></html>"#);
//!
//! let extracted = rs_reader_view::extract(&doc, &InlineStyleResolver).unwrap();
//! assert!(extracted.content.contains("Main content here."));
//! assert!(!extracted.content.contains("Home"));
//! assert!(!extracted.content.contains("onclick"));
//! ```
//!
//! ## Stages
//!
//! - **Hidden filter** ([`hidden`]): markup-hidden elements, then elements a
//!   [`StyleResolver`] reports as not rendered
//! - **Clutter removal** ([`clutter`]): boilerplate selectors, then class/id
//!   substring patterns
//! - **Location** ([`locate`]): explicit content markers, falling back to
//!   [`scoring`] of block elements
//! - **Sanitizing** ([`sanitize`]): attribute whitelist on the located subtree
//!
//! Every table driving these stages lives in [`PatternTables`] and can be
//! replaced through [`Options`].

mod error;
mod options;
mod patterns;
mod pipeline;
mod session;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Style resolution capability and the inline-style resolver.
pub mod style;

/// Hidden-element filter.
pub mod hidden;

/// Boilerplate removal by selector and substring pattern.
pub mod clutter;

/// Main-content location.
pub mod locate;

/// Content scoring heuristic.
pub mod scoring;

/// Link density measure.
pub mod link_density;

/// Attribute whitelist sanitizer.
pub mod sanitize;

/// Character decoding for hosts starting from bytes.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use patterns::{PatternTables, Patterns, DEFAULT_PATTERNS};
pub use pipeline::Extracted;
pub use session::{ReaderSession, READER_ROOT_ID};
pub use style::{ComputedStyle, InlineStyleResolver, StyleError, StyleResolver};

use dom::Document;

/// Extracts the main content of a document using the default tables.
///
/// The document is modified in place: hidden and clutter elements are
/// removed and the located subtree is sanitized.
///
/// # Returns
///
/// `Some(Extracted)` with the markup of the located subtree, or `None` when
/// no main content was found or extraction failed. Failures are logged
/// through `tracing`.
#[must_use]
pub fn extract(doc: &Document, resolver: &dyn StyleResolver) -> Option<Extracted> {
    pipeline::extract(doc, resolver, &DEFAULT_PATTERNS)
}

/// Extracts the main content of a document with custom options.
///
/// Invalid options (a pattern that fails to compile) yield `None`.
///
/// # Example
///
/// ```rust
/// use rs_reader_view::dom::Document;
/// use rs_reader_view::style::InlineStyleResolver;
/// use rs_reader_view::{extract_with_options, Options};
///
/// let mut options = Options::default();
/// options.patterns.content_markers = vec![".story".to_string()];
///
/// let doc = Document::from(r#"<div class="story"><p>Text</p></div>"#);
/// let extracted = extract_with_options(&doc, &InlineStyleResolver, &options).unwrap();
/// assert_eq!(extracted.root_tag, "div");
/// ```
#[must_use]
pub fn extract_with_options(
    doc: &Document,
    resolver: &dyn StyleResolver,
    options: &Options,
) -> Option<Extracted> {
    match options.compile() {
        Ok(patterns) => pipeline::extract(doc, resolver, &patterns),
        Err(err) => {
            tracing::error!(%err, "invalid extraction options");
            None
        }
    }
}

/// Extracts the main content with already-compiled patterns.
///
/// Prefer this over [`extract_with_options`] when processing many documents
/// with the same custom tables.
#[must_use]
pub fn extract_with_patterns(
    doc: &Document,
    resolver: &dyn StyleResolver,
    patterns: &Patterns,
) -> Option<Extracted> {
    pipeline::extract(doc, resolver, patterns)
}
