//! Reader Session
//!
//! Apply/toggle/restore lifecycle for showing the reader view in place of a
//! page. The session owns the snapshot of the original body markup and the
//! active flag, so nothing about it is global: the caller creates one per
//! document and tears it down when done.

use tracing::debug;

use crate::dom::{self, Document, Selection};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::patterns::Patterns;
use crate::pipeline;
use crate::style::StyleResolver;

/// Id of the element wrapping the reader view inside `<body>`.
pub const READER_ROOT_ID: &str = "reader-view-root";

/// Reader-view state for one document.
///
/// # Example
///
/// ```rust
/// use rs_reader_view::dom::Document;
/// use rs_reader_view::style::InlineStyleResolver;
/// use rs_reader_view::{Options, ReaderSession};
///
/// let doc = Document::from("<body><nav>menu</nav><article><p>Story</p></article></body>");
/// let mut session = ReaderSession::init(&Options::default())?;
///
/// session.apply(&doc, &InlineStyleResolver)?;
/// assert!(doc.select("nav").is_empty());
///
/// session.teardown(&doc);
/// assert!(doc.select("nav").exists());
/// # Ok::<(), rs_reader_view::Error>(())
/// ```
#[derive(Debug)]
pub struct ReaderSession {
    patterns: Patterns,
    original: Option<BodySnapshot>,
}

/// What `apply` changed on the live `<body>`.
#[derive(Debug)]
struct BodySnapshot {
    markup: String,
    /// Attributes stripped from `<body>` itself, as `(name, value)`.
    attributes: Vec<(String, String)>,
}

impl ReaderSession {
    /// Create an inactive session.
    pub fn init(options: &Options) -> Result<Self> {
        Ok(Self {
            patterns: options.compile()?,
            original: None,
        })
    }

    /// Whether the reader view is currently shown.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }

    /// Replace the page body with the reader view.
    ///
    /// The pipeline runs on a copy, so on failure the document is untouched.
    /// Applying an active session does nothing.
    pub fn apply(&mut self, doc: &Document, resolver: &dyn StyleResolver) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }

        let body = doc.select("body");
        if body.is_empty() {
            return Err(Error::Extraction("document has no <body>".to_string()));
        }
        let original = body.inner_html().to_string();

        let working = dom::clone_document(doc);
        let extracted = pipeline::extract(&working, resolver, &self.patterns).ok_or(Error::NoContent)?;

        // A located <body> can't be nested inside the live one, so take its
        // children and sanitize the live element's own attributes instead.
        let (content, attributes) = if extracted.root_tag == "body" {
            let content = working.select("body").inner_html().to_string();
            (content, self.strip_body_attributes(&body))
        } else {
            (extracted.content, Vec::new())
        };

        body.set_html(format!(r#"<div id="{READER_ROOT_ID}">{content}</div>"#));
        self.original = Some(BodySnapshot {
            markup: original,
            attributes,
        });
        debug!("reader view applied");
        Ok(())
    }

    /// Put the original body back. Returns whether anything was restored.
    pub fn restore(&mut self, doc: &Document) -> bool {
        let Some(original) = self.original.take() else {
            return false;
        };
        let body = doc.select("body");
        body.set_html(original.markup);
        for (name, value) in &original.attributes {
            body.set_attr(name, value);
        }
        debug!("original page restored");
        true
    }

    /// Apply when inactive, restore when active. Returns the new state.
    pub fn toggle(&mut self, doc: &Document, resolver: &dyn StyleResolver) -> Result<bool> {
        if self.is_active() {
            self.restore(doc);
        } else {
            self.apply(doc, resolver)?;
        }
        Ok(self.is_active())
    }

    fn strip_body_attributes(&self, body: &Selection) -> Vec<(String, String)> {
        let mut stripped = Vec::new();
        for name in dom::attribute_names(body) {
            if self.patterns.keeps_attribute(&name) {
                continue;
            }
            if let Some(value) = dom::get_attribute(body, &name) {
                stripped.push((name.clone(), value));
            }
            dom::remove_attribute(body, &name);
        }
        stripped
    }

    /// End the session, restoring the page if the reader view is shown.
    pub fn teardown(mut self, doc: &Document) {
        self.restore(doc);
    }
}
