//! Extraction Pipeline
//!
//! hidden filter → clutter removal → location → sanitizing → serialization,
//! all over the caller's document. Failures below this level are handled by
//! the stage that hit them; everything that still escapes, panics included,
//! is logged here and reported as `None`.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::clutter::{remove_clutter, ClutterStats};
use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::hidden::{filter_hidden, HiddenStats};
use crate::locate::locate;
use crate::patterns::Patterns;
use crate::sanitize::sanitize;
use crate::style::StyleResolver;

/// Output of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Markup of the located, sanitized subtree (outer HTML).
    pub content: String,
    /// Tag name of the located root.
    pub root_tag: String,
    /// Hidden-element filter counts.
    pub hidden: HiddenStats,
    /// Clutter removal counts.
    pub clutter: ClutterStats,
    /// Attributes stripped from the located subtree.
    pub stripped_attributes: usize,
}

/// Run the pipeline, turning every failure into `None`.
pub(crate) fn extract(doc: &Document, resolver: &dyn StyleResolver, patterns: &Patterns) -> Option<Extracted> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run(doc, resolver, patterns)));
    match outcome {
        Ok(Ok(extracted)) => Some(extracted),
        Ok(Err(Error::NoContent)) => {
            debug!("no main content found");
            None
        }
        Ok(Err(err)) => {
            error!(%err, "content extraction failed");
            None
        }
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(%reason, "content extraction panicked");
            None
        }
    }
}

/// The pipeline proper.
pub(crate) fn run(doc: &Document, resolver: &dyn StyleResolver, patterns: &Patterns) -> Result<Extracted> {
    let hidden = filter_hidden(doc, resolver, patterns);
    let clutter = remove_clutter(doc, patterns);

    let root = locate(doc, patterns).ok_or(Error::NoContent)?;
    let root_tag = dom::tag_name(&root)
        .ok_or_else(|| Error::Extraction("located node is not an element".to_string()))?;

    let stripped_attributes = sanitize(&root, patterns);
    let content = dom::outer_html(&root).to_string();
    if content.is_empty() {
        return Err(Error::Extraction(format!("<{root_tag}> serialized to nothing")));
    }

    debug!(
        root_tag = root_tag.as_str(),
        removed_hidden = hidden.total(),
        removed_clutter = clutter.total(),
        stripped_attributes,
        content_len = content.len(),
        "extraction complete"
    );

    Ok(Extracted {
        content,
        root_tag,
        hidden,
        clutter,
        stripped_attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternTables, DEFAULT_PATTERNS};
    use crate::style::{self, ComputedStyle, InlineStyleResolver};

    #[test]
    fn stages_run_in_order_over_one_tree() {
        let doc = Document::from(
            r#"<html><body class="page" onload="init()">
                <nav>menu</nav>
                <div hidden>secret</div>
                <article style="color:red"><p onclick="x()">Story text</p></article>
            </body></html>"#,
        );

        let extracted = extract(&doc, &InlineStyleResolver, &DEFAULT_PATTERNS).unwrap();

        assert_eq!(extracted.root_tag, "body");
        assert_eq!(extracted.hidden.by_selector, 1);
        assert_eq!(extracted.clutter.basic_count, 1);
        assert_eq!(extracted.stripped_attributes, 3);
        assert!(extracted.content.contains("Story text"));
        assert!(!extracted.content.contains("menu"));
        assert!(!extracted.content.contains("secret"));
        assert!(!extracted.content.contains("onclick"));
        assert!(extracted.content.contains(r#"class="page""#));
    }

    #[test]
    fn missing_content_is_none() {
        let mut tables = PatternTables::default();
        tables.content_markers.clear();
        let patterns = tables.compile().unwrap();
        let doc = Document::from("<nav>n</nav><footer>f</footer><div></div>");

        assert!(matches!(run(&doc, &InlineStyleResolver, &patterns), Err(Error::NoContent)));
        assert!(extract(&doc, &InlineStyleResolver, &patterns).is_none());
    }

    #[test]
    fn panicking_resolver_is_contained() {
        let doc = Document::from("<article>text</article>");
        let resolver = style::from_fn(|_node| -> std::result::Result<ComputedStyle, style::StyleError> {
            panic!("resolver exploded")
        });

        assert!(extract(&doc, &resolver, &DEFAULT_PATTERNS).is_none());
    }
}
