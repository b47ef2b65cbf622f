//! Clutter Remover
//!
//! Two passes over the live tree:
//!
//! 1. **Basic selectors**: each selector is evaluated against the tree as left
//!    by the previous one, and every still-attached match is removed.
//! 2. **Substring patterns**: one snapshot of all elements, walked in reverse
//!    document order. Elements whose class, id or `data-testid` contains a
//!    clutter substring are removed. Walking backwards visits descendants
//!    before their ancestors, and anything detached in the meantime is skipped.

use dom_query::Selection;
use tracing::{debug, warn};

use crate::dom::{self, Document, NodeRef};
use crate::patterns::Patterns;

/// Attributes inspected by the substring pass.
const PATTERN_ATTRIBUTES: [&str; 3] = ["class", "id", "data-testid"];

/// Removal counts per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClutterStats {
    /// Elements removed because a basic clutter selector matched.
    pub basic_count: usize,
    /// Elements removed because an attribute contained a clutter substring.
    pub pattern_count: usize,
}

impl ClutterStats {
    /// Total number of removed subtrees.
    #[must_use]
    pub fn total(&self) -> usize {
        self.basic_count + self.pattern_count
    }
}

/// Remove boilerplate elements from the document.
pub fn remove_clutter(doc: &Document, patterns: &Patterns) -> ClutterStats {
    let basic_count = remove_by_selectors(doc, patterns.clutter_selectors());
    let pattern_count = remove_by_substrings(doc, patterns);
    debug!(basic_count, pattern_count, "clutter removal done");
    ClutterStats {
        basic_count,
        pattern_count,
    }
}

fn remove_by_selectors(doc: &Document, selectors: &[String]) -> usize {
    let mut removed = 0;
    for selector in selectors {
        let matcher = match dom::compile_selector(selector) {
            Ok(matcher) => matcher,
            Err(err) => {
                warn!(%err, "skipping clutter selector");
                continue;
            }
        };
        // Nested matches (a nav inside a nav) detach with their ancestor.
        for node in doc.select_matcher(&matcher).nodes() {
            if dom::is_attached(doc, node) {
                dom::remove_node(node);
                removed += 1;
            }
        }
    }
    removed
}

fn remove_by_substrings(doc: &Document, patterns: &Patterns) -> usize {
    let mut removed = 0;
    for node in dom::elements(doc).iter().rev() {
        if !dom::is_attached(doc, node) {
            continue;
        }
        if is_clutter(node, patterns) {
            dom::remove_node(node);
            removed += 1;
        }
    }
    removed
}

fn is_clutter(node: &NodeRef, patterns: &Patterns) -> bool {
    let sel = Selection::from(*node);
    PATTERN_ATTRIBUTES.iter().any(|attr| {
        dom::get_attribute(&sel, attr)
            .is_some_and(|value| patterns.has_clutter_substring(&value.to_lowercase()))
    })
}
