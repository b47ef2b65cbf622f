//! Hidden-Element Filter
//!
//! Removes elements that are not rendered, first by markup (attributes, inline
//! style, utility classes) and then by resolved style. Each pass snapshots its
//! candidates before removing anything, and skips nodes that were detached
//! earlier in the same pass, usually through an ancestor.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::dom::{self, Document, NodeId};
use crate::patterns::Patterns;
use crate::style::StyleResolver;

/// Removal counts per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiddenStats {
    /// Elements removed because a hidden-element selector matched.
    pub by_selector: usize,
    /// Elements removed because their resolved style hides them.
    pub by_style: usize,
}

impl HiddenStats {
    /// Total number of removed subtrees.
    #[must_use]
    pub fn total(&self) -> usize {
        self.by_selector + self.by_style
    }
}

/// Remove hidden elements from the document.
///
/// Only the topmost element of a removed subtree is counted.
pub fn filter_hidden(doc: &Document, resolver: &dyn StyleResolver, patterns: &Patterns) -> HiddenStats {
    let by_selector = remove_by_selectors(doc, patterns.hidden_selectors());
    let by_style = remove_by_resolved_style(doc, resolver);
    debug!(by_selector, by_style, "hidden-element filter done");
    HiddenStats { by_selector, by_style }
}

fn remove_by_selectors(doc: &Document, selectors: &[String]) -> usize {
    let mut flagged: HashSet<NodeId> = HashSet::new();
    for selector in selectors {
        match dom::compile_selector(selector) {
            Ok(matcher) => flagged.extend(doc.select_matcher(&matcher).nodes().iter().map(|n| n.id)),
            Err(err) => warn!(%err, "skipping hidden-element selector"),
        }
    }
    if flagged.is_empty() {
        return 0;
    }

    let mut removed = 0;
    for node in dom::elements(doc) {
        if flagged.contains(&node.id) && dom::is_attached(doc, &node) {
            dom::remove_node(&node);
            removed += 1;
        }
    }
    removed
}

fn remove_by_resolved_style(doc: &Document, resolver: &dyn StyleResolver) -> usize {
    let mut removed = 0;
    for node in dom::elements(doc) {
        if !dom::is_attached(doc, &node) {
            continue;
        }
        let hidden = match resolver.resolve(&node) {
            Ok(style) => style.is_hidden(),
            Err(err) => {
                debug!(%err, "style unresolved, treating element as visible");
                false
            }
        };
        if hidden {
            dom::remove_node(&node);
            removed += 1;
        }
    }
    removed
}
