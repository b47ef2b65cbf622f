//! DOM Operations Adapter
//!
//! Thin helpers over `dom_query` used by every stage: attribute access,
//! selector compilation that reports errors instead of panicking, document
//! order snapshots and the attachment check that makes snapshot-then-mutate
//! traversal safe.

// Re-export core types for external use
pub use dom_query::{Document, Matcher, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::error::{Error, Result};

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

/// Names of all attributes on the first node of the selection.
#[must_use]
pub fn attribute_names(sel: &Selection) -> Vec<String> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| attr.name.local.to_string())
                .collect()
        })
        .unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Querying ===

/// Parse a CSS selector.
///
/// `Document::select` panics on malformed input; the pipeline needs the
/// failure as a value so it can skip just that selector.
pub fn compile_selector(selector: &str) -> Result<Matcher> {
    Matcher::new(selector).map_err(|err| Error::Selector {
        selector: selector.to_string(),
        reason: format!("{err:?}"),
    })
}

/// Snapshot of every element currently in the document, in document order.
#[must_use]
pub fn elements(doc: &Document) -> Vec<NodeRef<'_>> {
    doc.select("*").nodes().to_vec()
}

// === Tree Manipulation ===

/// Whether the node is still connected to the document root.
///
/// Removal only cuts the link between the removed node and its parent, so a
/// descendant of a removed node still has a parent. Walking up to the root is
/// the only reliable test.
#[must_use]
pub fn is_attached(doc: &Document, node: &NodeRef) -> bool {
    let root = doc.root().id;
    let mut current = *node;
    loop {
        if current.id == root {
            return true;
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}

/// Detach a node (and with it, its subtree) from the tree.
#[inline]
pub fn remove_node(node: &NodeRef) {
    node.remove_from_parent();
}

/// Clone document
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}
