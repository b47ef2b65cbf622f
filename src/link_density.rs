//! Link Density
//!
//! Share of an element's text that sits inside links. Navigation blocks and
//! link lists score close to 1, prose close to 0.

use dom_query::Selection;

use crate::dom;

/// Sum of link text lengths (in chars) over every `<a>` under the element.
fn link_text_length(links: &Selection) -> usize {
    links.iter().map(|link| dom::text_content(&link).chars().count()).sum()
}

/// Ratio of link text length to total text length.
///
/// Lengths are untrimmed character counts. An element without text has a
/// density of 0.
#[must_use]
pub fn link_density(element: &Selection) -> f64 {
    let text_length = dom::text_content(element).chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let links = element.select("a");
    if links.is_empty() {
        return 0.0;
    }

    link_text_length(&links) as f64 / text_length as f64
}
