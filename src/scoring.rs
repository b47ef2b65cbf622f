//! Content Scoring
//!
//! Heuristic estimate of how likely an element is the article body. Used by
//! the locator when no explicit content marker exists. Scoring reads the
//! element and its subtree and never mutates the tree.
//!
//! | Signal | Contribution |
//! |---|---|
//! | positive class/id word | +25 |
//! | negative class/id word | -25 |
//! | words / 100 | up to +3 |
//! | link density > 0.5 | -10 |
//! | each `<p>` | +1 |
//! | each `<img>` | +3, up to +9 |
//!
//! The class/id bonus and penalty are independent, so `article-sidebar`
//! nets to zero.

use dom_query::Selection;

use crate::dom;
use crate::link_density::link_density;
use crate::patterns::Patterns;

pub const CLASS_WEIGHT: i32 = 25;
pub const MAX_WORD_BONUS: i32 = 3;
pub const WORDS_PER_POINT: usize = 100;
pub const LINK_DENSITY_LIMIT: f64 = 0.5;
pub const LINK_DENSITY_PENALTY: i32 = 10;
pub const IMAGE_WEIGHT: i32 = 3;
pub const MAX_IMAGE_BONUS: i32 = 9;

/// Score a candidate element.
///
/// # Example
///
/// ```rust
/// use rs_reader_view::dom::Document;
/// use rs_reader_view::{scoring, DEFAULT_PATTERNS};
///
/// let doc = Document::from(r#"<div class="post"><p>One.</p><p>Two.</p></div>"#);
/// assert_eq!(scoring::content_score(&doc.select("div"), &DEFAULT_PATTERNS), 27);
/// ```
#[must_use]
pub fn content_score(element: &Selection, patterns: &Patterns) -> i32 {
    let class_and_id = format!(
        "{} {}",
        dom::class_name(element).unwrap_or_default(),
        dom::id(element).unwrap_or_default()
    );

    let mut score = 0;
    if patterns.is_positive(&class_and_id) {
        score += CLASS_WEIGHT;
    }
    if patterns.is_negative(&class_and_id) {
        score -= CLASS_WEIGHT;
    }

    let words = dom::text_content(element).split_whitespace().count();
    score += ((words / WORDS_PER_POINT) as i32).min(MAX_WORD_BONUS);

    if link_density(element) > LINK_DENSITY_LIMIT {
        score -= LINK_DENSITY_PENALTY;
    }

    score += element.select("p").length() as i32;
    score += (element.select("img").length() as i32 * IMAGE_WEIGHT).min(MAX_IMAGE_BONUS);

    score
}
