//! Main-Content Locator
//!
//! Picks the element whose subtree becomes the reader view. Explicit markers
//! win outright, in table order. Only when none of them matches are block
//! elements scored.

use dom_query::Selection;
use tracing::{debug, warn};

use crate::dom::{self, Document};
use crate::patterns::Patterns;
use crate::scoring::content_score;

/// A scored fallback candidate.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub element: Selection<'a>,
    pub score: i32,
}

/// Locate the main-content element.
///
/// Returns `None` when no marker matches and no block element scores above 0.
#[must_use]
pub fn locate<'a>(doc: &'a Document, patterns: &Patterns) -> Option<Selection<'a>> {
    if let Some(marked) = find_marked_content(doc, patterns) {
        return Some(marked);
    }

    let best = rank_candidates(doc, patterns).into_iter().next()?;
    debug!(
        score = best.score,
        tag = dom::tag_name(&best.element).unwrap_or_default(),
        "main content chosen by score"
    );
    Some(best.element)
}

/// First match of the first content marker that matches anything.
#[must_use]
pub fn find_marked_content<'a>(doc: &'a Document, patterns: &Patterns) -> Option<Selection<'a>> {
    for marker in patterns.content_markers() {
        let matcher = match dom::compile_selector(marker) {
            Ok(matcher) => matcher,
            Err(err) => {
                warn!(%err, "skipping content marker");
                continue;
            }
        };
        if let Some(node) = doc.select_matcher(&matcher).nodes().first() {
            debug!(marker = marker.as_str(), "main content found by marker");
            return Some(Selection::from(*node));
        }
    }
    None
}

/// Block elements with a positive score, best first.
///
/// The sort is stable: equal scores keep document order.
#[must_use]
pub fn rank_candidates<'a>(doc: &'a Document, patterns: &Patterns) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = dom::elements(doc)
        .into_iter()
        .map(Selection::from)
        .filter(|element| dom::tag_name(element).is_some_and(|tag| patterns.is_block_tag(&tag)))
        .map(|element| {
            let score = content_score(&element, patterns);
            Candidate { element, score }
        })
        .filter(|candidate| candidate.score > 0)
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternTables, DEFAULT_PATTERNS};

    fn without_body_marker() -> Patterns {
        let mut tables = PatternTables::default();
        tables.content_markers.retain(|marker| marker != "body");
        tables.compile().unwrap()
    }

    #[test]
    fn body_marker_wins_for_full_documents() {
        let doc = Document::from("<html><body><article><p>x</p></article></body></html>");
        let found = locate(&doc, &DEFAULT_PATTERNS).unwrap();
        assert_eq!(dom::tag_name(&found), Some("body".to_string()));
    }

    #[test]
    fn article_beats_post_content() {
        let doc = Document::fragment(
            r#"<div class="post-content" id="pc"><p>first</p></div><article id="art"><p>second</p></article>"#,
        );
        let found = locate(&doc, &DEFAULT_PATTERNS).unwrap();
        assert_eq!(dom::id(&found), Some("art".to_string()));
    }

    #[test]
    fn first_match_of_winning_marker_is_returned() {
        let doc = Document::fragment(r#"<article id="one">a</article><article id="two">b</article>"#);
        let found = find_marked_content(&doc, &DEFAULT_PATTERNS).unwrap();
        assert_eq!(dom::id(&found), Some("one".to_string()));
    }

    #[test]
    fn fallback_picks_highest_score() {
        let patterns = without_body_marker();
        let doc = Document::from(
            r#"<div id="wrapper">
                <div id="menu-block"><a href="/">Home</a></div>
                <div id="story"><p>a</p><p>b</p><p>c</p></div>
                <section><p>only one</p></section>
            </div>"#,
        );

        let ranked = rank_candidates(&doc, &patterns);
        let found = locate(&doc, &patterns).unwrap();

        assert_eq!(dom::id(&found), Some("story".to_string()));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(ranked.iter().all(|c| c.score > 0));
    }

    #[test]
    fn ties_keep_document_order() {
        let patterns = without_body_marker();
        let doc = Document::from(r#"<div id="first"><p>a</p></div><div id="second"><p>b</p></div>"#);

        let ranked = rank_candidates(&doc, &patterns);

        let ids: Vec<String> = ranked.iter().filter_map(|c| dom::id(&c.element)).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(dom::id(&locate(&doc, &patterns).unwrap()), Some("first".to_string()));
    }

    #[test]
    fn no_positive_candidate_yields_none() {
        let patterns = without_body_marker();
        let doc = Document::from(
            r#"<nav><a href="/">Home</a></nav><div></div><div class="sidebar">x</div><footer>f</footer>"#,
        );

        assert!(rank_candidates(&doc, &patterns).is_empty());
        assert!(locate(&doc, &patterns).is_none());
    }

    #[test]
    fn malformed_marker_is_skipped() {
        let tables = PatternTables {
            content_markers: vec!["main[[".into(), "article".into()],
            ..PatternTables::default()
        };
        let patterns = tables.compile().unwrap();
        let doc = Document::from("<article>a</article>");

        let found = locate(&doc, &patterns).unwrap();
        assert_eq!(dom::tag_name(&found), Some("article".to_string()));
    }
}
