//! Pattern tables driving every stage of the pipeline.
//!
//! The tables are plain data ([`PatternTables`]) so they can be swapped or
//! loaded from a JSON options file. [`PatternTables::compile`] turns them into
//! [`Patterns`], the form the stages consume. The default tables are compiled
//! once on first use.

#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// Classification Words
// =============================================================================

/// Class/id fragments suggesting an element holds the article body.
pub const POSITIVE_WORDS: &[&str] = &[
    "article", "content", "main", "post", "body", "text", "blog", "story",
];

/// Class/id fragments suggesting an element is boilerplate.
/// Every entry is an unanchored substring, `ad` included, so `header` matches
/// too. Callers wanting `\bad\b` can swap it in through `PatternTables`.
pub const NEGATIVE_WORDS: &[&str] = &[
    "comment", "meta", "footer", "footnote", "foot", "nav", "sidebar", "banner", "ad", "popup",
    "menu",
];

/// Tags eligible for fallback scoring.
pub const BLOCK_TAGS: &[&str] = &["div", "section", "article", "main"];

// =============================================================================
// Removal Tables
// =============================================================================

/// Selectors for elements hidden by markup alone.
pub const HIDDEN_SELECTORS: &[&str] = &[
    r#"[aria-hidden="true"]"#,
    "[hidden]",
    r#"[style*="display: none"]"#,
    r#"[style*="display:none"]"#,
    r#"[style*="visibility: hidden"]"#,
    r#"[style*="visibility:hidden"]"#,
    ".hidden",
    ".invisible",
];

/// Boilerplate selectors, evaluated in order against the live tree.
pub const CLUTTER_SELECTORS: &[&str] = &[
    "aside",
    "nav",
    "footer",
    "form",
    "iframe",
    "button",
    "noscript",
    "script",
    "style",
    "#toc",
    ".toc",
    "#comments",
    ".comments",
    "#disqus_thread",
    ".Ad",
    ".ad",
    ".ads",
    ".advertisement",
    r#"[role="navigation"]"#,
    r#"[role="banner"]"#,
    r#"[role="complementary"]"#,
    r#"[role="contentinfo"]"#,
    r#"[role="dialog"]"#,
    r#"[class^="ad-"]"#,
    r#"[class$="-ad"]"#,
    r#"[id^="ad-"]"#,
    r#"[id$="-ad"]"#,
];

/// Substrings searched (case-insensitively) in class, id and `data-testid`.
pub const CLUTTER_SUBSTRINGS: &[&str] = &[
    "sidebar", "banner", "breadcrumb", "related", "share", "social", "promo", "sticky",
    "newsletter", "subscribe", "popup", "cookie", "sponsor", "advert", "-ad-", "_ad_",
];

// =============================================================================
// Location and Sanitizing
// =============================================================================

/// High-confidence main-content markers, highest priority first.
pub const CONTENT_MARKERS: &[&str] = &[
    "body",
    r#"main[role="main"]"#,
    r#"[role="article"]"#,
    "article",
    r#"[itemprop="articleBody"]"#,
    ".post-content",
    ".article-content",
    "#article-content",
    ".content-article",
];

/// Attributes surviving sanitizing (besides any `data-*`).
pub const ATTRIBUTE_WHITELIST: &[&str] = &[
    "href", "src", "srcset", "data-src", "data-srcset", "alt", "title", "id", "class", "width",
    "height", "colspan", "rowspan", "headers", "aria-label", "role", "lang",
];

/// Default tables, compiled on first use.
pub static DEFAULT_PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    PatternTables::default()
        .compile()
        .expect("default pattern tables compile")
});

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Replaceable pattern tables, as plain ordered lists.
///
/// Missing fields fall back to the defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use rs_reader_view::PatternTables;
///
/// let mut tables = PatternTables::default();
/// tables.content_markers.retain(|m| m != "body");
/// let patterns = tables.compile()?;
/// assert!(!patterns.content_markers().iter().any(|m| m == "body"));
/// # Ok::<(), rs_reader_view::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternTables {
    /// Regex alternatives for the positive class/id bonus.
    pub positive: Vec<String>,
    /// Regex alternatives for the negative class/id penalty.
    pub negative: Vec<String>,
    /// Tags scored during fallback location.
    pub block_tags: Vec<String>,
    /// Selectors marking elements as hidden.
    pub hidden_selectors: Vec<String>,
    /// Selectors for the basic clutter pass.
    pub clutter_selectors: Vec<String>,
    /// Substrings for the clutter pattern pass.
    pub clutter_substrings: Vec<String>,
    /// Main-content marker selectors, in priority order.
    pub content_markers: Vec<String>,
    /// Attributes kept by the sanitizer.
    pub attribute_whitelist: Vec<String>,
}

impl Default for PatternTables {
    fn default() -> Self {
        Self {
            positive: owned(POSITIVE_WORDS),
            negative: owned(NEGATIVE_WORDS),
            block_tags: owned(BLOCK_TAGS),
            hidden_selectors: owned(HIDDEN_SELECTORS),
            clutter_selectors: owned(CLUTTER_SELECTORS),
            clutter_substrings: owned(CLUTTER_SUBSTRINGS),
            content_markers: owned(CONTENT_MARKERS),
            attribute_whitelist: owned(ATTRIBUTE_WHITELIST),
        }
    }
}

impl PatternTables {
    /// Compile the tables into the form used by the pipeline.
    ///
    /// Word lists become case-insensitive regexes, tags, substrings and
    /// attribute names are lower-cased. Selectors are kept as text and
    /// parsed by each stage, so one bad selector only disables itself.
    pub fn compile(&self) -> Result<Patterns> {
        Ok(Patterns {
            positive: compile_words(&self.positive)?,
            negative: compile_words(&self.negative)?,
            block_tags: lowercase_set(&self.block_tags),
            hidden_selectors: self.hidden_selectors.clone(),
            clutter_selectors: self.clutter_selectors.clone(),
            clutter_substrings: self
                .clutter_substrings
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase())
                .collect(),
            content_markers: self.content_markers.clone(),
            attribute_whitelist: lowercase_set(&self.attribute_whitelist),
        })
    }
}

/// An empty word list yields `None` (never matches) rather than an empty
/// alternation, which would match everything.
fn compile_words(words: &[String]) -> Result<Option<Regex>> {
    if words.is_empty() {
        return Ok(None);
    }
    let pattern = format!("(?i)(?:{})", words.join("|"));
    Regex::new(&pattern).map(Some).map_err(|err| Error::Pattern {
        pattern,
        reason: err.to_string(),
    })
}

fn lowercase_set(items: &[String]) -> HashSet<String> {
    items.iter().map(|s| s.to_ascii_lowercase()).collect()
}

/// Compiled pattern tables.
#[derive(Debug, Clone)]
pub struct Patterns {
    positive: Option<Regex>,
    negative: Option<Regex>,
    block_tags: HashSet<String>,
    hidden_selectors: Vec<String>,
    clutter_selectors: Vec<String>,
    clutter_substrings: Vec<String>,
    content_markers: Vec<String>,
    attribute_whitelist: HashSet<String>,
}

impl Patterns {
    /// Whether `haystack` carries a positive class/id word.
    #[must_use]
    pub fn is_positive(&self, haystack: &str) -> bool {
        self.positive.as_ref().is_some_and(|re| re.is_match(haystack))
    }

    /// Whether `haystack` carries a negative class/id word.
    #[must_use]
    pub fn is_negative(&self, haystack: &str) -> bool {
        self.negative.as_ref().is_some_and(|re| re.is_match(haystack))
    }

    /// Whether `tag` (lower-case) is scored during fallback.
    #[must_use]
    pub fn is_block_tag(&self, tag: &str) -> bool {
        self.block_tags.contains(tag)
    }

    #[must_use]
    pub fn hidden_selectors(&self) -> &[String] {
        &self.hidden_selectors
    }

    #[must_use]
    pub fn clutter_selectors(&self) -> &[String] {
        &self.clutter_selectors
    }

    /// Whether a lower-cased attribute value contains a clutter substring.
    #[must_use]
    pub fn has_clutter_substring(&self, lowercase_value: &str) -> bool {
        self.clutter_substrings
            .iter()
            .any(|needle| lowercase_value.contains(needle.as_str()))
    }

    #[must_use]
    pub fn content_markers(&self) -> &[String] {
        &self.content_markers
    }

    /// Whether an attribute survives sanitizing.
    #[must_use]
    pub fn keeps_attribute(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        name.starts_with("data-") || self.attribute_whitelist.contains(&name)
    }
}

impl Default for Patterns {
    fn default() -> Self {
        DEFAULT_PATTERNS.clone()
    }
}
