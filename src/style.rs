//! Style resolution capability.
//!
//! The hidden-element filter needs each element's resolved `display`,
//! `visibility` and `opacity`. Real values need a cascade and a layout engine,
//! so the filter only talks to the [`StyleResolver`] trait. Hosts with a
//! browser engine plug in their own; [`InlineStyleResolver`] covers the
//! parsed-tree case and [`from_fn`] wraps a closure for tests.

use dom_query::{NodeRef, Selection};

use crate::dom;

/// Elements a user agent never renders.
pub const UA_HIDDEN_TAGS: &[&str] = &[
    "head", "script", "style", "template", "noscript", "meta", "link", "title", "base",
];

/// Resolved display-related style of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "inline".to_string(),
            visibility: "visible".to_string(),
            opacity: "1".to_string(),
        }
    }
}

impl ComputedStyle {
    /// A style that renders nothing.
    #[must_use]
    pub fn display_none() -> Self {
        Self {
            display: "none".to_string(),
            ..Self::default()
        }
    }

    /// Whether the element is not visually rendered.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.display == "none" || self.visibility == "hidden" || self.opacity == "0"
    }
}

/// Failure to resolve an element's style.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("style resolution failed: {0}")]
pub struct StyleError(pub String);

/// Resolves the display-related style of an element.
pub trait StyleResolver {
    fn resolve(&self, node: &NodeRef<'_>) -> Result<ComputedStyle, StyleError>;
}

impl<R: StyleResolver + ?Sized> StyleResolver for &R {
    fn resolve(&self, node: &NodeRef<'_>) -> Result<ComputedStyle, StyleError> {
        (**self).resolve(node)
    }
}

/// Resolver backed by a closure.
pub struct FnResolver<F>(F);

/// Wrap a closure as a [`StyleResolver`].
///
/// # Example
///
/// ```rust
/// use rs_reader_view::style::{self, ComputedStyle, StyleResolver};
/// use rs_reader_view::dom::Document;
///
/// let resolver = style::from_fn(|_node| Ok(ComputedStyle::default()));
/// let doc = Document::from("<p>visible</p>");
/// let p = doc.select("p").nodes()[0];
/// assert!(!resolver.resolve(&p)?.is_hidden());
/// # Ok::<(), rs_reader_view::style::StyleError>(())
/// ```
pub fn from_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&NodeRef<'_>) -> Result<ComputedStyle, StyleError>,
{
    FnResolver(f)
}

impl<F> StyleResolver for FnResolver<F>
where
    F: Fn(&NodeRef<'_>) -> Result<ComputedStyle, StyleError>,
{
    fn resolve(&self, node: &NodeRef<'_>) -> Result<ComputedStyle, StyleError> {
        (self.0)(node)
    }
}

/// Resolver reading user-agent defaults and inline `style` declarations.
///
/// Stylesheets are not evaluated. The last declaration of a property wins,
/// `!important` is ignored, and any opacity that evaluates to zero
/// (`0`, `0.0`, `0%`) resolves to `"0"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyleResolver;

impl StyleResolver for InlineStyleResolver {
    fn resolve(&self, node: &NodeRef<'_>) -> Result<ComputedStyle, StyleError> {
        let sel = Selection::from(*node);
        let mut style = match dom::tag_name(&sel) {
            Some(tag) if UA_HIDDEN_TAGS.contains(&tag.as_str()) => ComputedStyle::display_none(),
            Some(_) => ComputedStyle::default(),
            None => return Err(StyleError("not an element".to_string())),
        };

        let Some(inline) = dom::get_attribute(&sel, "style") else {
            return Ok(style);
        };

        for (property, value) in declarations(&inline) {
            match property.as_str() {
                "display" => style.display = value,
                "visibility" => style.visibility = value,
                "opacity" => style.opacity = normalize_opacity(&value),
                _ => {}
            }
        }

        Ok(style)
    }
}

/// Split an inline style into lower-cased `(property, value)` pairs.
fn declarations(inline: &str) -> Vec<(String, String)> {
    inline
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(property, value)| {
            let value = value.trim().to_ascii_lowercase();
            let value = value
                .strip_suffix("!important")
                .map_or(value.as_str(), str::trim_end)
                .to_string();
            (property.trim().to_ascii_lowercase(), value)
        })
        .filter(|(property, value)| !property.is_empty() && !value.is_empty())
        .collect()
}

fn normalize_opacity(value: &str) -> String {
    let parsed = match value.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().map(|v| v / 100.0),
        None => value.parse::<f64>(),
    };
    match parsed {
        Ok(v) if v <= 0.0 => "0".to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn resolve(html: &str, selector: &str) -> ComputedStyle {
        let doc = Document::from(html);
        let node = doc.select(selector).nodes()[0];
        InlineStyleResolver.resolve(&node).unwrap()
    }

    #[test]
    fn plain_element_is_visible() {
        let style = resolve("<p>text</p>", "p");
        assert_eq!(style, ComputedStyle::default());
        assert!(!style.is_hidden());
    }

    #[test]
    fn inline_display_none_with_odd_spacing() {
        let style = resolve(r#"<div style="color: red;  DISPLAY :  None ">x</div>"#, "div");
        assert_eq!(style.display, "none");
        assert!(style.is_hidden());
    }

    #[test]
    fn last_declaration_wins() {
        let style = resolve(r#"<div style="display:none; display: block">x</div>"#, "div");
        assert_eq!(style.display, "block");
        assert!(!style.is_hidden());
    }

    #[test]
    fn important_flag_is_ignored() {
        let style = resolve(r#"<div style="visibility: hidden !important">x</div>"#, "div");
        assert_eq!(style.visibility, "hidden");
    }

    #[test]
    fn zero_opacity_variants_normalize() {
        for inline in ["opacity:0", "opacity: 0.0", "opacity: 0%"] {
            let html = format!(r#"<div style="{inline}">x</div>"#);
            assert_eq!(resolve(&html, "div").opacity, "0", "{inline}");
        }
        assert_eq!(resolve(r#"<div style="opacity: .5">x</div>"#, "div").opacity, ".5");
    }

    #[test]
    fn script_and_head_are_never_rendered() {
        let html = "<html><head><title>t</title></head><body><script>x()</script></body></html>";
        assert!(resolve(html, "head").is_hidden());
        assert!(resolve(html, "script").is_hidden());
        assert!(!resolve(html, "body").is_hidden());
    }

    #[test]
    fn closure_resolver_forwards() {
        let resolver = from_fn(|_node| Err(StyleError("boom".to_string())));
        let doc = Document::from("<p>x</p>");
        let p = doc.select("p").nodes()[0];
        assert_eq!(resolver.resolve(&p), Err(StyleError("boom".to_string())));
    }
}
