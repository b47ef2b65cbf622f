//! Attribute Sanitizer
//!
//! Strips every attribute that is neither whitelisted nor `data-*` from a
//! subtree. Tags, children and element identity are left alone.

use dom_query::Selection;

use crate::dom;
use crate::patterns::Patterns;

/// Sanitize `root` and all of its descendant elements.
///
/// Returns the number of attributes removed, so a second call on the same
/// subtree returns 0.
pub fn sanitize(root: &Selection, patterns: &Patterns) -> usize {
    let mut stripped = 0;
    for element in root.iter().chain(root.select("*").iter()) {
        for name in dom::attribute_names(&element) {
            if !patterns.keeps_attribute(&name) {
                dom::remove_attribute(&element, &name);
                stripped += 1;
            }
        }
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::patterns::DEFAULT_PATTERNS;

    const HTML: &str = r#"<div id="root" class="c" style="margin:0" onclick="x()">
        <a href="/a" target="_blank" rel="nofollow" data-track="1">link</a>
        <img src="i.jpg" alt="alt" loading="lazy" width="10" data-src="j.jpg">
        <table><tr><td colspan="2" bgcolor="red" headers="h">cell</td></tr></table>
    </div>"#;

    #[test]
    fn non_whitelisted_attributes_are_removed() {
        let doc = Document::from(HTML);
        let root = doc.select("#root");

        let stripped = sanitize(&root, &DEFAULT_PATTERNS);

        // style, onclick, target, rel, loading, bgcolor
        assert_eq!(stripped, 6);
        assert_eq!(dom::attribute_names(&root).len(), 2);
        assert!(doc.select("[style], [onclick], [target], [rel], [loading], [bgcolor]").is_empty());
        assert!(doc.select(r#"a[href="/a"][data-track="1"]"#).exists());
        assert!(doc.select(r#"img[src][alt][width][data-src]"#).exists());
        assert!(doc.select(r#"td[colspan][headers]"#).exists());
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let doc = Document::from(HTML);
        let root = doc.select("#root");

        assert!(sanitize(&root, &DEFAULT_PATTERNS) > 0);
        let html = doc.html().to_string();
        assert_eq!(sanitize(&root, &DEFAULT_PATTERNS), 0);
        assert_eq!(doc.html().to_string(), html);
    }

    #[test]
    fn only_the_given_subtree_is_touched() {
        let doc = Document::from(r#"<div id="outside" style="x"></div><div id="inside" style="y"><p onclick="z">t</p></div>"#);

        let stripped = sanitize(&doc.select("#inside"), &DEFAULT_PATTERNS);

        assert_eq!(stripped, 2);
        assert!(doc.select("#outside[style]").exists());
    }

    #[test]
    fn structure_is_preserved() {
        let doc = Document::from(HTML);
        let root = doc.select("#root");
        let before: Vec<String> = root.select("*").iter().filter_map(|e| dom::tag_name(&e)).collect();

        sanitize(&root, &DEFAULT_PATTERNS);

        let after: Vec<String> = root.select("*").iter().filter_map(|e| dom::tag_name(&e)).collect();
        assert_eq!(before, after);
        assert!(root.text().contains("cell"));
    }
}
