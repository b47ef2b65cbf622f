//! Character decoding for raw HTML input.
//!
//! The pipeline works on an already-parsed tree; this is for hosts (like the
//! `extract_stdin` tool) that start from bytes. The charset is taken from a
//! `<meta charset>` or `http-equiv` declaration near the top of the document,
//! defaulting to UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How far into the document a charset declaration is looked for.
const SNIFF_LEN: usize = 1024;

/// Matches both `<meta charset="...">` and
/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_:.\-]+)"#).expect("valid regex")
});

/// Detect the declared encoding of an HTML byte stream.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    META_CHARSET
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// A byte order mark overrides the declared charset. Invalid sequences are
/// replaced with U+FFFD.
///
/// # Examples
///
/// ```
/// use rs_reader_view::encoding::decode_html;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// assert!(decode_html(html).contains("Hello, World!"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let (decoded, _encoding_used, _had_errors) = detect_encoding(html).decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, WINDOWS_1252};

    #[test]
    fn utf8_is_the_default() {
        assert_eq!(detect_encoding(b"<p>no declaration</p>"), UTF_8);
    }

    #[test]
    fn meta_charset_is_honoured() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head><body>Test</body></html>"#;
        // WHATWG maps latin1 labels to windows-1252
        assert_eq!(detect_encoding(html), WINDOWS_1252);
    }

    #[test]
    fn http_equiv_charset_is_honoured() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=Shift_JIS">"#;
        assert_eq!(detect_encoding(html), SHIFT_JIS);
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        assert_eq!(detect_encoding(br#"<meta charset="klingon">"#), UTF_8);
    }

    #[test]
    fn latin1_bytes_are_decoded() {
        let mut html = br#"<meta charset="windows-1252"><p>caf"#.to_vec();
        html.push(0xE9);
        html.extend_from_slice(b"</p>");
        assert!(decode_html(&html).contains("café"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let html = b"<p>bad \xFF byte</p>";
        assert!(decode_html(html).contains('\u{FFFD}'));
    }
}
