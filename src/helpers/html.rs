//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Open/close tags, including a tag left unterminated at the end of input
    static ref TAG_RE: Regex = Regex::new(r"</?[^>]+(>|$)").unwrap();
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Truncate a string to at most `length` characters and append `omission`.
///
/// Unlike a display truncation, the omission is always appended, which is
/// what the card excerpts expect.
pub fn truncate_with(s: &str, length: usize, omission: &str) -> String {
    let mut truncated: String = s.chars().take(length).collect();
    truncated.push_str(omission);
    truncated
}

/// Derive a short plain-text excerpt from HTML content: tags stripped, then
/// the first `length` characters, whitespace included
pub fn excerpt(content: Option<&str>, length: usize) -> String {
    let text = content.map(strip_html).unwrap_or_default();
    truncate_with(&text, length, "...")
}
