//! HTML output helpers for `<head>` fragments.
//!
//! - `escape()`, `escape_attr()` - HTML entity escaping
//! - `escape_json_script()` - make JSON safe inside `<script>`
//! - `HeadWriter` - appends `<meta>`, `<link>`, `<script>` tags line by line

use std::borrow::Cow;
use std::fmt::Write;

// =============================================================================
// Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Borrows the input when nothing needs escaping.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape an attribute value. Same rules as `escape()`.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Make serialized JSON safe to embed in a `<script>` element.
///
/// `<`, `>` and `&` become JSON unicode escapes, which parse back to the same
/// string values, so `</script>` can never terminate the element early.
pub fn escape_json_script(json: &str) -> Cow<'_, str> {
    if !json.contains(['<', '>', '&']) {
        return Cow::Borrowed(json);
    }

    let mut out = String::with_capacity(json.len() + 16);
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

// =============================================================================
// HeadWriter
// =============================================================================

/// Line-oriented builder for head fragments.
#[derive(Debug, Default)]
pub struct HeadWriter {
    buf: String,
}

impl HeadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, text: &str) {
        let _ = writeln!(self.buf, "<title>{}</title>", escape(text));
    }

    /// `<meta name="..." content="...">`
    pub fn meta_name(&mut self, name: &str, content: &str) {
        let _ = writeln!(
            self.buf,
            "<meta name=\"{}\" content=\"{}\">",
            escape_attr(name),
            escape_attr(content)
        );
    }

    /// `<meta property="..." content="...">` (Open Graph)
    pub fn meta_property(&mut self, property: &str, content: &str) {
        let _ = writeln!(
            self.buf,
            "<meta property=\"{}\" content=\"{}\">",
            escape_attr(property),
            escape_attr(content)
        );
    }

    pub fn link(&mut self, rel: &str, href: &str) {
        let _ = writeln!(
            self.buf,
            "<link rel=\"{}\" href=\"{}\">",
            escape_attr(rel),
            escape_attr(href)
        );
    }

    /// Embed one JSON document as `<script type="application/ld+json">`.
    pub fn json_ld(&mut self, json: &str) {
        let _ = writeln!(
            self.buf,
            "<script type=\"application/ld+json\">{}</script>",
            escape_json_script(json)
        );
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

// =============================================================================
// Tests
// =============================================================================
