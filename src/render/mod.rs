//! HTML rendering: Markdown to HTML, syntax highlighting, and the pass that
//! pulls fenced code back out of rendered docs so it can be highlighted on its
//! own.

pub mod extract;
pub mod highlight;
pub mod markdown;

pub use extract::{extract, reinsert, CodeBlockPlaceholder};
pub use highlight::{Highlighter, PlainHighlighter, TreeSitterHighlighter};
pub use markdown::{ComrakRenderer, MarkdownRenderer};

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses the entity escaping Markdown renderers apply inside code blocks.
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
