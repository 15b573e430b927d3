//! Re-extraction of fenced code blocks from rendered documentation HTML.
//!
//! The Markdown renderer emits embedded examples as escaped `<pre><code>`
//! blocks. [`extract`] swaps each language-tagged block for a sentinel and
//! keeps the unescaped source; [`reinsert`] highlights the blocks in order and
//! puts them back, consuming every sentinel exactly once.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use super::highlight::Highlighter;
use super::{escape_html, unescape_html};

static LABELED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<pre><code class="language-([^"]+)">(.*?)</code></pre>"#).unwrap());

static UNLABELED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").unwrap());

// NUL never survives Markdown rendering, so it cannot appear around a sentinel
static SENTINEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x00litdoc-code:(\d+)\x00").unwrap());

/// A code block cut out of rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlockPlaceholder {
    pub id: usize,
    pub language: String,
    /// Unescaped source of the block.
    pub raw_code: String,
}

fn sentinel(id: usize) -> String {
    format!("\u{0}litdoc-code:{}\u{0}", id)
}

/// Replaces each language-tagged code block with a sentinel.
///
/// Blocks without a language are kept in place and wrapped in a
/// `<div class="highlight">` so they style like highlighted ones.
pub fn extract(html: &str) -> (String, Vec<CodeBlockPlaceholder>) {
    let mut placeholders = Vec::new();

    let stripped = LABELED_BLOCK.replace_all(html, |caps: &Captures| {
        let id = placeholders.len();
        placeholders.push(CodeBlockPlaceholder {
            id,
            language: unescape_html(&caps[1]),
            raw_code: unescape_html(&caps[2]),
        });
        sentinel(id)
    });

    let wrapped = UNLABELED_BLOCK.replace_all(&stripped, r#"<div class="highlight">$0</div>"#);

    (wrapped.into_owned(), placeholders)
}

/// Highlights every placeholder and substitutes it for its sentinel.
///
/// Blocks are highlighted one at a time in id order. A block the highlighter
/// rejects is inserted as escaped plain code.
pub fn reinsert(html: &str, placeholders: &[CodeBlockPlaceholder], highlighter: &dyn Highlighter) -> String {
    let mut rendered: HashMap<usize, String> = placeholders
        .iter()
        .map(|block| (block.id, render_block(block, highlighter)))
        .collect();

    SENTINEL
        .replace_all(html, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|id| rendered.remove(&id))
                .unwrap_or_default()
        })
        .into_owned()
}

fn render_block(block: &CodeBlockPlaceholder, highlighter: &dyn Highlighter) -> String {
    let body = match highlighter.highlight(&block.raw_code, &block.language) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Highlighting {} block {} failed: {}", block.language, block.id, e);
            escape_html(&block.raw_code)
        }
    };
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        escape_html(&block.language),
        body
    )
}
