//! Markdown to HTML.

use crate::config::MarkdownConfig;
use crate::error::Result;

/// Renders documentation Markdown to HTML.
///
/// Fenced code must come out as `<pre><code class="language-…">` so the
/// re-extractor can find it, and headings must stay `<hN>` elements.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String>;
}

/// CommonMark renderer backed by `comrak`.
#[derive(Debug, Clone, Default)]
pub struct ComrakRenderer {
    config: MarkdownConfig,
}

impl ComrakRenderer {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        let mut options = comrak::Options::default();
        options.extension.table = self.config.tables;
        options.extension.strikethrough = self.config.strikethrough;
        options.extension.autolink = self.config.autolink;
        options.parse.smart = self.config.smart;
        // Doc comments are trusted input and may carry inline HTML
        options.render.unsafe_ = true;

        Ok(comrak::markdown_to_html(markdown, &options))
    }
}
