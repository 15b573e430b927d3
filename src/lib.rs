pub mod comments;
pub mod config;
pub mod error;
pub mod languages;
pub mod pipeline;
pub mod render;
pub mod segment;

use once_cell::sync::Lazy;

pub use comments::{parse_comment, CommentData, Description, TagKind, TagRecord};
pub use config::Config;
pub use error::{DocError, Result};
pub use languages::{Language, LanguageProfile, LanguageRegistry, ProfileKind};
pub use pipeline::{DocGenerator, DocumentedFile, FileOutcome, RenderedSection};
pub use render::{
    extract, reinsert, CodeBlockPlaceholder, ComrakRenderer, Highlighter, MarkdownRenderer,
    PlainHighlighter, TreeSitterHighlighter,
};
pub use segment::{mask_line, segment, Section, Segmenter};

/// Global language registry instance (lazily initialized)
pub static REGISTRY: Lazy<LanguageRegistry> = Lazy::new(LanguageRegistry::new);
