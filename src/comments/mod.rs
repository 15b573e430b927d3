//! Block comment handling: de-indentation, annotation parsing, and rendering
//! of the result as documentation text.

pub mod markdown;
pub mod normalize;
pub mod tags;

pub use markdown::render_comment;
pub use normalize::{common_indent, normalize_block, strip_markers};
pub use tags::{parse_comment, CommentData, Description, TagKind, TagRecord};

use crate::languages::Language;

/// Documentation produced from one buffered block comment.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDoc {
    pub text: String,
    pub annotations: Option<CommentData>,
}

/// Turns a buffered block comment into doc text.
///
/// Annotation parsing only runs for terminated comments in languages that
/// support it. A comment whose tags cannot be parsed is kept as its
/// de-indented text.
pub fn document_block(
    raw: &str,
    language: &Language,
    parse_annotations: bool,
    terminated: bool,
) -> BlockDoc {
    let Some((start, end)) = language.block_comment() else {
        return plain(raw.trim_end().to_string());
    };

    let text = normalize_block(raw, start, end, terminated);

    if !(terminated && parse_annotations && language.supports_annotations()) {
        return plain(text);
    }

    match parse_comment(&strip_markers(&text)) {
        Ok(data) => BlockDoc {
            text: render_comment(&data),
            annotations: Some(data),
        },
        Err(e) => {
            tracing::warn!("Falling back to plain {} comment: {}", language.name(), e);
            plain(text)
        }
    }
}

fn plain(mut text: String) -> BlockDoc {
    if !text.is_empty() {
        text.push('\n');
    }
    BlockDoc {
        text,
        annotations: None,
    }
}
