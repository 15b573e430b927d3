//! Annotation tag parsing.
//!
//! A structured comment is a free-form description followed by `@tag` lines:
//!
//! ```text
//! Adds two numbers.
//!
//! Longer explanation.
//!
//! @param {number} a First operand
//! @param {number} b Second operand
//! @return {number} The sum
//! ```
//!
//! Parsing is best effort. Unknown tags are kept as [`TagKind::Unknown`] and a
//! malformed `{type}` degrades to plain description text.

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{DocError, Result};

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n\s*").unwrap());
static TYPE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r" *[|,/] *").unwrap());

const VISIBILITY_WORDS: &[&str] = &["public", "private", "protected"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Param,
    Return,
    Type,
    Api,
    See,
    Unknown,
}

impl TagKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Param => "param",
            TagKind::Return => "return",
            TagKind::Type => "type",
            TagKind::Api => "api",
            TagKind::See => "see",
            TagKind::Unknown => "unknown",
        }
    }
}

/// One `@tag` line. Only the fields relevant to `kind` are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub kind: TagKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTML-escaped type names, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

impl TagRecord {
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            name: None,
            types: Vec::new(),
            description: None,
            visibility: None,
            title: None,
            url: None,
            local: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Description {
    /// First paragraph.
    pub summary: String,
    /// Remaining paragraphs separated by blank lines.
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub description: Description,
    pub tags: Vec<TagRecord>,
}

/// Parses a de-indented, marker-stripped comment body.
///
/// Fails only when a tag is structurally unusable (`@type` followed by
/// something other than a `{type}`); callers fall back to the plain text.
pub fn parse_comment(text: &str) -> Result<CommentData> {
    let text = text.trim_end();
    let mut data = CommentData::default();

    // All tags only when `@` is the very first character; indented `@` is prose.
    let starts_with_tag = text.starts_with('@');
    if !starts_with_tag {
        let full = text.split("\n@").next().unwrap_or("");
        let mut paragraphs = PARAGRAPH_BREAK.split(full);
        data.description.summary = paragraphs.next().unwrap_or("").trim().to_string();
        data.description.body = paragraphs
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    let tagged = format!("\n{}", text);
    for block in tagged.split("\n@").skip(1) {
        data.tags.push(parse_tag(block)?);
    }

    Ok(data)
}

fn parse_tag(block: &str) -> Result<TagRecord> {
    let mut tokens: VecDeque<String> = block.split_whitespace().map(str::to_string).collect();
    let keyword = tokens.pop_front().unwrap_or_default();

    let tag = match keyword.as_str() {
        "param" | "arg" | "argument" => {
            let mut tag = TagRecord::new(TagKind::Param);
            tag.types = grab_types(&mut tokens);
            tag.name = Some(tokens.pop_front().unwrap_or_default());
            tag.description = Some(join(tokens));
            tag
        }
        "return" | "returns" => {
            let mut tag = TagRecord::new(TagKind::Return);
            tag.types = grab_types(&mut tokens);
            tag.description = Some(join(tokens));
            tag
        }
        "type" => {
            let mut tag = TagRecord::new(TagKind::Type);
            if let Some(first) = tokens.front() {
                if !first.starts_with('{') {
                    return Err(DocError::Annotation(format!(
                        "@type expects a {{type}}, found `{}`",
                        first
                    )));
                }
            }
            tag.types = grab_types(&mut tokens);
            tag.description = Some(join(tokens));
            tag
        }
        "access" | "api" => {
            let mut tag = TagRecord::new(TagKind::Api);
            tag.visibility = Some(tokens.pop_front().unwrap_or_default());
            tag
        }
        word if VISIBILITY_WORDS.contains(&word) => {
            let mut tag = TagRecord::new(TagKind::Api);
            tag.visibility = Some(word.to_string());
            tag
        }
        "see" => {
            let mut tag = TagRecord::new(TagKind::See);
            match tokens.iter().position(|t| looks_like_url(t)) {
                Some(idx) => {
                    let rest = tokens.split_off(idx);
                    tag.title = Some(join(tokens));
                    tag.url = Some(join(rest));
                }
                None => tag.local = Some(join(tokens)),
            }
            tag
        }
        _ => {
            let mut tag = TagRecord::new(TagKind::Unknown);
            tag.types = grab_types(&mut tokens);
            tag.name = Some(keyword.clone());
            tag.description = Some(join(tokens));
            tag
        }
    };

    Ok(tag)
}

/// Consumes a leading `{...}` type expression, which may span several tokens.
///
/// Text glued to the closing brace (`{string}name`) goes back on the stream.
/// Without a closing brace nothing is consumed.
fn grab_types(tokens: &mut VecDeque<String>) -> Vec<String> {
    if !tokens.front().is_some_and(|t| t.starts_with('{')) {
        return Vec::new();
    }

    let mut consumed = Vec::new();
    let mut raw = String::new();
    while let Some(token) = tokens.pop_front() {
        raw.push_str(&token);
        consumed.push(token);
        if raw.contains('}') {
            break;
        }
    }

    let Some(close) = raw.find('}') else {
        for token in consumed.into_iter().rev() {
            tokens.push_front(token);
        }
        return Vec::new();
    };

    let leftover = &raw[close + 1..];
    if !leftover.is_empty() {
        tokens.push_front(leftover.to_string());
    }

    let inner = raw[..close].replace(['{', '}'], "");
    TYPE_SEPARATOR
        .split(inner.trim())
        .filter(|name| !name.is_empty())
        .map(escape_type)
        .collect()
}

fn escape_type(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            _ => out.push(c),
        }
    }
    out
}

fn looks_like_url(token: &str) -> bool {
    token.contains("://") || token.starts_with("www.")
}

fn join(tokens: VecDeque<String>) -> String {
    Vec::from(tokens).join(" ")
}
