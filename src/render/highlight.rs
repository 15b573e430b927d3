//! Syntax highlighting of code sections and embedded examples.

use std::cell::RefCell;

use tree_sitter::{Node, Parser, Tree};

use super::escape_html;
use crate::error::{DocError, Result};
use crate::REGISTRY;

/// Turns source text into highlighted HTML.
///
/// Implementations must be stateless from the caller's point of view: the
/// same input always yields the same markup.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, language: &str) -> Result<String>;
}

/// Escapes code without adding any markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> Result<String> {
        Ok(escape_html(code))
    }
}

thread_local! {
    // One parser per worker thread, re-pointed at each call's grammar
    static PARSER: RefCell<Parser> = RefCell::new(Parser::new());
}

/// Highlights with tree-sitter grammars, emitting Pygments-style span classes.
///
/// Languages without a grammar are escaped as plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterHighlighter;

impl TreeSitterHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Whether `language` (a profile name or file extension) has a grammar.
    pub fn supports(&self, language: &str) -> bool {
        grammar_for(language).is_some()
    }

    fn parse(&self, code: &str, grammar: &tree_sitter::Language) -> Result<Tree> {
        PARSER.with(|parser| {
            let mut parser = parser.borrow_mut();
            parser
                .set_language(grammar)
                .map_err(|e| DocError::Highlight(e.to_string()))?;
            parser
                .parse(code, None)
                .ok_or_else(|| DocError::Highlight("Parser produced no tree".to_string()))
        })
    }
}

impl Highlighter for TreeSitterHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String> {
        let Some(grammar) = grammar_for(language) else {
            tracing::debug!("No grammar for {}, escaping only", language);
            return Ok(escape_html(code));
        };

        let tree = self.parse(code, &grammar)?;
        Ok(render_tree(&tree, code))
    }
}

fn grammar_for(language: &str) -> Option<tree_sitter::Language> {
    let canonical = REGISTRY
        .get_by_name(language)
        .or_else(|| REGISTRY.get_by_extension(language))
        .map(|l| l.name())
        .unwrap_or(language);

    let grammar = match canonical {
        "rust" => tree_sitter_rust::LANGUAGE,
        "javascript" | "typescript" => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
        "python" => tree_sitter_python::LANGUAGE,
        "go" => tree_sitter_go::LANGUAGE,
        "java" => tree_sitter_java::LANGUAGE,
        "kotlin" => tree_sitter_kotlin_ng::LANGUAGE,
        "c" | "cpp" => tree_sitter_cpp::LANGUAGE,
        "csharp" => tree_sitter_c_sharp::LANGUAGE,
        "swift" => tree_sitter_swift::LANGUAGE,
        "sh" => tree_sitter_bash::LANGUAGE,
        "lua" => tree_sitter_lua::LANGUAGE,
        "haskell" => tree_sitter_haskell::LANGUAGE,
        "elixir" => tree_sitter_elixir::LANGUAGE,
        "sql" => tree_sitter_sequel::LANGUAGE,
        "yaml" => tree_sitter_yaml::LANGUAGE,
        "toml" => tree_sitter_toml_ng::LANGUAGE,
        _ => return None,
    };
    Some(grammar.into())
}

/// Walks the leaves of `tree` in source order. Strings and comments are
/// emitted whole; text between tokens is copied through escaped.
fn render_tree(tree: &Tree, source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let mut pos = 0;
    let mut cursor = tree.walk();

    'walk: loop {
        let node = cursor.node();
        if node.child_count() == 0 || is_atomic(node.kind()) {
            emit(&mut out, source, &mut pos, node);
        } else if cursor.goto_first_child() {
            continue;
        }

        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    out.push_str(&escape_html(source.get(pos..).unwrap_or("")));
    out
}

fn emit(out: &mut String, source: &str, pos: &mut usize, node: Node) {
    let (start, end) = (node.start_byte(), node.end_byte());
    if start < *pos || end <= start {
        return;
    }
    let (Some(gap), Some(text)) = (source.get(*pos..start), source.get(start..end)) else {
        return;
    };

    out.push_str(&escape_html(gap));
    match classify(node, text) {
        Some(class) => {
            out.push_str(&format!(r#"<span class="{}">"#, class));
            out.push_str(&escape_html(text));
            out.push_str("</span>");
        }
        None => out.push_str(&escape_html(text)),
    }
    *pos = end;
}

fn is_atomic(kind: &str) -> bool {
    kind.contains("comment") || kind.contains("string") || kind == "char_literal"
}

fn classify(node: Node, text: &str) -> Option<&'static str> {
    let kind = node.kind();

    if kind.contains("comment") {
        return Some("c");
    }
    if kind.contains("string") || kind == "char_literal" {
        return Some("s");
    }
    if kind.contains("number") || kind.contains("integer") || kind.contains("float") {
        return Some("m");
    }
    if node.is_named() {
        if kind == "true" || kind == "false" || kind == "null" || kind == "nil" {
            return Some("k");
        }
        if kind.contains("identifier") {
            return Some("n");
        }
        return None;
    }
    if text.chars().all(|c| c.is_alphanumeric() || c == '_') {
        Some("k")
    } else {
        Some("p")
    }
}
