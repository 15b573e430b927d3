//! Source-to-sections segmentation.
//!
//! A file is read line by line through a two-state automaton driven entirely
//! by the file's [`Language`]:
//!
//! - `Code`: a block-comment opener starts a buffered comment, a whole-line
//!   comment adds doc text, anything else not ignored adds code text.
//! - `InBlockComment`: lines are buffered until one matches the closer; the
//!   buffer is then turned into doc text by [`crate::comments`].
//!
//! Comment lexemes are matched against the masked line (see [`mask`]) so that
//! string contents never open or close a comment.

pub mod mask;

pub use mask::mask_line;

use serde::Serialize;

use crate::comments::{document_block, CommentData};
use crate::languages::Language;

/// Documentation prose paired with the code it precedes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    pub doc_text: String,
    pub code_text: String,
    /// 1-based source line of the first code line, if the section has code.
    pub first_code_line: Option<usize>,
    /// Parsed annotation comments that contributed to `doc_text`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<CommentData>,
}

impl Section {
    /// No visible doc or code and no annotations.
    pub fn is_blank(&self) -> bool {
        self.doc_text.trim().is_empty()
            && self.code_text.trim().is_empty()
            && self.annotations.is_empty()
    }
}

#[derive(Debug)]
enum State {
    Code,
    InBlockComment { buffer: String, closer: Closer },
}

/// What may end an open block comment.
#[derive(Debug)]
enum Closer {
    /// Any match of the language's closer pattern.
    Any,
    /// Only the lexeme that opened the block. Used when the opener also
    /// matches the closer pattern, as with Python's `"""` and `'''`.
    Same(String),
}

/// Splits a file into sections.
pub struct Segmenter<'a> {
    language: &'a Language,
    parse_annotations: bool,
    sections: Vec<Section>,
    current: Section,
    state: State,
}

impl<'a> Segmenter<'a> {
    pub fn new(language: &'a Language) -> Self {
        Self {
            language,
            parse_annotations: true,
            sections: Vec::new(),
            current: Section::default(),
            state: State::Code,
        }
    }

    /// Whether block comments in annotation-aware languages are parsed for
    /// `@tags`. On by default.
    pub fn with_annotations(mut self, enabled: bool) -> Self {
        self.parse_annotations = enabled;
        self
    }

    pub fn segment(mut self, source: &str) -> Vec<Section> {
        for (index, line) in source.split_inclusive('\n').enumerate() {
            let line = line.strip_suffix('\n').unwrap_or(line);
            self.feed(index, line);
        }
        self.finish()
    }

    fn feed(&mut self, index: usize, line: &str) {
        match std::mem::replace(&mut self.state, State::Code) {
            State::InBlockComment { mut buffer, closer } => {
                buffer.push_str(line);
                buffer.push('\n');

                if self.closes(&closer, line) {
                    self.close_block(&buffer, true);
                } else {
                    self.state = State::InBlockComment { buffer, closer };
                }
            }
            State::Code => self.feed_code(index, line),
        }
    }

    fn feed_code(&mut self, index: usize, line: &str) {
        let masked = mask_line(line, self.language.literals());

        if let Some(closer) = self.opens_block(&masked) {
            self.flush();
            let mut buffer = String::with_capacity(line.len() + 1);
            buffer.push_str(line);
            buffer.push('\n');
            self.state = State::InBlockComment { buffer, closer };
            return;
        }

        if let Some(comment) = self.language.line_comment() {
            let is_shebang = index == 0 && masked.starts_with("#!");
            if let Some(m) = comment.find(&masked) {
                if !is_shebang && !self.language.is_ignored(&masked) {
                    self.flush();
                    self.current.doc_text.push_str(line.get(m.end()..).unwrap_or(""));
                    self.current.doc_text.push('\n');
                    return;
                }
            }
        }

        if !self.language.is_ignored(&masked) {
            self.current.code_text.push_str(line);
            self.current.code_text.push('\n');
            if self.current.first_code_line.is_none() {
                self.current.first_code_line = Some(index + 1);
            }
        }
    }

    /// A real block opener: the closer does not follow on the same line, and
    /// the opener is not itself inside a line comment.
    fn opens_block(&self, masked: &str) -> Option<Closer> {
        let (start, end) = self.language.block_comment()?;
        let m = start.find(masked)?;

        let opener = m.as_str().trim();
        let closer = if end.is_match(opener) {
            Closer::Same(opener.to_string())
        } else {
            Closer::Any
        };

        let before = &masked[..m.start()];
        let remainder = format!("{}{}", before, &masked[m.end()..]);
        if self.closes(&closer, &remainder) {
            return None;
        }

        let in_line_comment = self
            .language
            .line_comment()
            .is_some_and(|comment| comment.is_match(before));
        (!in_line_comment).then_some(closer)
    }

    fn closes(&self, closer: &Closer, text: &str) -> bool {
        let Some((_, end)) = self.language.block_comment() else {
            return false;
        };
        match closer {
            Closer::Any => end.is_match(text),
            Closer::Same(lexeme) => end.find_iter(text).any(|m| m.as_str().trim() == lexeme),
        }
    }

    fn close_block(&mut self, buffer: &str, terminated: bool) {
        let doc = document_block(buffer, self.language, self.parse_annotations, terminated);
        self.current.doc_text.push_str(&doc.text);
        if let Some(data) = doc.annotations {
            self.current.annotations.push(data);
        }
    }

    /// Closes the current section before new doc text, if it already has code.
    ///
    /// A fully blank section is not emitted; its blank code lines stay in the
    /// current section so code still round-trips.
    fn flush(&mut self) {
        if self.current.code_text.is_empty() || self.current.is_blank() {
            return;
        }
        self.sections.push(std::mem::take(&mut self.current));
    }

    fn finish(mut self) -> Vec<Section> {
        if let State::InBlockComment { buffer, .. } = std::mem::replace(&mut self.state, State::Code) {
            self.close_block(&buffer, false);
        }

        if self.current.is_blank() {
            self.current = Section::default();
        }
        self.sections.push(self.current);

        tracing::debug!(
            "Segmented {} source into {} sections",
            self.language.name(),
            self.sections.len()
        );
        self.sections
    }
}

/// Segments `source` with annotation parsing enabled.
pub fn segment(source: &str, language: &Language) -> Vec<Section> {
    Segmenter::new(language).segment(source)
}
