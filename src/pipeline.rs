//! Per-file documentation pipeline.
//!
//! `resolve -> segment -> render docs -> re-extract embedded code -> highlight`.
//! Every failure is scoped to the file being processed; a batch always
//! yields one outcome per input.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::error::{DocError, Result};
use crate::languages::{Language, ProfileKind};
use crate::render::{
    extract, reinsert, ComrakRenderer, Highlighter, MarkdownRenderer,
    PlainHighlighter, TreeSitterHighlighter,
};
use crate::segment::{Section, Segmenter};
use crate::REGISTRY;

/// A section with its doc and code rendered to HTML.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSection {
    #[serde(flatten)]
    pub section: Section,
    pub doc_html: String,
    pub code_html: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentedFile {
    Code {
        path: PathBuf,
        language: String,
        sections: Vec<RenderedSection>,
    },
    Markdown {
        path: PathBuf,
        html: String,
    },
}

impl DocumentedFile {
    pub fn path(&self) -> &Path {
        match self {
            Self::Code { path, .. } | Self::Markdown { path, .. } => path,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of documenting one file in a batch.
#[derive(Debug)]
pub enum FileOutcome {
    Documented(DocumentedFile),
    /// No language profile matched.
    Skipped { path: PathBuf },
    Failed { path: PathBuf, error: DocError },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Documented(file) => file.path(),
            Self::Skipped { path } | Self::Failed { path, .. } => path,
        }
    }
}

pub struct DocGenerator {
    renderer: Box<dyn MarkdownRenderer>,
    highlighter: Box<dyn Highlighter>,
    annotations: bool,
}

impl DocGenerator {
    pub fn new(config: &Config) -> Self {
        let highlighter: Box<dyn Highlighter> = if config.highlight.enabled {
            Box::new(TreeSitterHighlighter::new())
        } else {
            Box::new(PlainHighlighter)
        };

        Self {
            renderer: Box::new(ComrakRenderer::new(config.markdown.clone())),
            highlighter,
            annotations: config.annotations.enabled,
        }
    }

    /// Uses custom rendering and highlighting collaborators.
    pub fn with_collaborators(
        renderer: Box<dyn MarkdownRenderer>,
        highlighter: Box<dyn Highlighter>,
    ) -> Self {
        Self {
            renderer,
            highlighter,
            annotations: true,
        }
    }

    pub fn with_annotations(mut self, enabled: bool) -> Self {
        self.annotations = enabled;
        self
    }

    /// Documents one file. Returns `Ok(None)` when no language matches.
    pub fn document(&self, path: &Path, contents: &str) -> Result<Option<DocumentedFile>> {
        let Some(language) = REGISTRY.resolve(path, contents) else {
            tracing::debug!("Skipping {}: no language profile", path.display());
            return Ok(None);
        };

        let file = match language.kind() {
            ProfileKind::Markdown => DocumentedFile::Markdown {
                path: path.to_path_buf(),
                html: self.render_docs(contents)?,
            },
            ProfileKind::Code => DocumentedFile::Code {
                path: path.to_path_buf(),
                language: language.name().to_string(),
                sections: self.document_code(path, contents, &language)?,
            },
        };
        Ok(Some(file))
    }

    /// Segments a code file without rendering it.
    pub fn sections(&self, path: &Path, contents: &str) -> Result<(Arc<Language>, Vec<Section>)> {
        let language = REGISTRY
            .resolve(path, contents)
            .filter(|language| language.kind() == ProfileKind::Code)
            .ok_or_else(|| DocError::UnsupportedLanguage(path.display().to_string()))?;

        let sections = Segmenter::new(&language)
            .with_annotations(self.annotations)
            .segment(contents);
        Ok((language, sections))
    }

    /// Reads and documents a file from disk.
    pub fn document_path(&self, path: &Path) -> Result<Option<DocumentedFile>> {
        let contents = std::fs::read_to_string(path)?;
        self.document(path, &contents)
    }

    /// Documents every file in parallel; outcomes follow input order.
    pub fn document_all(&self, paths: &[PathBuf]) -> Vec<FileOutcome> {
        paths
            .par_iter()
            .map(|path| match self.document_path(path) {
                Ok(Some(file)) => FileOutcome::Documented(file),
                Ok(None) => FileOutcome::Skipped { path: path.clone() },
                Err(error) => {
                    tracing::error!("Failed to document {}: {}", path.display(), error);
                    FileOutcome::Failed {
                        path: path.clone(),
                        error,
                    }
                }
            })
            .collect()
    }

    fn document_code(
        &self,
        path: &Path,
        contents: &str,
        language: &Language,
    ) -> Result<Vec<RenderedSection>> {
        let sections = Segmenter::new(language)
            .with_annotations(self.annotations)
            .segment(contents);
        tracing::debug!("{}: {} sections", path.display(), sections.len());

        sections
            .into_iter()
            .map(|section| {
                let doc_html = self.render_docs(&section.doc_text)?;
                let code = self.highlighter.highlight(&section.code_text, language.name())?;
                Ok(RenderedSection {
                    section,
                    doc_html,
                    code_html: wrap_code(&code),
                })
            })
            .collect()
    }

    fn render_docs(&self, markdown: &str) -> Result<String> {
        let html = self.renderer.render(markdown)?;
        let (stripped, blocks) = extract(&html);
        Ok(reinsert(&stripped, &blocks, self.highlighter.as_ref()))
    }
}

impl Default for DocGenerator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn wrap_code(html: &str) -> String {
    format!(r#"<div class="highlight"><pre>{}</pre></div>"#, html)
}
