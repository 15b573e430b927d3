//! `litdoc.toml` configuration.
//!
//! Every key is optional; missing sections fall back to the defaults below.
//!
//! ```toml
//! [markdown]
//! tables = true
//! smart = false
//!
//! [highlight]
//! enabled = true
//!
//! [annotations]
//! enabled = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markdown: MarkdownConfig,
    pub highlight: HighlightConfig,
    pub annotations: AnnotationConfig,
}

/// Markdown extensions used for doc text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    /// Typographic quotes and dashes.
    pub smart: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            smart: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// When false code is only HTML-escaped.
    pub enabled: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Parse `@tags` in block comments of languages that use them.
    pub enabled: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
