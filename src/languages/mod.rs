pub mod profiles;

pub use profiles::{LanguageProfile, LiteralRule, ProfileKind, PROFILES};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

/// Interpreter name on a `#!` line, with or without `/usr/bin/env` in front.
static SHEBANG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#![ \t]*(?:\S*/)?(?:env[ \t]+(?:-\S+[ \t]+)*)?([^\s/]+)").unwrap()
});

/// A language profile with its comment lexemes compiled.
#[derive(Debug)]
pub struct Language {
    profile: &'static LanguageProfile,
    line_comment: Option<Regex>,
    block_start: Option<Regex>,
    block_end: Option<Regex>,
    ignore: Option<Regex>,
    literals: Vec<(Regex, char)>,
}

impl Language {
    pub fn compile(profile: &'static LanguageProfile) -> Result<Self, regex::Error> {
        let line_comment = profile
            .line_comment
            .map(|token| Regex::new(&format!(r"^\s*(?:{})\s?", token)))
            .transpose()?;

        let (block_start, block_end) = match profile.block_comment {
            Some((start, end)) => (Some(Regex::new(start)?), Some(Regex::new(end)?)),
            None => (None, None),
        };

        let ignore = profile.ignore.map(Regex::new).transpose()?;

        let literals = profile
            .literals
            .iter()
            .map(|rule| Regex::new(rule.pattern).map(|re| (re, rule.blank)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            profile,
            line_comment,
            block_start,
            block_end,
            ignore,
            literals,
        })
    }

    pub fn name(&self) -> &'static str {
        self.profile.name
    }

    pub fn kind(&self) -> ProfileKind {
        self.profile.kind
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        self.profile
    }

    pub fn supports_annotations(&self) -> bool {
        self.profile.annotations
    }

    pub fn line_comment(&self) -> Option<&Regex> {
        self.line_comment.as_ref()
    }

    /// Opener and closer, present only when both are defined.
    pub fn block_comment(&self) -> Option<(&Regex, &Regex)> {
        self.block_start.as_ref().zip(self.block_end.as_ref())
    }

    pub fn ignore(&self) -> Option<&Regex> {
        self.ignore.as_ref()
    }

    pub fn literals(&self) -> &[(Regex, char)] {
        &self.literals
    }

    pub fn is_ignored(&self, line: &str) -> bool {
        self.ignore.as_ref().is_some_and(|re| re.is_match(line))
    }
}

pub struct LanguageRegistry {
    languages: HashMap<&'static str, Arc<Language>>,
    extension_map: HashMap<String, &'static str>,
    filename_map: HashMap<String, &'static str>,
    executable_map: HashMap<String, &'static str>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            filename_map: HashMap::new(),
            executable_map: HashMap::new(),
        };

        for profile in PROFILES {
            match Language::compile(profile) {
                Ok(language) => registry.register(Arc::new(language)),
                Err(e) => tracing::error!("Invalid comment pattern for {}: {}", profile.name, e),
            }
        }

        registry
    }

    pub fn register(&mut self, language: Arc<Language>) {
        let profile = language.profile();
        for ext in profile.extensions {
            self.extension_map.insert(ext.to_lowercase(), profile.name);
        }
        for filename in profile.filenames {
            self.filename_map.insert(filename.to_string(), profile.name);
        }
        for exe in profile.executables {
            self.executable_map.insert(exe.to_string(), profile.name);
        }
        self.languages.insert(profile.name, language);
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<Language>> {
        self.languages.get(name).cloned()
    }

    /// Case-insensitive extension lookup, without the leading dot.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<Language>> {
        self.extension_map
            .get(&ext.to_lowercase())
            .and_then(|name| self.get_by_name(name))
    }

    pub fn get_by_filename(&self, filename: &str) -> Option<Arc<Language>> {
        self.filename_map
            .get(filename)
            .and_then(|name| self.get_by_name(name))
    }

    /// Resolves the interpreter named on the shebang line of `contents`.
    ///
    /// Versioned interpreters (`python3`, `python3.12`) fall back to their
    /// unversioned name.
    pub fn get_by_shebang(&self, contents: &str) -> Option<Arc<Language>> {
        let exe = shebang_executable(contents)?;
        if let Some(name) = self.executable_map.get(exe) {
            return self.get_by_name(name);
        }
        let unversioned = exe.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
        self.executable_map
            .get(unversioned)
            .and_then(|name| self.get_by_name(name))
    }

    /// Extension first, then exact file name, then shebang.
    ///
    /// `None` means the file is not documented; callers skip it silently.
    pub fn resolve(&self, path: &Path, contents: &str) -> Option<Arc<Language>> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_by_extension(ext))
            .or_else(|| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| self.get_by_filename(name))
            })
            .or_else(|| self.get_by_shebang(contents))
    }

    pub fn supported_extensions(&self) -> Vec<&str> {
        self.extension_map.keys().map(|s| s.as_str()).collect()
    }

    pub fn supported_languages(&self) -> Vec<&str> {
        self.languages.keys().copied().collect()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Executable name from the first non-empty line, if it is a shebang.
pub fn shebang_executable(contents: &str) -> Option<&str> {
    let first = contents
        .trim_start_matches(['\n', '\r'])
        .lines()
        .next()?;
    SHEBANG
        .captures(first)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
