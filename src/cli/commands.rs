use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use litdoc::config::Config;
use litdoc::pipeline::{DocGenerator, DocumentedFile, FileOutcome};
use litdoc::REGISTRY;

#[derive(Parser)]
#[command(name = "litdoc")]
#[command(about = "Literate documentation: split source files into doc/code sections")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Show how a file is split into sections
    litdoc sections src/app.js

    # Render several files to JSON
    litdoc render src/app.js src/util.py README.md

    # Render without syntax highlighting
    litdoc --no-highlight render lib/*.rb

    # List supported languages
    litdoc languages
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a litdoc.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Escape code instead of highlighting it
    #[arg(long, global = true)]
    pub no_highlight: bool,

    /// Treat @tags in block comments as plain text
    #[arg(long, global = true)]
    pub no_annotations: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the raw sections of a source file
    Sections {
        /// Source file
        file: PathBuf,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Render files to documentation HTML fragments (JSON on stdout)
    Render {
        /// Files to document
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write one <file>.json per input into this directory instead of stdout,
        /// keeping each input's path below the directory all inputs share
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List supported languages
    Languages,
}

/// Builds the effective config: file first, then flag overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    if cli.no_highlight {
        config.highlight.enabled = false;
    }
    if cli.no_annotations {
        config.annotations.enabled = false;
    }
    Ok(config)
}

pub fn show_sections(file: &Path, format: &str, config: &Config) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let (language, sections) = DocGenerator::new(config).sections(file, &contents)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    println!("{} ({}), {} sections", file.display(), language.name(), sections.len());
    for (i, section) in sections.iter().enumerate() {
        match section.first_code_line {
            Some(line) => println!("\n=== section {} (code from line {}) ===", i + 1, line),
            None => println!("\n=== section {} ===", i + 1),
        }
        if !section.doc_text.is_empty() {
            println!("--- doc ---");
            print!("{}", section.doc_text);
        }
        if !section.code_text.is_empty() {
            println!("--- code ---");
            print!("{}", section.code_text);
        }
        for data in &section.annotations {
            let tags: Vec<&str> = data.tags.iter().map(|t| t.kind.as_str()).collect();
            println!("--- tags: {} ---", tags.join(", "));
        }
    }

    Ok(())
}

pub fn render_files(files: &[PathBuf], output: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    let generator = DocGenerator::new(config);
    let outcomes = generator.document_all(files);

    let mut documented: Vec<DocumentedFile> = Vec::new();
    let mut skipped = 0;
    let mut failed = 0;

    for outcome in outcomes {
        match outcome {
            FileOutcome::Documented(file) => documented.push(file),
            FileOutcome::Skipped { path } => {
                eprintln!("Skipped {}: unsupported language", path.display());
                skipped += 1;
            }
            FileOutcome::Failed { path, error } => {
                eprintln!("Error documenting {}: {}", path.display(), error);
                failed += 1;
            }
        }
    }

    match output {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            for (file, target) in documented.iter().zip(output_targets(dir, &documented)) {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                std::fs::write(&target, file.to_json()?)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
            }
            eprintln!(
                "Documented {} files into {} ({} skipped, {} failed)",
                documented.len(),
                dir.display(),
                skipped,
                failed
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&documented)?),
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}

/// `<dir>/<path relative to the shared parent>.json` for each file, so inputs
/// with the same basename in different directories get distinct outputs.
fn output_targets(dir: &Path, files: &[DocumentedFile]) -> Vec<PathBuf> {
    let absolute: Vec<PathBuf> = files
        .iter()
        .map(|file| {
            file.path()
                .canonicalize()
                .unwrap_or_else(|_| file.path().to_path_buf())
        })
        .collect();
    let root = common_parent(&absolute);

    absolute
        .iter()
        .map(|path| {
            let relative: PathBuf = path
                .strip_prefix(&root)
                .unwrap_or(path)
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect();
            let mut name = relative.into_os_string();
            name.push(".json");
            dir.join(name)
        })
        .collect()
}

fn common_parent(paths: &[PathBuf]) -> PathBuf {
    let mut parents = paths.iter().filter_map(|path| path.parent());
    let Some(first) = parents.next() else {
        return PathBuf::new();
    };
    parents.fold(first.to_path_buf(), |root, parent| {
        root.components()
            .zip(parent.components())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a)
            .collect()
    })
}

pub fn list_languages() -> anyhow::Result<()> {
    let mut names = REGISTRY.supported_languages();
    names.sort_unstable();

    for name in names {
        let Some(language) = REGISTRY.get_by_name(name) else {
            continue;
        };
        let profile = language.profile();
        let mut matchers: Vec<String> = profile.extensions.iter().map(|e| format!(".{}", e)).collect();
        matchers.extend(profile.filenames.iter().map(|f| f.to_string()));
        let tags = if language.supports_annotations() { " [@tags]" } else { "" };
        println!("{:<14} {}{}", name, matchers.join(" "), tags);
    }

    Ok(())
}
