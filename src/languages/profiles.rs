//! Built-in language profiles.
//!
//! Every supported language is one record in [`PROFILES`]. Comment lexemes are
//! stored as regex fragments and compiled once by the registry, so adding a
//! language never touches the segmentation code.

/// How a resolved file is documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Source code, split into documentation/code sections.
    Code,
    /// Prose rendered as a whole page.
    Markdown,
}

/// A language-specific quoting construct blanked out before generic masking.
///
/// Capture group 1 of `pattern` is overwritten with `blank`.
#[derive(Debug, Clone, Copy)]
pub struct LiteralRule {
    pub pattern: &'static str,
    pub blank: char,
}

#[derive(Debug)]
pub struct LanguageProfile {
    pub name: &'static str,
    pub kind: ProfileKind,
    /// Lowercase extensions without the dot.
    pub extensions: &'static [&'static str],
    /// Exact file names for extensionless conventions (`Makefile`).
    pub filenames: &'static [&'static str],
    /// Interpreter names recognised on a shebang line.
    pub executables: &'static [&'static str],
    /// Regex fragment for the line-comment token.
    pub line_comment: Option<&'static str>,
    /// Regexes for the block-comment opener and closer.
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Lines matching this are dropped entirely.
    pub ignore: Option<&'static str>,
    /// Block comments carry `@tag` annotations.
    pub annotations: bool,
    pub literals: &'static [LiteralRule],
}

const C_BLOCK: Option<(&str, &str)> = Some((r"/\*", r"\*/"));

const REGEX_LITERAL: LiteralRule = LiteralRule {
    pattern: r"(?:^|[=(,:;!&|?{}\[\]]|return)\s*/((?:[^*/\\\n]|\\.)(?:[^/\\\n]|\\.)*)/",
    blank: '.',
};

const fn code(name: &'static str) -> LanguageProfile {
    LanguageProfile {
        name,
        kind: ProfileKind::Code,
        extensions: &[],
        filenames: &[],
        executables: &[],
        line_comment: None,
        block_comment: None,
        ignore: None,
        annotations: false,
        literals: &[],
    }
}

pub static PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        extensions: &["js", "mjs", "cjs", "jsx"],
        executables: &["node", "nodejs"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        ignore: Some(r"^\s*//="),
        annotations: true,
        literals: &[REGEX_LITERAL],
        ..code("javascript")
    },
    LanguageProfile {
        extensions: &["ts", "tsx", "mts", "cts"],
        executables: &["ts-node", "deno"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        literals: &[REGEX_LITERAL],
        ..code("typescript")
    },
    LanguageProfile {
        extensions: &["coffee"],
        filenames: &["Cakefile", "cakefile"],
        executables: &["coffee"],
        line_comment: Some("#"),
        block_comment: Some((r"^\s*#{3}", r"#{3}\s*$")),
        annotations: true,
        literals: &[REGEX_LITERAL],
        ..code("coffeescript")
    },
    LanguageProfile {
        extensions: &["rb", "rbw", "rake", "gemspec"],
        filenames: &["Rakefile", "rakefile", "Gemfile", "Guardfile"],
        executables: &["ruby"],
        line_comment: Some("#"),
        block_comment: Some((r"^=begin", r"^=end")),
        ..code("ruby")
    },
    LanguageProfile {
        extensions: &["py", "pyw", "pyi"],
        filenames: &["SConstruct", "SConscript"],
        executables: &["python", "pypy"],
        line_comment: Some("#"),
        block_comment: Some((r#""""|'''"#, r#""""|'''"#)),
        ..code("python")
    },
    LanguageProfile {
        extensions: &["pl", "pm"],
        executables: &["perl"],
        line_comment: Some("#"),
        block_comment: Some((r"^=\w+", r"^=cut")),
        ..code("perl")
    },
    LanguageProfile {
        extensions: &["c", "h"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("c")
    },
    LanguageProfile {
        extensions: &["cc", "cpp", "cxx", "hpp", "hh", "hxx"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("cpp")
    },
    LanguageProfile {
        extensions: &["cs"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("csharp")
    },
    LanguageProfile {
        extensions: &["java"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("java")
    },
    LanguageProfile {
        extensions: &["go"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("go")
    },
    LanguageProfile {
        extensions: &["rs"],
        line_comment: Some("//[/!]?"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("rust")
    },
    LanguageProfile {
        extensions: &["php", "php3", "php4", "php5"],
        executables: &["php"],
        line_comment: Some("(?://|#)"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("php")
    },
    LanguageProfile {
        extensions: &["as"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("actionscript")
    },
    LanguageProfile {
        extensions: &["groovy", "gradle"],
        executables: &["groovy"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("groovy")
    },
    LanguageProfile {
        extensions: &["scala", "sc"],
        executables: &["scala"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("scala")
    },
    LanguageProfile {
        extensions: &["swift"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("swift")
    },
    LanguageProfile {
        extensions: &["kt", "kts"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        annotations: true,
        ..code("kotlin")
    },
    LanguageProfile {
        extensions: &["lua"],
        executables: &["lua", "luajit"],
        line_comment: Some("--"),
        block_comment: Some((r"--\[\[", r"\]\]")),
        ..code("lua")
    },
    LanguageProfile {
        extensions: &["hs", "lhs"],
        executables: &["runhaskell", "runghc"],
        line_comment: Some("--"),
        block_comment: Some((r"\{-", r"-\}")),
        ..code("haskell")
    },
    LanguageProfile {
        extensions: &["ex", "exs"],
        executables: &["elixir"],
        line_comment: Some("#"),
        ..code("elixir")
    },
    LanguageProfile {
        extensions: &["sh", "bash", "zsh", "ksh"],
        filenames: &[".bashrc", ".bash_profile", ".zshrc", ".profile"],
        executables: &["sh", "bash", "zsh", "ksh", "dash"],
        line_comment: Some("#"),
        ..code("sh")
    },
    LanguageProfile {
        extensions: &["yaml", "yml"],
        line_comment: Some("#"),
        ..code("yaml")
    },
    LanguageProfile {
        extensions: &["toml"],
        filenames: &["Cargo.lock", "Pipfile"],
        line_comment: Some("#"),
        ..code("toml")
    },
    LanguageProfile {
        extensions: &["sql"],
        line_comment: Some("--"),
        block_comment: C_BLOCK,
        ..code("sql")
    },
    LanguageProfile {
        extensions: &["sass"],
        line_comment: Some("//"),
        ..code("sass")
    },
    LanguageProfile {
        extensions: &["scss"],
        line_comment: Some("//"),
        block_comment: C_BLOCK,
        ignore: Some(r"^\s*//="),
        ..code("scss")
    },
    LanguageProfile {
        extensions: &["css"],
        block_comment: C_BLOCK,
        ignore: Some(r"^\s*/\*="),
        ..code("css")
    },
    LanguageProfile {
        extensions: &["mk", "mak"],
        filenames: &["Makefile", "makefile", "GNUmakefile"],
        executables: &["make"],
        line_comment: Some("#"),
        ..code("make")
    },
    LanguageProfile {
        filenames: &[".htaccess", "apache.conf", "apache2.conf", "httpd.conf"],
        line_comment: Some("#"),
        ..code("apache")
    },
    LanguageProfile {
        kind: ProfileKind::Markdown,
        extensions: &["md", "mkd", "mkdn", "markdown"],
        ..code("markdown")
    },
];
