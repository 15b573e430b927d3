//! End-to-end tests: files on disk through segmentation, annotation parsing,
//! Markdown rendering and code re-extraction.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use litdoc::{
    extract, parse_comment, reinsert, segment, ComrakRenderer, Config, DocError, DocGenerator,
    DocumentedFile, FileOutcome, Highlighter, PlainHighlighter, TagKind, REGISTRY,
};

/// Wraps code in `<H>` markers so highlighted regions are visible.
struct Marker;

impl Highlighter for Marker {
    fn highlight(&self, code: &str, _language: &str) -> litdoc::Result<String> {
        Ok(format!("<H>{}</H>", code))
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

fn code_sections(file: DocumentedFile) -> Vec<litdoc::RenderedSection> {
    match file {
        DocumentedFile::Code { sections, .. } => sections,
        DocumentedFile::Markdown { .. } => panic!("expected a code file"),
    }
}

// ============================================================================
// Segmentation Scenarios
// ============================================================================

mod segmentation {
    use super::*;

    #[test]
    fn test_blank_only_file_yields_one_empty_section() {
        let js = REGISTRY.get_by_name("javascript").unwrap();
        let sections = segment("\n\n\n", &js);

        assert_eq!(sections.len(), 1);
        assert!(sections[0].doc_text.is_empty());
        assert!(sections[0].code_text.is_empty());
    }

    #[test]
    fn test_file_ending_mid_comment_keeps_partial_text() {
        let c = REGISTRY.get_by_name("c").unwrap();
        let sections = segment("int main(void);\n/* Work in progress:\n   the parser", &c);

        let last = sections.last().unwrap();
        assert!(!last.doc_text.is_empty());
        assert!(last.doc_text.contains("the parser"));
    }

    #[test]
    fn test_terminator_inside_string_does_not_close_comment() {
        let js = REGISTRY.get_by_name("javascript").unwrap();
        let src = "var end = \"*/\"; /* starts here\n  still comment */\nafter();\n";
        let sections = segment(src, &js);

        assert_eq!(sections.len(), 1);
        assert!(sections[0].doc_text.contains("still comment"));
        assert_eq!(sections[0].code_text, "after();\n");
    }

    #[test]
    fn test_mixed_comment_styles() {
        let java = REGISTRY.get_by_name("java").unwrap();
        let src = "\
/**
 * Entry point.
 *
 * @param {String[]} args command line
 */
public static void main(String[] args) {
    // Greet the user
    System.out.println(\"hi\");
}
";
        let sections = segment(src, &java);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].annotations.len(), 1);
        assert_eq!(sections[0].annotations[0].description.summary, "Entry point.");
        assert_eq!(sections[0].first_code_line, Some(6));
        assert_eq!(sections[1].doc_text, "Greet the user\n");
        assert_eq!(sections[1].code_text, "    System.out.println(\"hi\");\n}\n");
    }
}

// ============================================================================
// Annotation Parsing
// ============================================================================

mod annotations {
    use super::*;

    #[test]
    fn test_param_and_return_records() {
        let data = parse_comment("@param {string|number} x the value\n@return {bool} ok").unwrap();

        assert_eq!(data.tags.len(), 2);
        let param = &data.tags[0];
        assert_eq!(param.kind, TagKind::Param);
        assert_eq!(param.types, vec!["string", "number"]);
        assert_eq!(param.name.as_deref(), Some("x"));
        assert_eq!(param.description.as_deref(), Some("the value"));

        let ret = &data.tags[1];
        assert_eq!(ret.kind, TagKind::Return);
        assert_eq!(ret.types, vec!["bool"]);
        assert_eq!(ret.description.as_deref(), Some("ok"));
    }

    #[test]
    fn test_generic_type_is_escaped() {
        let data = parse_comment("@type {A<B>}").unwrap();
        assert_eq!(data.tags[0].types, vec!["A&lt;B&gt;"]);
    }

    #[test]
    fn test_tag_records_serialize() {
        let data = parse_comment("Summary.\n@see Docs https://example.com/docs").unwrap();
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["description"]["summary"], "Summary.");
        assert_eq!(json["tags"][0]["kind"], "see");
        assert_eq!(json["tags"][0]["url"], "https://example.com/docs");
    }
}

// ============================================================================
// Embedded Code Re-extraction
// ============================================================================

mod reextraction {
    use super::*;

    #[test]
    fn test_two_blocks_are_wrapped_in_order() {
        let html = "<p>a</p>\n<pre><code class=\"language-x\">one\n</code></pre>\n<pre><code class=\"language-y\">two\n</code></pre>\n";
        let (stripped, blocks) = extract(html);
        let out = reinsert(&stripped, &blocks, &Marker);

        assert_eq!(
            out,
            "<p>a</p>\n<pre><code class=\"language-x\"><H>one\n</H></code></pre>\n<pre><code class=\"language-y\"><H>two\n</H></code></pre>\n"
        );
        assert!(!out.contains('\u{0}'));
    }

    #[test]
    fn test_doc_comment_example_is_highlighted() {
        let generator =
            DocGenerator::with_collaborators(Box::new(ComrakRenderer::default()), Box::new(Marker));
        let src = "# Example:\n#\n# ```sh\n# echo $HOME\n# ```\necho done\n";
        let doc = generator.document(Path::new("run.sh"), src).unwrap().unwrap();
        let sections = code_sections(doc);

        assert!(sections[0]
            .doc_html
            .contains("<pre><code class=\"language-sh\"><H>echo $HOME\n</H></code></pre>"));
        assert_eq!(
            sections[0].code_html,
            "<div class=\"highlight\"><pre><H>echo done\n</H></pre></div>"
        );
    }
}

// ============================================================================
// Batch Processing
// ============================================================================

mod batch {
    use super::*;

    #[test]
    fn test_document_all_mixed_inputs() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let js = write_file(
            &dir,
            "math.js",
            "/**\n * Doubles.\n * @param {number} n\n * @return {number}\n */\nfunction double(n) { return n * 2; }\n",
        );
        let script = write_file(&dir, "build", "#!/usr/bin/env bash\n# Build it\nmake all\n");
        let readme = write_file(&dir, "README.md", "# Project\n\nSome *prose*.\n");
        let blob = write_file(&dir, "image.png", "not really a png");
        let missing = dir.path().join("missing.py");

        let generator = DocGenerator::new(&Config::default());
        let outcomes = generator.document_all(&[
            js.clone(),
            script.clone(),
            readme.clone(),
            blob.clone(),
            missing.clone(),
        ]);

        assert_eq!(outcomes.len(), 5);

        let FileOutcome::Documented(ref file) = outcomes[0] else {
            panic!("math.js should be documented");
        };
        let DocumentedFile::Code { ref language, ref sections, .. } = *file else {
            panic!("math.js is code");
        };
        assert_eq!(language, "javascript");
        assert!(sections[0].doc_html.contains("<strong>Parameters</strong>"));
        assert!(sections[0].doc_html.contains("<code>n</code>"));
        assert_eq!(sections[0].section.annotations[0].tags.len(), 2);

        let FileOutcome::Documented(DocumentedFile::Code { ref language, .. }) = outcomes[1] else {
            panic!("shebang script should be documented");
        };
        assert_eq!(language, "sh");

        let FileOutcome::Documented(DocumentedFile::Markdown { ref html, .. }) = outcomes[2] else {
            panic!("README should render as markdown");
        };
        assert!(html.contains("<h1>Project</h1>"));
        assert!(html.contains("<em>prose</em>"));

        assert!(matches!(outcomes[3], FileOutcome::Skipped { .. }));
        assert!(matches!(
            outcomes[4],
            FileOutcome::Failed { error: DocError::Io(_), .. }
        ));
        assert_eq!(outcomes[4].path(), missing.as_path());
    }

    #[test]
    fn test_highlighting_disabled_by_config() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file = write_file(&dir, "lib.rs", "// Entry\nfn main() {}\n");

        let config = Config::from_toml_str("[highlight]\nenabled = false\n").unwrap();
        let doc = DocGenerator::new(&config).document_path(&file).unwrap().unwrap();
        let sections = code_sections(doc);

        assert_eq!(sections[0].code_html, "<div class=\"highlight\"><pre>fn main() {}\n</pre></div>");
    }

    #[test]
    fn test_highlighting_enabled_by_default() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file = write_file(&dir, "lib.rs", "// Entry\nfn main() {}\n");

        let doc = DocGenerator::default().document_path(&file).unwrap().unwrap();
        let sections = code_sections(doc);

        assert!(sections[0].code_html.contains("<span class=\"k\">fn</span>"));
        assert!(sections[0].code_html.contains("<span class=\"n\">main</span>"));
    }

    #[test]
    fn test_rendered_output_serializes() {
        let generator =
            DocGenerator::with_collaborators(Box::new(ComrakRenderer::default()), Box::new(PlainHighlighter));
        let doc = generator
            .document(Path::new("app.py"), "# Start\nmain()\n")
            .unwrap()
            .unwrap();

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["kind"], "code");
        assert_eq!(json["language"], "python");
        assert_eq!(json["sections"][0]["doc_text"], "Start\n");
        assert_eq!(json["sections"][0]["first_code_line"], 2);
        assert_eq!(json["sections"][0]["doc_html"], "<p>Start</p>\n");
    }
}
