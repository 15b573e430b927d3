//! Property-based tests for line masking and segmentation.
//!
//! Generated sources mix code lines, quoted literals, line comments and blank
//! lines so the expected code content is known without re-implementing the
//! segmenter.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use litdoc::{mask_line, parse_comment, segment, Section, REGISTRY};

#[derive(Debug, Clone)]
enum Line {
    Code(String),
    Comment(String),
}

fn blank_line() -> impl Strategy<Value = Line> {
    "[ \t]{0,4}".prop_map(Line::Code)
}

fn js_line() -> impl Strategy<Value = Line> {
    prop_oneof![
        3 => "[a-z0-9 =;(){}+.]{0,24}".prop_map(Line::Code),
        2 => "[a-z */#']{0,6}".prop_map(|s| Line::Code(format!("var s = \"{}\";", s))),
        2 => "[a-z */#\"]{0,6}".prop_map(|s| Line::Code(format!("f('{}', x);", s))),
        1 => "[a-z */]{0,6}".prop_map(|s| Line::Code(format!("\"{}\";", s))),
        2 => "[a-zA-Z ,.]{0,24}".prop_map(|text| Line::Comment(format!("// {}", text))),
        1 => blank_line(),
    ]
}

/// Short literals in both quote styles, the shapes closest to `"""`.
fn python_line() -> impl Strategy<Value = Line> {
    prop_oneof![
        3 => "[a-z0-9 =()+.]{0,24}".prop_map(Line::Code),
        2 => "[a-z #']{0,3}".prop_map(|s| Line::Code(format!("name = \"{}\"", s))),
        2 => "[a-z #\"]{0,3}".prop_map(|s| Line::Code(format!("value = d['{}']", s))),
        1 => "[a-z]{0,2}".prop_map(|s| Line::Code(format!("print(\"{}\", '{}')", s, s))),
        2 => "[a-zA-Z ,.]{0,24}".prop_map(|text| Line::Comment(format!("# {}", text))),
        1 => blank_line(),
    ]
}

fn coffee_line() -> impl Strategy<Value = Line> {
    prop_oneof![
        3 => "[a-z0-9 =()+.]{0,24}".prop_map(Line::Code),
        2 => "[a-z #/]{0,6}".prop_map(|s| Line::Code(format!("s = \"{}\"", s))),
        2 => "[a-z #/]{0,6}".prop_map(|s| Line::Code(format!("t = '{}'", s))),
        2 => "[a-zA-Z ,.]{0,24}".prop_map(|text| Line::Comment(format!("# {}", text))),
        1 => blank_line(),
    ]
}

/// Every line, including the last, ends with `\n`.
fn render(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| match line {
            Line::Code(s) | Line::Comment(s) => format!("{}\n", s),
        })
        .collect()
}

fn expected_code(lines: &[Line]) -> String {
    lines
        .iter()
        .filter_map(|line| match line {
            Line::Code(s) => Some(format!("{}\n", s)),
            Line::Comment(_) => None,
        })
        .collect()
}

fn concat_code(sections: &[Section]) -> String {
    sections.iter().map(|s| s.code_text.as_str()).collect()
}

/// Code text is reproduced exactly. Only a fully blank final section, which
/// is emitted empty, may drop trailing whitespace-only lines.
fn check_round_trip(name: &str, lines: &[Line]) -> Result<(), TestCaseError> {
    let language = REGISTRY.get_by_name(name).unwrap();
    let sections = segment(&render(lines), &language);

    let actual = concat_code(&sections);
    let expected = expected_code(lines);
    if sections.last().is_some_and(|section| !section.is_blank()) {
        prop_assert_eq!(actual, expected);
    } else {
        prop_assert_eq!(actual.trim_end(), expected.trim_end());
    }
    Ok(())
}

// =====================================================
// Masking
// =====================================================

proptest! {
    #[test]
    fn test_mask_preserves_length(line in "[^\n]{0,80}") {
        for name in ["javascript", "coffeescript", "python", "c"] {
            let language = REGISTRY.get_by_name(name).unwrap();
            let masked = mask_line(&line, language.literals());
            prop_assert_eq!(masked.len(), line.len());
        }
    }

    #[test]
    fn test_mask_fills_quoted_interior(interior in "[a-z#/* ]{0,8}") {
        let python = REGISTRY.get_by_name("python").unwrap();
        for quote in ['"', '\''] {
            let line = format!("x = {}{}{}", quote, interior, quote);
            let expected = format!("x = {}{}{}", quote, ".".repeat(interior.len()), quote);
            prop_assert_eq!(mask_line(&line, python.literals()), expected);
        }
    }

    #[test]
    fn test_mask_keeps_unquoted_text(line in "[a-z0-9 =;(){}+*]{0,60}") {
        let js = REGISTRY.get_by_name("javascript").unwrap();
        prop_assert_eq!(mask_line(&line, js.literals()), line);
    }
}

// =====================================================
// Segmentation
// =====================================================

proptest! {
    #[test]
    fn test_code_round_trips(lines in prop::collection::vec(js_line(), 0..40)) {
        check_round_trip("javascript", &lines)?;
    }

    #[test]
    fn test_python_code_round_trips(lines in prop::collection::vec(python_line(), 0..40)) {
        check_round_trip("python", &lines)?;
    }

    #[test]
    fn test_coffeescript_code_round_trips(lines in prop::collection::vec(coffee_line(), 0..40)) {
        check_round_trip("coffeescript", &lines)?;
    }

    #[test]
    fn test_no_adjacent_blank_sections(lines in prop::collection::vec(js_line(), 0..40)) {
        let js = REGISTRY.get_by_name("javascript").unwrap();
        let sections = segment(&render(&lines), &js);

        prop_assert!(!sections.is_empty());
        prop_assert!(!sections.windows(2).any(|pair| pair[0].is_blank() && pair[1].is_blank()));
    }

    #[test]
    fn test_first_code_line_points_at_code(lines in prop::collection::vec(js_line(), 1..40)) {
        let js = REGISTRY.get_by_name("javascript").unwrap();
        let source = render(&lines);
        let source_lines: Vec<&str> = source.split('\n').collect();

        for section in segment(&source, &js) {
            if let Some(first) = section.first_code_line {
                let line = source_lines[first - 1];
                prop_assert!(section.code_text.starts_with(line));
            }
        }
    }

    #[test]
    fn test_segment_never_panics(source in "(?s).{0,400}") {
        for name in ["javascript", "python", "ruby", "perl", "coffeescript", "sh", "lua"] {
            let language = REGISTRY.get_by_name(name).unwrap();
            let _ = segment(&source, &language);
        }
    }
}

// =====================================================
// Annotation parsing
// =====================================================

proptest! {
    #[test]
    fn test_tag_parser_is_total_without_type_tags(
        body in "[a-zA-Z{}|,/ \n]{0,80}",
        keyword in "(param|return|api|see|public|throws|arg)",
    ) {
        let text = format!("@{} {}", keyword, body);
        let data = parse_comment(&text).unwrap();
        prop_assert!(!data.tags.is_empty());
    }
}
