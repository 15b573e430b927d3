//! De-indentation of block comments.

use regex::Regex;

/// Blanks the block delimiters and strips the common indentation.
///
/// `raw` is the buffered comment, one source line per `\n`. The opener is
/// blanked on the first line and, when `terminated`, the closer on the last
/// line. Blanking keeps column positions intact so the indentation shared by
/// every non-blank line can be measured and removed. A delimiter line left
/// holding only decoration (`/**`, `***/`) is dropped.
pub fn normalize_block(raw: &str, start: &Regex, end: &Regex, terminated: bool) -> String {
    let mut lines: Vec<String> = raw
        .strip_suffix('\n')
        .unwrap_or(raw)
        .split('\n')
        .map(str::to_string)
        .collect();

    if let Some(first) = lines.first_mut() {
        *first = undecorate(blank_first(first, start));
    }
    if terminated && lines.len() > 1 {
        if let Some(last) = lines.last_mut() {
            *last = undecorate(blank_first(last, end));
        }
    }

    let indent = common_indent(&lines);
    let stripped: Vec<&str> = lines.iter().map(|line| strip_indent(line, indent)).collect();

    trim_blank_lines(&stripped.join("\n"))
}

/// Removes a leading `*` gutter marker and one following space from each line.
pub fn strip_markers(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let rest = line.trim_start_matches([' ', '\t']);
            let rest = rest.strip_prefix('*').unwrap_or(rest);
            rest.strip_prefix(' ').unwrap_or(rest)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn blank_first(line: &str, pattern: &Regex) -> String {
    match pattern.find(line) {
        Some(m) => format!(
            "{}{}{}",
            &line[..m.start()],
            " ".repeat(m.end() - m.start()),
            &line[m.end()..]
        ),
        None => line.to_string(),
    }
}

fn undecorate(line: String) -> String {
    if line.trim().chars().all(|c| matches!(c, '*' | '=' | '-' | '#')) {
        String::new()
    } else {
        line
    }
}

/// Shortest run of leading spaces/tabs over the non-blank lines.
pub fn common_indent<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .min()
        .unwrap_or(0)
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn strip_indent(line: &str, indent: usize) -> &str {
    let cut = leading_whitespace(line).min(indent);
    &line[cut..]
}

fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last]
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}
