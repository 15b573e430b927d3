//! Literal masking.
//!
//! Comment lexemes are matched against a masked copy of each line in which the
//! interiors of string and character literals are overwritten. The masked
//! line has the same byte length as the raw line, so a match position in one
//! is a valid position in the other.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Double- or single-quoted literal; group 1 or 2 is the interior.
static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'"#).unwrap());

/// Fill for quoted interiors. It must not occur in any comment lexeme, and in
/// particular must not be a quote: Python's `"""` would otherwise match `"ab"`.
const QUOTED_FILL: char = '.';

/// Masks `line` with the language's literal rules, then generic quoting.
///
/// Interiors of quoted literals are filled with `.`, so `"*/"` becomes `".."`
/// and can no longer close a block comment.
pub fn mask_line(line: &str, literals: &[(Regex, char)]) -> String {
    let mut masked = line.to_string();

    for (pattern, blank) in literals {
        masked = blank_groups(&masked, pattern, |_| *blank);
    }

    blank_groups(&masked, &QUOTED, |_| QUOTED_FILL)
}

/// Overwrites every participating capture group of every match.
///
/// `blank_for` receives the group index. Each replaced character becomes as
/// many copies of the blank as it had UTF-8 bytes.
fn blank_groups(text: &str, pattern: &Regex, blank_for: impl Fn(usize) -> char) -> String {
    let mut spans = Vec::new();
    for caps in pattern.captures_iter(text) {
        collect_spans(&caps, &blank_for, &mut spans);
    }
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for (start, end, blank) in spans {
        out.push_str(&text[pos..start]);
        fill(&mut out, &text[start..end], blank);
        pos = end;
    }
    out.push_str(&text[pos..]);
    out
}

fn collect_spans(
    caps: &Captures,
    blank_for: &impl Fn(usize) -> char,
    spans: &mut Vec<(usize, usize, char)>,
) {
    for group in 1..caps.len() {
        if let Some(m) = caps.get(group) {
            spans.push((m.start(), m.end(), blank_for(group)));
        }
    }
}

fn fill(out: &mut String, interior: &str, blank: char) {
    let unit = if blank.is_ascii() { blank } else { ' ' };
    for c in interior.chars() {
        for _ in 0..c.len_utf8() {
            out.push(unit);
        }
    }
}
