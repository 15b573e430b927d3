//! Markdown rendering of parsed annotation comments.

use super::tags::{CommentData, TagKind, TagRecord};

/// Renders a parsed comment as Markdown doc text.
///
/// Summary and body come first, then one block per tag group in source order:
/// parameters as a list, everything else as labelled lines.
pub fn render_comment(data: &CommentData) -> String {
    let mut out = String::new();

    for part in [&data.description.summary, &data.description.body] {
        if !part.is_empty() {
            out.push_str(part);
            out.push_str("\n\n");
        }
    }

    let params: Vec<&TagRecord> = data.tags.iter().filter(|t| t.kind == TagKind::Param).collect();
    if !params.is_empty() {
        out.push_str("**Parameters**\n\n");
        for tag in params {
            out.push_str("- ");
            if let Some(name) = tag.name.as_deref().filter(|n| !n.is_empty()) {
                out.push_str(&format!("`{}` ", name));
            }
            push_types(&mut out, &tag.types);
            push_description(&mut out, tag);
            out.push('\n');
        }
        out.push('\n');
    }

    for tag in data.tags.iter().filter(|t| t.kind != TagKind::Param) {
        match tag.kind {
            TagKind::Return => out.push_str("**Returns** "),
            TagKind::Type => out.push_str("**Type** "),
            TagKind::Api => {
                let visibility = tag.visibility.as_deref().unwrap_or_default();
                out.push_str(&format!("**Visibility** {}", visibility));
            }
            TagKind::See => {
                out.push_str("**See** ");
                match (&tag.url, &tag.local) {
                    (Some(url), _) => {
                        let title = tag.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(url.as_str());
                        out.push_str(&format!("[{}]({})", title, url));
                    }
                    (None, Some(local)) => out.push_str(local),
                    (None, None) => {}
                }
            }
            TagKind::Unknown => {
                let name = tag.name.as_deref().unwrap_or_default();
                out.push_str(&format!("**@{}** ", name));
            }
            TagKind::Param => {}
        }
        push_types(&mut out, &tag.types);
        push_description(&mut out, tag);
        out.truncate(out.trim_end().len());
        out.push_str("\n\n");
    }

    if out.is_empty() {
        return out;
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

fn push_types(out: &mut String, types: &[String]) {
    if !types.is_empty() {
        out.push_str(&format!("*({})* ", types.join(" | ")));
    }
}

fn push_description(out: &mut String, tag: &TagRecord) {
    if let Some(desc) = tag.description.as_deref() {
        out.push_str(desc);
    }
}
