//! Markdown rendering for documented modules.
//!
//! A module renders as an optional `### Events` list (from `@fires` tags)
//! followed by a `Method Signature | Description` table of its members.
//! The callable and accessor row formats differ slightly; both are kept as
//! they are because existing READMEs were generated with them.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

static RE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

const FIRES_TAG: &str = "fires";

/// Render the full fragment for one module.
pub fn render_module(module: &ReflectionNode) -> String {
    let mut out = render_events(module.comment.as_ref());
    out.push_str(&render_member_table(module));
    out
}

/// Render the `### Events` section from the module's `@fires` tags.
pub fn render_events(comment: Option<&Comment>) -> String {
    let Some(comment) = comment else {
        return String::new();
    };
    if comment.tags.is_empty() {
        return String::new();
    }

    let groups = group_tags(&comment.tags);
    let Some((_, fires)) = groups.iter().find(|(name, _)| *name == FIRES_TAG) else {
        return String::new();
    };

    let mut out = String::from("### Events\n\n");
    for tag in fires {
        out.push_str(&format!("- {}\n", collapse_newlines(&tag.text)));
    }
    out.push('\n');
    out
}

/// Group tags by tag name, keeping first-appearance order of names.
fn group_tags(tags: &[CommentTag]) -> Vec<(&str, Vec<&CommentTag>)> {
    let mut groups: Vec<(&str, Vec<&CommentTag>)> = Vec::new();
    for tag in tags {
        match groups.iter_mut().find(|(name, _)| *name == tag.tag) {
            Some((_, group)) => group.push(tag),
            None => groups.push((tag.tag.as_str(), vec![tag])),
        }
    }
    groups
}

/// Render the member table heading and one row per documented member.
pub fn render_member_table(module: &ReflectionNode) -> String {
    let mut out = format!(
        "### {}\n\nMethod Signature | Description\n--- | ---\n",
        module.name
    );
    for member in module.children.iter().flatten() {
        let row = match member.kind {
            ReflectionKind::Function | ReflectionKind::Method => render_callable_row(member),
            ReflectionKind::Accessor => render_accessor_row(member),
            _ => None,
        };
        if let Some(row) = row {
            out.push_str(&row);
        }
    }
    out
}

/// `name | description` for a function or method, from its first signature.
pub fn render_callable_row(member: &ReflectionNode) -> Option<String> {
    let short_text = member
        .signatures
        .as_deref()?
        .first()?
        .comment
        .as_ref()?
        .short_text
        .as_deref()?;
    Some(format!("{} | {} \n", member.name, clean(short_text)))
}

/// Accessor row: name and description are joined first, then cleaned.
pub fn render_accessor_row(member: &ReflectionNode) -> Option<String> {
    let comment = member.comment.as_ref()?;
    let short_text = comment.short_text.as_deref().unwrap_or_default();
    let row = clean(&format!("{} | {}", member.name, short_text));
    Some(format!("{} \n", row))
}

/// Replace the first newline with a space. Later newlines are left alone.
pub fn clean(text: &str) -> String {
    text.replacen('\n', " ", 1)
}

/// Collapse every run of newlines into one space and trim the ends.
pub fn collapse_newlines(text: &str) -> String {
    RE_NEWLINES.replace_all(text, " ").trim().to_string()
}
