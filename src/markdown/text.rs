//! Frontmatter stripping, title detection, and anchor slugs.

use once_cell::sync::Lazy;
use regex::Regex;

use super::heading::heading_level;

static FRONTMATTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---[ \t]*\n.*?\n---[ \t]*\n").unwrap());

static NON_SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());

static SLUG_SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());

/// Convert a title to a slug suitable for Markdown anchors: lowercase, with
/// punctuation removed and runs of whitespace/underscores/hyphens collapsed
/// to a single hyphen.
pub fn slugify(text: &str) -> String {
    let cleaned = NON_SLUG_PATTERN.replace_all(text, "");
    let cleaned = cleaned.trim().to_lowercase();
    SLUG_SEPARATOR_PATTERN.replace_all(&cleaned, "-").into_owned()
}

/// Strip a single leading frontmatter block (`---` ... `---`) anchored at the
/// very start of the text. Text without one is returned unchanged.
pub fn strip_frontmatter(text: &str) -> String {
    FRONTMATTER_PATTERN.replace(text, "").into_owned()
}

/// Title of a level-1 heading sitting at the very start of the
/// whitespace-trimmed text. Trailing closing hashes are not part of the
/// title.
pub fn leading_h1(text: &str) -> Option<String> {
    let trimmed = text.trim_start();
    let first_line = trimmed.lines().next()?;
    if heading_level(first_line)? != 1 {
        return None;
    }
    let title = first_line[1..].trim().trim_end_matches('#').trim_end();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Remove the leading H1 line detected by [`leading_h1`], returning the
/// remaining body with leading whitespace trimmed.
pub fn strip_leading_h1(text: &str) -> String {
    let trimmed = text.trim_start();
    match trimmed.find('\n') {
        Some(pos) => trimmed[pos + 1..].trim_start().to_string(),
        None => String::new(),
    }
}

/// Derive a display title from a file stem: underscores and hyphens become
/// spaces, each word is title-cased.
pub fn title_from_stem(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
