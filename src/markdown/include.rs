//! Recursive `<!-- @include: ref -->` expansion with heading rebasing.
//!
//! Each directive is replaced by the target file's content, itself expanded
//! depth-first. The included block's shallowest heading is rebased to sit one
//! level below the last heading preceding the directive. Cycles along one
//! recursion path are broken with a visible placeholder; the same file may
//! still be included from two sibling branches (the visited set is copied at
//! each branch point, never shared).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fsio::read_text;
use crate::report::Reporter;

use super::heading::{
    last_heading_level_before, min_heading_level, shift_heading_levels, MAX_LEVEL,
};
use super::text::strip_frontmatter;

static INCLUDE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*@include:\s*([^>\s]+)\s*-->").unwrap());

/// Raw references of every `@include` directive in `text`, in order of
/// appearance.
pub fn extract_include_refs(text: &str) -> Vec<&str> {
    INCLUDE_PATTERN
        .captures_iter(text)
        .map(|cap| cap.get(1).unwrap().as_str())
        .collect()
}

/// Resolve an include reference to a concrete file, trying in order: relative
/// to the including file's directory, relative to the root, as a standalone
/// path. First existing regular file wins.
pub fn resolve_include_path(reference: &str, current_file: &Path, root: &Path) -> Option<PathBuf> {
    let candidates = [
        current_file
            .parent()
            .map(|dir| dir.join(reference))
            .unwrap_or_else(|| PathBuf::from(reference)),
        root.join(reference),
        PathBuf::from(reference),
    ];

    for candidate in candidates {
        if candidate.is_file() {
            return Some(candidate.canonicalize().unwrap_or(candidate));
        }
    }
    None
}

fn not_found_placeholder(reference: &str) -> String {
    format!("<!-- include not found: {} -->", reference)
}

fn circular_placeholder(reference: &str) -> String {
    format!("<!-- circular include skipped: {} -->", reference)
}

/// Expand every include directive in `content` in place.
///
/// `visited` holds the file identities already entered on the current
/// recursion path; callers seed it with the identity of the file that owns
/// `content`. Heading context for each directive is computed against the
/// original `content`, so earlier substitutions never shift the levels used
/// by later ones.
pub fn resolve_includes(
    content: &str,
    current_file: &Path,
    root: &Path,
    visited: &HashSet<PathBuf>,
    strip_fm: bool,
    reporter: &mut Reporter,
) -> String {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;

    for cap in INCLUDE_PATTERN.captures_iter(content) {
        let marker = cap.get(0).unwrap();
        let reference = cap.get(1).unwrap().as_str();
        out.push_str(&content[cursor..marker.start()]);
        cursor = marker.end();

        let resolved = match resolve_include_path(reference, current_file, root) {
            Some(path) => path,
            None => {
                reporter.warn(format!("Include target not found: {}", reference));
                out.push_str(&not_found_placeholder(reference));
                continue;
            }
        };

        if visited.contains(&resolved) {
            reporter.warn(format!("Circular include skipped: {}", reference));
            out.push_str(&circular_placeholder(reference));
            continue;
        }

        let text = match read_text(&resolved) {
            Ok(text) => text,
            Err(err) => {
                reporter.warn(format!("Failed to read include target {}: {}", reference, err));
                out.push_str(&not_found_placeholder(reference));
                continue;
            }
        };
        let text = if strip_fm { strip_frontmatter(&text) } else { text };

        // Copy-on-recurse: sibling markers restart from the parent's set, so
        // diamond inclusion renders the shared file once per branch.
        let mut branch_visited = visited.clone();
        branch_visited.insert(resolved.clone());
        let expanded = resolve_includes(&text, &resolved, root, &branch_visited, strip_fm, reporter);

        let parent_level = last_heading_level_before(content, marker.start()).unwrap_or(0);
        let rebased = match min_heading_level(&expanded) {
            Some(included_min) => {
                let target = (parent_level + 1).min(MAX_LEVEL);
                shift_heading_levels(&expanded, target as i32 - included_min as i32)
            }
            // No headings at all: the block is inserted as-is.
            None => expanded,
        };

        out.push_str(rebased.trim());
    }

    out.push_str(&content[cursor..]);
    out
}

/// Depth-first expansion of the include graph over a seed file list: every
/// reachable file appears exactly once, dependencies ordered before the files
/// that include them. Used when included files should be aggregated as
/// standalone sections rather than spliced inline.
pub fn include_closure(files: &[PathBuf], root: &Path, reporter: &mut Reporter) -> Vec<PathBuf> {
    let mut ordered = Vec::new();
    let mut seen = HashSet::new();

    for path in files {
        let path = path.canonicalize().unwrap_or_else(|_| path.clone());
        visit(&path, root, &mut seen, &mut ordered, reporter);
    }

    ordered
}

fn visit(
    path: &Path,
    root: &Path,
    seen: &mut HashSet<PathBuf>,
    ordered: &mut Vec<PathBuf>,
    reporter: &mut Reporter,
) {
    if !seen.insert(path.to_path_buf()) {
        return;
    }

    let content = match read_text(path) {
        Ok(content) => content,
        Err(err) => {
            reporter.warn(format!("Include target missing: {} ({})", path.display(), err));
            return;
        }
    };

    for reference in extract_include_refs(&content) {
        if let Some(resolved) = resolve_include_path(reference, path, root) {
            if !seen.contains(&resolved) {
                visit(&resolved, root, seen, ordered, reporter);
            }
        } else {
            reporter.warn(format!("Include target not found: {}", reference));
        }
    }

    ordered.push(path.to_path_buf());
}
