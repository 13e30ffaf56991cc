//! Recursive Markdown file discovery with glob-based ignore patterns.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{AggregateError, Result};

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| AggregateError::InvalidIgnorePattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| AggregateError::InvalidIgnorePattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Recursively collect `.md` files under `root`, skipping any whose
/// root-relative path or base name matches an ignore pattern. Results are
/// sorted case-insensitively by path for stable output.
pub fn discover_files(root: &Path, ignore: &[String]) -> Result<Vec<PathBuf>> {
    let ignore_set = build_ignore_set(ignore)?;

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
        .filter(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            !ignore_set.is_match(relative) && !ignore_set.is_match(Path::new(entry.file_name()))
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort_by_key(|path| path.to_string_lossy().to_lowercase());
    Ok(files)
}

/// Recursively collect `.md` files under `dir` in plain sorted order. Used
/// for manifest directory expansion, which takes no ignore patterns.
pub fn walk_markdown_sorted(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}
