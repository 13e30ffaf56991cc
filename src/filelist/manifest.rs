//! Manifest parsing and file-list merge strategies.
//!
//! A manifest is a plain text file listing Markdown files or directories, one
//! entry per line, in the order they should be aggregated. Blank lines and
//! `#` comment lines are skipped; ` #` starts an inline comment.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{AggregateError, Result};
use crate::fsio::read_text;

use super::discover::walk_markdown_sorted;

/// Parse `manifest`, resolving entries relative to `root`. Directories expand
/// to their recursively discovered Markdown files in sorted order; duplicates
/// are dropped keeping the first occurrence. A missing entry aborts the run.
pub fn read_manifest(manifest: &Path, root: &Path) -> Result<Vec<PathBuf>> {
    let text = read_text(manifest)?;
    let mut entries = Vec::new();

    for raw_line in text.lines() {
        let mut line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(pos) = line.find(" #") {
            line = line[..pos].trim_end();
        }

        let candidate = root.join(line);
        if !candidate.exists() {
            return Err(AggregateError::ManifestEntryMissing(line.to_string()));
        }
        let candidate = candidate.canonicalize().unwrap_or(candidate);

        if candidate.is_dir() {
            entries.extend(walk_markdown_sorted(&candidate));
        } else {
            entries.push(candidate);
        }
    }

    Ok(dedup_keep_first(entries))
}

/// Hybrid merge: manifest entries keep their relative order, then discovered
/// files not already present are appended.
pub fn merge_file_lists(discovered: &[PathBuf], manifest: &[PathBuf]) -> Vec<PathBuf> {
    let mut result = dedup_keep_first(manifest.to_vec());
    let present: HashSet<&PathBuf> = result.iter().collect();
    let extra: Vec<PathBuf> = discovered
        .iter()
        .filter(|path| !present.contains(path))
        .cloned()
        .collect();
    result.extend(extra);
    result
}

/// Prepend explicit caller-supplied files as highest-priority entries before
/// the manifest's own entries.
pub fn prepend_direct_files(direct: &[PathBuf], manifest: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut combined = direct.to_vec();
    combined.extend(manifest);
    dedup_keep_first(combined)
}

fn dedup_keep_first(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths.into_iter().filter(|p| seen.insert(p.clone())).collect()
}
