//! The aggregation pipeline: per-file rendering, TOC generation, and the
//! top-level orchestrator that turns a configuration into one merged
//! document.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{AggregateError, Result};
use crate::filelist::{discover_files, merge_file_lists, prepend_direct_files, read_manifest};
use crate::fsio::{read_text, write_output};
use crate::markdown::{
    leading_h1, resolve_includes, slugify, strip_frontmatter, strip_leading_h1, title_from_stem,
};
use crate::report::Reporter;

/// Per-file rendering knobs.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Strip one leading YAML frontmatter block from each file (and from
    /// included files).
    pub strip_frontmatter: bool,
    /// Text inserted between files; empty disables separators.
    pub separator: String,
    /// Expand `<!-- @include: ref -->` directives inline.
    pub process_includes: bool,
    /// Prepend a generated table of contents.
    pub include_toc: bool,
    /// Derive a title from the file name when a file has no leading H1.
    pub auto_file_title: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            strip_frontmatter: false,
            separator: "---".to_string(),
            process_includes: false,
            include_toc: false,
            auto_file_title: true,
        }
    }
}

/// Full configuration for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub root: PathBuf,
    pub manifest: Option<PathBuf>,
    /// Explicit files treated as highest-priority manifest entries.
    pub direct_files: Vec<PathBuf>,
    pub ignore: Vec<String>,
    /// Merge manifest ordering with discovery-filled gaps.
    pub hybrid_mode: bool,
    pub options: AggregateOptions,
    pub output: Option<PathBuf>,
}

impl AggregateConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest: None,
            direct_files: Vec::new(),
            ignore: Vec::new(),
            hybrid_mode: false,
            options: AggregateOptions::default(),
            output: None,
        }
    }
}

/// Render the TOC block: a level-1 heading followed by one link bullet per
/// entry, in file-processing order.
pub fn build_toc(entries: &[(String, String)]) -> String {
    let mut out = String::from("# Table of contents\n\n");
    for (title, anchor) in entries {
        out.push_str(&format!("- [{}](#{})\n", title, anchor));
    }
    out.push('\n');
    out
}

/// Render `files` in order into the merged document.
pub fn render_files(
    files: &[PathBuf],
    root: &Path,
    opts: &AggregateOptions,
    reporter: &mut Reporter,
) -> Result<String> {
    if files.is_empty() {
        return Err(AggregateError::NoFiles);
    }

    let mut toc_entries: Vec<(String, String)> = Vec::new();
    let mut parts: Vec<String> = Vec::new();

    for path in files {
        let mut markdown = read_text(path)?;
        if opts.strip_frontmatter {
            markdown = strip_frontmatter(&markdown);
        }

        if opts.process_includes {
            let identity = path.canonicalize().unwrap_or_else(|_| path.clone());
            let mut visited = HashSet::new();
            visited.insert(identity);
            markdown =
                resolve_includes(&markdown, path, root, &visited, opts.strip_frontmatter, reporter);
        }

        let title = match leading_h1(&markdown) {
            Some(title) => {
                markdown = strip_leading_h1(&markdown);
                Some(title)
            }
            None if opts.auto_file_title => {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("untitled");
                Some(title_from_stem(stem))
            }
            None => None,
        };

        let relative = path.strip_prefix(root).unwrap_or(path);
        let mut block = format!("<!-- Source: {} -->\n", relative.display());
        if let Some(title) = &title {
            let anchor = slugify(title);
            block.push_str(&format!("<a id=\"{}\"></a>\n\n# {}\n\n", anchor, title));
            if opts.include_toc {
                toc_entries.push((title.clone(), anchor));
            }
        }
        block.push_str(markdown.trim());
        block.push('\n');
        parts.push(block);

        if !opts.separator.is_empty() {
            parts.push(format!("\n{}\n", opts.separator));
        }
    }

    // No separator trails the very last file.
    if !opts.separator.is_empty() {
        parts.pop();
    }

    let mut out = String::new();
    if opts.include_toc {
        out.push_str(&build_toc(&toc_entries));
    }
    out.push_str(parts.join("\n").trim_end());
    out.push('\n');
    Ok(out)
}

/// Resolve the input file list from the configured mode (discovery, manifest,
/// hybrid, direct files), render it, and optionally persist the result. No
/// partial output is written on a fatal error.
pub fn aggregate_tree(config: &AggregateConfig, reporter: &mut Reporter) -> Result<String> {
    let root = config
        .root
        .canonicalize()
        .map_err(|_| AggregateError::RootNotFound(config.root.clone()))?;

    let mut manifest_files = match &config.manifest {
        Some(manifest) => read_manifest(manifest, &root)?,
        None => Vec::new(),
    };
    if !config.direct_files.is_empty() {
        let direct: Vec<PathBuf> = config
            .direct_files
            .iter()
            .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
            .collect();
        manifest_files = prepend_direct_files(&direct, manifest_files);
    }
    let use_manifest = config.manifest.is_some() || !config.direct_files.is_empty();

    let discovered = if !use_manifest || config.hybrid_mode {
        discover_files(&root, &config.ignore)?
    } else {
        Vec::new()
    };

    let files = if config.hybrid_mode && use_manifest {
        let merged = merge_file_lists(&discovered, &manifest_files);
        reporter.info(format!(
            "Hybrid mode: {} files from manifest, {} discovered, {} total",
            manifest_files.len(),
            discovered.len(),
            merged.len()
        ));
        merged
    } else if use_manifest {
        manifest_files
    } else {
        discovered
    };

    let merged = render_files(&files, &root, &config.options, reporter)?;

    if let Some(output) = &config.output {
        write_output(output, &merged)?;
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options() -> AggregateOptions {
        AggregateOptions {
            include_toc: true,
            ..AggregateOptions::default()
        }
    }

    #[test]
    fn test_render_creates_toc_anchor_and_provenance() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("intro.md"), "# Intro\n\nContent").unwrap();
        fs::write(temp.path().join("chapter.md"), "# Chapter\n\nMore content").unwrap();
        let files = vec![temp.path().join("chapter.md"), temp.path().join("intro.md")];
        let mut reporter = Reporter::new();

        let merged = render_files(&files, temp.path(), &options(), &mut reporter).unwrap();
        assert!(merged.starts_with("# Table of contents\n\n- [Chapter](#chapter)\n- [Intro](#intro)\n"));
        assert!(merged.contains("<a id=\"intro\"></a>"));
        assert!(merged.contains("<!-- Source: intro.md -->"));
        assert!(merged.ends_with("Content\n"));
        assert!(!merged.ends_with("\n\n"));
    }

    #[test]
    fn test_leading_h1_becomes_title_and_is_removed_from_body() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("doc.md"), "# My Title\n\nbody text\n").unwrap();
        let mut reporter = Reporter::new();

        let merged = render_files(
            &[temp.path().join("doc.md")],
            temp.path(),
            &options(),
            &mut reporter,
        )
        .unwrap();
        // The injected header carries the title; the body keeps only the text.
        assert_eq!(merged.matches("My Title").count(), 2);
        assert!(merged.contains("# My Title\n\nbody text"));
    }

    #[test]
    fn test_auto_title_from_file_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("getting_started.md"), "no heading here\n").unwrap();
        let mut reporter = Reporter::new();

        let merged = render_files(
            &[temp.path().join("getting_started.md")],
            temp.path(),
            &options(),
            &mut reporter,
        )
        .unwrap();
        assert!(merged.contains("# Getting Started"));
        assert!(merged.contains("- [Getting Started](#getting-started)"));
    }

    #[test]
    fn test_no_title_no_anchor_no_toc_entry() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.md"), "no heading here\n").unwrap();
        let mut reporter = Reporter::new();

        let opts = AggregateOptions {
            include_toc: true,
            auto_file_title: false,
            ..AggregateOptions::default()
        };
        let merged = render_files(
            &[temp.path().join("notes.md")],
            temp.path(),
            &opts,
            &mut reporter,
        )
        .unwrap();
        assert!(merged.contains("# Table of contents\n\n\n"));
        assert!(!merged.contains("<a id="));
        assert!(merged.contains("<!-- Source: notes.md -->\nno heading here"));
    }

    #[test]
    fn test_separator_between_files_but_not_trailing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.md"), "# A\n").unwrap();
        fs::write(temp.path().join("b.md"), "# B\n").unwrap();
        let files = vec![temp.path().join("a.md"), temp.path().join("b.md")];
        let mut reporter = Reporter::new();

        let merged = render_files(&files, temp.path(), &AggregateOptions::default(), &mut reporter)
            .unwrap();
        assert_eq!(merged.matches("\n---\n").count(), 1);
        assert!(merged.ends_with("# B\n"));
    }

    #[test]
    fn test_empty_separator_disables_separators() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.md"), "# A\n").unwrap();
        fs::write(temp.path().join("b.md"), "# B\n").unwrap();
        let files = vec![temp.path().join("a.md"), temp.path().join("b.md")];
        let mut reporter = Reporter::new();

        let opts = AggregateOptions {
            separator: String::new(),
            ..AggregateOptions::default()
        };
        let merged = render_files(&files, temp.path(), &opts, &mut reporter).unwrap();
        assert!(!merged.contains("---"));
    }

    #[test]
    fn test_empty_file_list_is_fatal() {
        let mut reporter = Reporter::new();
        let result = render_files(&[], Path::new("/tmp"), &AggregateOptions::default(), &mut reporter);
        assert!(matches!(result, Err(AggregateError::NoFiles)));
    }

    #[test]
    fn test_aggregate_tree_discovery_and_output() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("docs");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("intro.md"), "# Intro\n\nContent").unwrap();

        let output = temp.path().join("out").join("merged.md");
        let mut config = AggregateConfig::new(&root);
        config.options.include_toc = true;
        config.output = Some(output.clone());
        let mut reporter = Reporter::new();

        let merged = aggregate_tree(&config, &mut reporter).unwrap();
        assert!(merged.contains("# Table of contents"));
        assert_eq!(fs::read_to_string(&output).unwrap(), merged);
    }

    #[test]
    fn test_aggregate_tree_missing_root_is_fatal() {
        let config = AggregateConfig::new("/definitely/not/here");
        let mut reporter = Reporter::new();
        assert!(matches!(
            aggregate_tree(&config, &mut reporter),
            Err(AggregateError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_aggregate_tree_hybrid_mode() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("a.md"), "# A\n").unwrap();
        fs::write(root.join("b.md"), "# B\n").unwrap();
        fs::write(root.join("z.md"), "# Z\n").unwrap();
        let manifest = root.join("order.txt");
        fs::write(&manifest, "z.md\na.md\n").unwrap();

        let mut config = AggregateConfig::new(root);
        config.manifest = Some(manifest);
        config.hybrid_mode = true;
        let mut reporter = Reporter::new();

        let merged = aggregate_tree(&config, &mut reporter).unwrap();
        let z = merged.find("<!-- Source: z.md -->").unwrap();
        let a = merged.find("<!-- Source: a.md -->").unwrap();
        let b = merged.find("<!-- Source: b.md -->").unwrap();
        assert!(z < a && a < b);
        assert!(reporter.events().iter().any(|e| e.message.contains("Hybrid mode")));
    }

    #[test]
    fn test_aggregate_tree_direct_files_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("solo.md"), "# Solo\n\ntext").unwrap();
        fs::write(temp.path().join("other.md"), "# Other\n").unwrap();

        let mut config = AggregateConfig::new(temp.path());
        config.direct_files = vec![temp.path().join("solo.md")];
        let mut reporter = Reporter::new();

        let merged = aggregate_tree(&config, &mut reporter).unwrap();
        assert!(merged.contains("<!-- Source: solo.md -->"));
        assert!(!merged.contains("other.md"));
    }

    #[test]
    fn test_inline_includes_expanded_during_render() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("main.md"),
            "# Main\n\n<!-- @include: extra.md -->\n",
        )
        .unwrap();
        fs::write(temp.path().join("extra.md"), "# Extra\n\ndetail\n").unwrap();

        let mut config = AggregateConfig::new(temp.path());
        config.direct_files = vec![temp.path().join("main.md")];
        config.options.process_includes = true;
        let mut reporter = Reporter::new();

        let merged = aggregate_tree(&config, &mut reporter).unwrap();
        assert!(merged.contains("## Extra"));
        assert!(!merged.contains("@include"));
    }
}
