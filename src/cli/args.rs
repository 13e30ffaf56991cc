use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::report::Level;

/// Aggregate a tree (or manifest) of Markdown files into one Markdown
/// document.
#[derive(Parser, Debug)]
#[command(name = "mdbundle", version, about)]
pub struct Args {
    /// Root directory containing Markdown files; a single .md file is also
    /// accepted and aggregated on its own
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Write aggregated Markdown to this file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Manifest listing files/directories in order (relative to root)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Glob pattern to ignore during discovery (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Separator text between files
    #[arg(long, default_value = "---")]
    pub separator: String,

    /// Disable insertion of separators between files (wins over --separator)
    #[arg(long)]
    pub no_separator: bool,

    /// Strip YAML frontmatter from each file before aggregation
    #[arg(long)]
    pub strip_frontmatter: bool,

    /// Combine manifest ordering with discovery while avoiding duplicates
    #[arg(long)]
    pub hybrid_mode: bool,

    /// Resolve <!-- @include: path.md --> directives recursively
    #[arg(long)]
    pub process_includes: bool,

    /// Prepend a generated table of contents
    #[arg(long)]
    pub toc: bool,

    /// Do not inject a top-level '# <File Name>' heading when a file has no H1
    #[arg(long)]
    pub no_auto_file_title: bool,

    /// Logging verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
        }
    }
}
