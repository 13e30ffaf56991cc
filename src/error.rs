use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that abort a whole aggregation run.
///
/// Recoverable conditions (missing include targets, circular includes,
/// undecodable bytes) never appear here; they surface as inline placeholder
/// text plus reporter warnings.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Manifest entry not found: {0}")]
    ManifestEntryMissing(String),

    #[error("Invalid ignore pattern `{pattern}`: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("No Markdown files found.")]
    NoFiles,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AggregateError>;
