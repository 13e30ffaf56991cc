//! mdbundle aggregates a tree of Markdown documents into a single merged
//! document: file ordering via discovery, manifest, or hybrid merge;
//! recursive `<!-- @include: ref -->` expansion with heading-level rebasing;
//! and optional table-of-contents generation.

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod filelist;
pub mod fsio;
pub mod markdown;
pub mod report;

pub use aggregate::{aggregate_tree, AggregateConfig, AggregateOptions};
pub use error::AggregateError;
pub use report::Reporter;
