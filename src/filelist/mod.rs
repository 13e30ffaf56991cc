mod discover;
mod manifest;

pub use discover::{discover_files, is_markdown, walk_markdown_sorted};
pub use manifest::{merge_file_lists, prepend_direct_files, read_manifest};
