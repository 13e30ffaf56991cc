pub mod heading;
pub mod include;
pub mod text;

pub use heading::{
    heading_level, last_heading_level_before, min_heading_level, shift_heading_levels,
};
pub use include::{extract_include_refs, include_closure, resolve_include_path, resolve_includes};
pub use text::{leading_h1, slugify, strip_frontmatter, strip_leading_h1, title_from_stem};
