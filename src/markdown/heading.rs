//! ATX heading detection and heading-level arithmetic.
//!
//! Everything here is line-oriented: a heading is a line starting with 1-6
//! `#` characters followed by whitespace. No Markdown AST is involved.

pub const MIN_LEVEL: usize = 1;
pub const MAX_LEVEL: usize = 6;

/// Heading level of a single line, or `None` if the line is not an ATX
/// heading. `####### seven` and `#hash` are not headings.
pub fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&hashes) {
        return None;
    }
    match line.chars().nth(hashes) {
        Some(c) if c.is_whitespace() => Some(hashes),
        _ => None,
    }
}

/// Shift every heading line in `text` by `delta` levels, clamping to the
/// [1, 6] range. Non-heading lines pass through untouched.
pub fn shift_heading_levels(text: &str, delta: i32) -> String {
    if delta == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let (line, remainder) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        };

        match heading_level(line) {
            Some(level) => {
                let new_level =
                    (level as i32 + delta).clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as usize;
                out.push_str(&"#".repeat(new_level));
                out.push_str(line.trim_start_matches('#'));
            }
            None => out.push_str(line),
        }

        if rest.len() > line.len() {
            out.push('\n');
        }
        rest = remainder;
    }
    out
}

/// Minimum heading level present in `text`, or `None` when it has no
/// headings at all.
pub fn min_heading_level(text: &str) -> Option<usize> {
    text.lines().filter_map(heading_level).min()
}

/// Level of the last heading starting strictly before byte `offset`, or
/// `None` when no heading precedes it.
pub fn last_heading_level_before(text: &str, offset: usize) -> Option<usize> {
    let mut last = None;
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        if line_start >= offset {
            break;
        }
        if let Some(level) = heading_level(line.trim_end_matches(['\n', '\r'])) {
            last = Some(level);
        }
        line_start += line.len();
    }
    last
}
