//! Source text helpers for code frames.
//!
//! Columns handed to these helpers are character positions, never byte
//! offsets, so multi-byte text lines up under its carets.

/// Get a specific line from source code (1-indexed)
///
/// Returns `None` if the line number is 0 or exceeds the number of lines in the source.
pub fn get_source_line(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source.lines().nth(line.saturating_sub(1))
}

/// Number of lines `get_source_line` can return.
pub fn line_count(source: &str) -> usize {
    source.lines().count()
}

/// Character width of a decimal number, used for the gutter.
pub fn digit_width(value: usize) -> usize {
    value.to_string().len()
}

/// Convert a 1-based byte column on `line` to a 1-based character column.
///
/// Byte columns that land inside a multi-byte character snap to that
/// character; columns past the end clamp to one past the last character.
pub fn char_column(line: &str, byte_column: usize) -> usize {
    let byte_offset = byte_column.saturating_sub(1).min(line.len());
    let chars_before = line
        .char_indices()
        .take_while(|(idx, ch)| idx + ch.len_utf8() <= byte_offset)
        .count();
    chars_before + 1
}
