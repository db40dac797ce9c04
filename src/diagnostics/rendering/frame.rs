use thiserror::Error;

use super::source::{digit_width, get_source_line, line_count};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("line {line} is out of range: source has {available} line(s)")]
    LineOutOfRange { line: usize, available: usize },
}

/// Render a code frame pointing at `line`:`column` of `source`.
///
/// ```text
///   ┌─ ./src/index.js:2:1
///   │
/// 2 │ return;
///   │ ^^^^^^
/// ```
///
/// The gutter is as wide as the line number. Carets start under the
/// `column`-th character and span `token_len` characters (at least one).
/// The result has no trailing newline.
pub fn format_error_frame(
    file: &str,
    line: usize,
    column: usize,
    source: &str,
    token_len: usize,
) -> Result<String, FrameError> {
    let Some(text) = get_source_line(source, line) else {
        return Err(FrameError::LineOutOfRange {
            line,
            available: line_count(source),
        });
    };

    let gutter = " ".repeat(digit_width(line));
    let indent = " ".repeat(column.saturating_sub(1));
    let carets = "^".repeat(token_len.max(1));

    let mut out = String::new();
    out.push_str(&format!("{gutter} ┌─ {file}:{line}:{column}\n"));
    out.push_str(&format!("{gutter} │\n"));
    out.push_str(&format!("{line} │ {text}\n"));
    out.push_str(&format!("{gutter} │ {indent}{carets}"));
    Ok(out)
}
