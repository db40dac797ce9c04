//! Byte-indexed source reader for the dependency scanner.
//!
//! Invariants:
//! - `position` is a byte offset into `source`.
//! - `current()` returns the decoded scalar at `position`.
//! - Line is 1-based; column is a 0-based char count.

#[derive(Debug, Clone)]
pub(super) struct CharReader<'a> {
    source: &'a str,
    position: usize,
    current_char: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> CharReader<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            current_char: source.chars().next(),
            line: 1,
            column: 0,
        }
    }

    pub(super) fn current(&self) -> Option<char> {
        self.current_char
    }

    pub(super) fn peek(&self) -> Option<char> {
        let ch = self.current_char?;
        self.source[self.position + ch.len_utf8()..].chars().next()
    }

    pub(super) fn position(&self) -> usize {
        self.position
    }

    pub(super) fn line(&self) -> usize {
        self.line
    }

    pub(super) fn column(&self) -> usize {
        self.column
    }

    pub(super) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    pub(super) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char?;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.position += ch.len_utf8();
        self.current_char = self.source[self.position..].chars().next();
        self.current_char
    }

    /// Advance while `predicate` holds for the current char.
    pub(super) fn advance_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(ch) = self.current_char {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
    }
}
