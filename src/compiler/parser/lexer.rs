//! A deliberately small JavaScript tokenizer.
//!
//! It only distinguishes what dependency scanning needs: identifiers,
//! string literals, punctuation and the `=>` arrow. Comments, template
//! literals, regular expressions and numbers are consumed so their contents
//! never look like code.

use super::{ParseError, parse_failed};
use super::reader::CharReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenKind {
    Ident,
    Str,
    Template,
    Regex,
    Number,
    Arrow,
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token<'a> {
    pub kind: TokenKind,
    /// Raw source text of the token.
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    /// 0-based char column.
    pub column: usize,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct(ch)
    }

    /// Contents of a string literal without its quotes.
    pub fn string_value(&self) -> Option<&'a str> {
        if self.kind != TokenKind::Str || self.text.len() < 2 {
            return None;
        }
        Some(&self.text[1..self.text.len() - 1])
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

/// Keywords after which a `{` opens a statement block.
const BLOCK_KEYWORDS: &[&str] = &["else", "do", "try", "finally"];

pub(super) struct Lexer<'a> {
    reader: CharReader<'a>,
    tokens: Vec<Token<'a>>,
    errors: Vec<ParseError>,
    /// One entry per open brace: whether it opened a statement block rather
    /// than an object literal.
    braces: Vec<bool>,
    /// The last `}` closed a statement block.
    closed_block: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            reader: CharReader::new(source),
            tokens: Vec::new(),
            errors: Vec::new(),
            braces: Vec::new(),
            closed_block: false,
        }
    }

    pub fn tokenize(mut self) -> (Vec<Token<'a>>, Vec<ParseError>) {
        while let Some(ch) = self.reader.current() {
            let start = self.reader.position();
            let line = self.reader.line();
            let column = self.reader.column();

            let kind = match ch {
                c if c.is_whitespace() => {
                    self.reader.advance();
                    continue;
                }
                '/' if self.reader.peek() == Some('/') => {
                    self.reader.advance_while(|c| c != '\n');
                    continue;
                }
                '/' if self.reader.peek() == Some('*') => {
                    self.skip_block_comment(line, column);
                    continue;
                }
                '/' if self.regex_allowed() => {
                    self.read_regex();
                    TokenKind::Regex
                }
                '\'' | '"' => {
                    self.read_string(ch, line, column);
                    TokenKind::Str
                }
                '`' => {
                    self.read_template(line, column);
                    TokenKind::Template
                }
                '=' if self.reader.peek() == Some('>') => {
                    self.reader.advance();
                    self.reader.advance();
                    TokenKind::Arrow
                }
                c if c.is_ascii_digit() => {
                    self.reader
                        .advance_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
                    TokenKind::Number
                }
                c if is_ident_start(c) => {
                    self.reader.advance_while(is_ident_continue);
                    TokenKind::Ident
                }
                '{' => {
                    let block = self.brace_opens_block();
                    self.braces.push(block);
                    self.reader.advance();
                    TokenKind::Punct('{')
                }
                '}' => {
                    self.closed_block = self.braces.pop().unwrap_or(true);
                    self.reader.advance();
                    TokenKind::Punct('}')
                }
                other => {
                    self.reader.advance();
                    TokenKind::Punct(other)
                }
            };

            let end = self.reader.position();
            self.tokens.push(Token {
                kind,
                text: self.reader.slice(start, end),
                start,
                end,
                line,
                column,
            });
        }

        (self.tokens, self.errors)
    }

    /// A `/` starts a regex unless it follows something that ends an expression.
    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(token) => match token.kind {
                TokenKind::Punct(')') | TokenKind::Punct(']') => false,
                TokenKind::Punct('}') => self.closed_block,
                TokenKind::Punct('+') | TokenKind::Punct('-') => !self.after_postfix_update(),
                TokenKind::Punct(_) | TokenKind::Arrow => true,
                TokenKind::Ident => REGEX_PREFIX_KEYWORDS.contains(&token.text),
                _ => false,
            },
        }
    }

    /// The last two tokens are an adjacent `++` or `--` applied to the
    /// expression before them, as in `i++ / 2`.
    fn after_postfix_update(&self) -> bool {
        let [.., operand, first, second] = self.tokens.as_slice() else {
            return false;
        };
        first.kind == second.kind && first.end == second.start && ends_expression(operand)
    }

    /// Decided from the token before the `{`: statement position and
    /// control heads open blocks, expression position opens an object.
    fn brace_opens_block(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(token) => match token.kind {
                TokenKind::Punct(')' | ';' | '{' | '}') | TokenKind::Arrow => true,
                TokenKind::Ident => {
                    BLOCK_KEYWORDS.contains(&token.text)
                        || !REGEX_PREFIX_KEYWORDS.contains(&token.text)
                }
                _ => false,
            },
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) {
        self.reader.advance(); // consume '/'
        self.reader.advance(); // consume '*'
        while let Some(ch) = self.reader.current() {
            if ch == '*' && self.reader.peek() == Some('/') {
                self.reader.advance();
                self.reader.advance();
                return;
            }
            self.reader.advance();
        }
        self.error("Unterminated comment", line, column, 2);
    }

    fn read_string(&mut self, quote: char, line: usize, column: usize) {
        self.reader.advance();
        while let Some(ch) = self.reader.current() {
            match ch {
                '\\' => {
                    self.reader.advance();
                    self.reader.advance();
                }
                '\n' => break,
                c if c == quote => {
                    self.reader.advance();
                    return;
                }
                _ => {
                    self.reader.advance();
                }
            }
        }
        self.error("Unterminated string constant", line, column, 1);
    }

    fn read_template(&mut self, line: usize, column: usize) {
        self.reader.advance();
        let mut depth = 0usize;
        while let Some(ch) = self.reader.current() {
            match ch {
                '\\' => {
                    self.reader.advance();
                    self.reader.advance();
                }
                '$' if depth == 0 && self.reader.peek() == Some('{') => {
                    self.reader.advance();
                    self.reader.advance();
                    depth = 1;
                }
                '{' if depth > 0 => {
                    depth += 1;
                    self.reader.advance();
                }
                '}' if depth > 0 => {
                    depth -= 1;
                    self.reader.advance();
                }
                '`' if depth == 0 => {
                    self.reader.advance();
                    return;
                }
                _ => {
                    self.reader.advance();
                }
            }
        }
        self.error("Unterminated template", line, column, 1);
    }

    fn read_regex(&mut self) {
        self.reader.advance(); // consume opening '/'
        let mut in_class = false;
        while let Some(ch) = self.reader.current() {
            match ch {
                '\\' => {
                    self.reader.advance();
                    self.reader.advance();
                    continue;
                }
                '\n' => return,
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    self.reader.advance();
                    self.reader.advance_while(is_ident_continue);
                    return;
                }
                _ => {}
            }
            self.reader.advance();
        }
    }

    fn error(&mut self, message: &str, line: usize, column: usize, length: usize) {
        self.errors.push(ParseError {
            message: parse_failed(message),
            line,
            column: column + 1,
            length,
        });
    }
}

fn ends_expression(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::Ident => !REGEX_PREFIX_KEYWORDS.contains(&token.text),
        TokenKind::Punct(')') | TokenKind::Punct(']') => true,
        _ => false,
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}
