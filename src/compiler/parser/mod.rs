//! Dependency scanning for JavaScript modules.
//!
//! This is not a full parser. It tokenizes the source and looks for static
//! `import`/`export ... from`, `require("...")` and `import("...")` with a
//! string literal argument. It also tracks function bodies closely enough to
//! reject a `return` at module top level.

mod lexer;
mod reader;

use crate::compilation::DependencyKind;
use lexer::{Lexer, Token, TokenKind};

/// A dependency request found in a module's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDependency {
    pub kind: DependencyKind,
    pub request: String,
    pub line: usize,
    /// 1-based char column of the opening quote.
    pub column: usize,
    /// Char length of the literal, quotes included.
    pub length: usize,
    /// Byte range of the literal, quotes included.
    pub span: (usize, usize),
}

/// A syntax problem that prevents the module from being used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    /// 1-based char column.
    pub column: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub dependencies: Vec<ScannedDependency>,
    pub errors: Vec<ParseError>,
    /// Calls whose request is not a string literal and so cannot be bundled.
    pub warnings: Vec<ParseError>,
}

/// Message of an error that makes the module unusable.
fn parse_failed(reason: &str) -> String {
    format!("Module parse failed: {reason}")
}

const EXPRESSION_REQUEST: &str =
    "Critical dependency: the request of a dependency is an expression";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Function,
    Block,
}

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "with"];

const DECLARATION_KEYWORDS: &[&str] = &["function", "class", "const", "let", "var", "default"];

pub fn scan_javascript(source: &str) -> ScanResult {
    let (tokens, errors) = Lexer::new(source).tokenize();
    let mut scanner = Scanner {
        tokens: &tokens,
        result: ScanResult {
            dependencies: Vec::new(),
            errors,
            warnings: Vec::new(),
        },
        braces: Vec::new(),
        parens: Vec::new(),
        last_paren_was_control: false,
        pending_function: false,
        pending_from: None,
    };
    scanner.run();
    scanner.result
}

struct Scanner<'t, 'a> {
    tokens: &'t [Token<'a>],
    result: ScanResult,
    braces: Vec<Frame>,
    /// One entry per open paren: whether it belongs to a control statement.
    parens: Vec<bool>,
    last_paren_was_control: bool,
    /// A `function` keyword was seen and its body has not opened yet.
    pending_function: bool,
    /// An `import`/`export` statement waiting for its `from` clause.
    pending_from: Option<DependencyKind>,
}

impl<'t, 'a> Scanner<'t, 'a> {
    fn run(&mut self) {
        let tokens = self.tokens;
        for (index, token) in tokens.iter().enumerate() {
            let prev = index.checked_sub(1).map(|i| &tokens[i]);
            let member_access = prev.is_some_and(|p| p.is_punct('.'));

            match token.kind {
                TokenKind::Punct('(') => {
                    let control = self.is_control_head(index);
                    self.parens.push(control);
                }
                TokenKind::Punct(')') => {
                    self.last_paren_was_control = self.parens.pop().unwrap_or(false);
                }
                TokenKind::Punct('{') => {
                    let opens_function = self.pending_function
                        || prev.is_some_and(|p| p.kind == TokenKind::Arrow)
                        || (prev.is_some_and(|p| p.is_punct(')')) && !self.last_paren_was_control);
                    self.pending_function = false;
                    self.braces.push(if opens_function {
                        Frame::Function
                    } else {
                        Frame::Block
                    });
                }
                TokenKind::Punct('}') => {
                    self.braces.pop();
                }
                TokenKind::Punct(';') => self.pending_from = None,
                TokenKind::Ident if member_access => {}
                TokenKind::Ident => self.ident(index, token),
                _ => {}
            }
        }
    }

    fn ident(&mut self, index: usize, token: &'t Token<'a>) {
        let tokens = self.tokens;
        let next = tokens.get(index + 1);
        match token.text {
            "function" => {
                self.pending_function = true;
                if self.pending_from == Some(DependencyKind::EsmExport) {
                    self.pending_from = None;
                }
            }
            "return" if !self.braces.contains(&Frame::Function) => {
                self.result.errors.push(ParseError {
                    message: parse_failed("'return' outside of function"),
                    line: token.line,
                    column: token.column + 1,
                    length: token.char_len(),
                });
            }
            "import" => match next {
                Some(next) if next.is_punct('(') => match self.call_argument(index + 1) {
                    Some(literal) => self.push_dependency(DependencyKind::DynamicImport, literal),
                    None => self.push_expression_warning(token),
                },
                Some(next) if next.is_punct('.') => {}
                Some(next) if next.kind == TokenKind::Str => {
                    self.push_dependency(DependencyKind::EsmImport, next);
                }
                _ => self.pending_from = Some(DependencyKind::EsmImport),
            },
            "export" => self.pending_from = Some(DependencyKind::EsmExport),
            "from" => {
                if let Some(kind) = self.pending_from
                    && let Some(next) = next
                    && next.kind == TokenKind::Str
                {
                    self.push_dependency(kind, next);
                    self.pending_from = None;
                }
            }
            "require" if next.is_some_and(|n| n.is_punct('(')) => {
                match self.call_argument(index + 1) {
                    Some(literal) => self.push_dependency(DependencyKind::Require, literal),
                    None => self.push_expression_warning(token),
                }
            }
            keyword
                if self.pending_from == Some(DependencyKind::EsmExport)
                    && DECLARATION_KEYWORDS.contains(&keyword) =>
            {
                self.pending_from = None;
            }
            _ => {}
        }
    }

    /// Whether the paren at `open` follows a control keyword, looking past
    /// the `await` of `for await (...)`.
    fn is_control_head(&self, open: usize) -> bool {
        let keyword = |index: usize| {
            self.tokens
                .get(index)
                .filter(|token| token.kind == TokenKind::Ident)
                .map(|token| token.text)
        };
        match open.checked_sub(1).and_then(keyword) {
            Some("await") => open.checked_sub(2).and_then(keyword) == Some("for"),
            Some(text) => CONTROL_KEYWORDS.contains(&text),
            None => false,
        }
    }

    /// The string literal in `(<literal>)` or `(<literal>, ...)` starting at
    /// the paren at `open`.
    fn call_argument(&self, open: usize) -> Option<&'t Token<'a>> {
        let literal = self.tokens.get(open + 1)?;
        let close = self.tokens.get(open + 2)?;
        (literal.kind == TokenKind::Str && (close.is_punct(')') || close.is_punct(',')))
            .then_some(literal)
    }

    fn push_expression_warning(&mut self, callee: &Token<'a>) {
        self.result.warnings.push(ParseError {
            message: EXPRESSION_REQUEST.to_string(),
            line: callee.line,
            column: callee.column + 1,
            length: callee.char_len(),
        });
    }

    fn push_dependency(&mut self, kind: DependencyKind, literal: &Token<'a>) {
        let Some(request) = literal.string_value() else {
            return;
        };
        self.result.dependencies.push(ScannedDependency {
            kind,
            request: request.to_string(),
            line: literal.line,
            column: literal.column + 1,
            length: literal.char_len(),
            span: (literal.start, literal.end),
        });
    }
}
