//! The Xolog scanner/lexer.
//!
//! Converts source text into a vector of tokens in one pass. The source is
//! decoded into `char`s up front so the cursor moves over Unicode scalar
//! values with O(1) lookahead.

use crate::char_codes::*;
use crate::token::{Literal, Token, TokenKind};
use xolog_diagnostics::{messages, Diagnostic, DiagnosticCollection, ErrorReporter};

/// The outcome of a completed scan.
#[derive(Debug)]
pub struct ScanResult<R = DiagnosticCollection> {
    /// The tokens, always terminated by an `END` token.
    pub tokens: Vec<Token>,
    /// Whether any lexical error was reported.
    pub had_error: bool,
    /// The reporter the scanner wrote its errors to.
    pub reporter: R,
}

impl ScanResult<DiagnosticCollection> {
    /// The diagnostics collected during the scan.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.reporter
    }
}

impl<R> ScanResult<R> {
    pub fn into_parts(self) -> (Vec<Token>, bool) {
        (self.tokens, self.had_error)
    }
}

/// Scan a complete source text, collecting errors as diagnostics.
pub fn scan(source: &str) -> ScanResult {
    Scanner::new(source).scan_tokens()
}

/// Scan a complete source text, forwarding every error to `reporter`.
pub fn scan_with<R: ErrorReporter>(source: &str, reporter: R) -> (Vec<Token>, bool) {
    Scanner::with_reporter(source, reporter)
        .scan_tokens()
        .into_parts()
}

/// The scanner converts Xolog source text into tokens.
///
/// A scanner covers exactly one source text and is consumed by
/// [`scan_tokens`](Scanner::scan_tokens).
pub struct Scanner<R = DiagnosticCollection> {
    /// The source text being scanned.
    text: Vec<char>,
    /// Start of the lexeme being scanned.
    start: usize,
    /// Next unconsumed character.
    current: usize,
    /// Current 1-based line.
    line: usize,
    /// Tokens emitted so far.
    tokens: Vec<Token>,
    /// Sticky: set by the first error and never cleared.
    had_error: bool,
    /// Where lexical errors go.
    reporter: R,
}

impl Scanner<DiagnosticCollection> {
    /// Create a new scanner that collects its errors.
    pub fn new(text: &str) -> Self {
        Self::with_reporter(text, DiagnosticCollection::new())
    }
}

impl<R: ErrorReporter> Scanner<R> {
    /// Create a new scanner that reports errors to `reporter`.
    pub fn with_reporter(text: &str, reporter: R) -> Self {
        Self {
            text: text.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            had_error: false,
            reporter,
        }
    }

    /// Scan the whole source and return the tokens, ending with `END`.
    pub fn scan_tokens(mut self) -> ScanResult<R> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }
        self.tokens.push(Token::end(self.line));

        tracing::trace!(
            tokens = self.tokens.len(),
            lines = self.line,
            had_error = self.had_error,
            "scan finished"
        );

        ScanResult {
            tokens: self.tokens,
            had_error: self.had_error,
            reporter: self.reporter,
        }
    }

    // ========================================================================
    // Token dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let ch = self.advance();
        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => self.add_either(TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_either(TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_either(TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_either(TokenKind::GreaterEqual, TokenKind::Greater),

            BACKSLASH => {
                if self.match_char(BACKSLASH) {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            LINE_FEED => self.line += 1,
            c if is_white_space_single_line(c) => {}

            DOUBLE_QUOTE | SINGLE_QUOTE => self.scan_string(),

            c if is_digit(c) => self.scan_number(),

            c => {
                let text = c.to_string();
                self.error(Diagnostic::at_line(
                    self.line,
                    &messages::UNEXPECTED_CHARACTER_0,
                    &[text.as_str()],
                ));
            }
        }
    }

    /// Emit `long` if the next character is `=`, consuming it, else `short`.
    fn add_either(&mut self, long: TokenKind, short: TokenKind) {
        let kind = if self.match_char(EQUALS) { long } else { short };
        self.add_token(kind);
    }

    fn skip_line_comment(&mut self) {
        while self.peek() != LINE_FEED && !self.is_at_end() {
            self.advance();
        }
    }

    fn scan_string(&mut self) {
        while !is_quote(self.peek()) && !self.is_at_end() {
            if self.peek() == LINE_FEED {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error(Diagnostic::at_line(
                self.line,
                &messages::UNTERMINATED_STRING,
                &[],
            ));
            return;
        }

        // The closing quote.
        self.advance();

        let value = self.chars_to_string(self.start + 1, self.current - 1);
        self.add_literal(TokenKind::String, Literal::Text(value));
    }

    fn scan_number(&mut self) {
        self.scan_digits();

        // A '.' only belongs to the number when a digit follows it.
        if self.peek() == DOT && is_digit(self.peek_next()) {
            self.advance();
            self.scan_digits();
        }

        let text = self.chars_to_string(self.start, self.current);
        match text.parse::<f64>() {
            Ok(value) => self.add_literal(TokenKind::Number, Literal::Number(value)),
            Err(_) => self.error(Diagnostic::at_line(
                self.line,
                &messages::INVALID_NUMBER_0,
                &[text.as_str()],
            )),
        }
    }

    fn scan_digits(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }
    }

    // ========================================================================
    // Token construction and errors
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, Literal::None);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Literal) {
        let lexeme = self.chars_to_string(self.start, self.current);
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            line = self.line,
            lexeme = %self.chars_to_string(self.start, self.current),
            code = diagnostic.code,
            "lexer error: {}",
            diagnostic.message_text
        );
        self.had_error = true;
        self.reporter.report_diagnostic(diagnostic);
    }

    fn chars_to_string(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }

    // ========================================================================
    // Cursor primitives
    // ========================================================================

    /// Consume and return the next character. Returns NUL at end of input
    /// without moving.
    #[inline]
    fn advance(&mut self) -> char {
        match self.text.get(self.current) {
            Some(&ch) => {
                self.current += 1;
                ch
            }
            None => NULL_CHARACTER,
        }
    }

    #[inline]
    fn peek(&self) -> char {
        self.text.get(self.current).copied().unwrap_or(NULL_CHARACTER)
    }

    #[inline]
    fn peek_next(&self) -> char {
        self.text
            .get(self.current + 1)
            .copied()
            .unwrap_or(NULL_CHARACTER)
    }

    #[inline]
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.text[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.text.len()
    }
}
