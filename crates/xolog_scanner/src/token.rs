//! Tokens produced by the scanner.

use serde::Serialize;
use std::fmt;

/// All token kinds in Xolog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Star,
    Slash,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Literals
    String,
    Number,

    End,
}

impl TokenKind {
    /// The stable upper-case name of this kind, e.g. `BANG_EQUAL`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::End => "END",
        }
    }

    /// Whether tokens of this kind carry a literal value.
    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::String | TokenKind::Number)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The decoded value carried by a token.
///
/// `None` and `Text(String::new())` are distinct: the first means the token
/// has no literal, the second is an empty string literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// No literal. Every token except STRING and NUMBER carries this.
    None,
    /// The characters between a string's quotes.
    Text(String),
    /// The parsed value of a NUMBER lexeme.
    Number(f64),
}

impl Literal {
    /// Whether the token carries no literal value.
    pub fn is_none(&self) -> bool {
        matches!(self, Literal::None)
    }

    /// The decoded text of a STRING literal, quotes excluded.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The value of a NUMBER literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => f.write_str("nil"),
            Literal::Text(text) => f.write_str(text),
            Literal::Number(value) => write!(f, "{}", value),
        }
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The exact source text of the token. Empty for `END`.
    pub lexeme: String,
    /// The literal value, for `STRING` and `NUMBER` tokens.
    pub literal: Literal,
    /// The line the scanner was on when the token was completed.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Literal, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    /// The end-of-input marker.
    pub fn end(line: usize) -> Self {
        Self::new(TokenKind::End, "", Literal::None, line)
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.lexeme, self.literal)
    }
}
