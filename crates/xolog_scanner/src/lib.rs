//! xolog_scanner: Lexer/tokenizer for Xolog source code.
//!
//! The scanner makes a single left-to-right pass over the source and
//! produces a token sequence terminated by an `END` token, with support for:
//! - Single- and two-character operators (longest match wins)
//! - `\\` line comments
//! - Single- or double-quoted, possibly multi-line, string literals
//! - Decimal number literals with an optional fractional part
//!
//! Lexical errors never abort a scan. They are reported through an
//! [`ErrorReporter`](xolog_diagnostics::ErrorReporter) and recorded in a
//! sticky error flag returned with the tokens.

mod char_codes;
mod scanner;
mod token;

pub use scanner::{scan, scan_with, ScanResult, Scanner};
pub use token::{Literal, Token, TokenKind};
