//! Character code constants used by the scanner.

pub const NULL_CHARACTER: char = '\0';
pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const TAB: char = '\t';
pub const SPACE: char = ' ';

pub const DOUBLE_QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const BACKSLASH: char = '\\';
pub const DOT: char = '.';
pub const EQUALS: char = '=';

/// Check if a character is insignificant whitespace (but not a newline).
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(ch, SPACE | TAB | CARRIAGE_RETURN)
}

/// Check if a character closes a string literal.
#[inline]
pub fn is_quote(ch: char) -> bool {
    ch == DOUBLE_QUOTE || ch == SINGLE_QUOTE
}

/// Check if a character is a decimal digit. Only ASCII digits count.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
