//! Character classes for CSS identifiers, strings and whitespace.
//!
//! Shared by the scanner (to decide what starts and continues an identifier)
//! and the renderer (to decide what must be escaped on the way out).

/// Longest hex escape, in digits.
pub const MAX_HEX_LENGTH: usize = 6;

pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '_' || c == '\\' || c >= '\u{a0}'
}

pub fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c >= '\u{a0}'
}

pub fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// CSS whitespace. Vertical tab is not included.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{c}')
}

pub fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Punctuation that is written as `\c` inside an identifier.
pub fn is_ident_escape(c: char) -> bool {
    matches!(
        c,
        '!' | '"'
            | '#'
            | '$'
            | '%'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | '.'
            | '/'
            | ';'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '`'
            | '{'
            | '|'
            | '}'
            | '~'
    )
}

/// Control whitespace that a rendered string carries as a hex escape.
pub fn is_string_escape(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t' | '\u{c}' | '\u{b}')
}

/// Decodes hex digits to a character. Zero, surrogates and values past
/// U+10FFFF become U+FFFD.
pub fn decode_hex(hex: &str) -> char {
    u32::from_str_radix(hex, 16)
        .ok()
        .filter(|&code| code != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
