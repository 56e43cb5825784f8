//! Literal scanning implementations
//! Handles numbers, strings, references and identifier bodies

use super::tokenizer::Lexer;
use crate::frontend::core::lexer::tokens::*;

/// Scan a number literal: `-?digits(.digits)?([eE][+-]?digits)?`
///
/// `first_char` is the already-consumed first digit or sign.
pub fn scan_number(
    lexer: &mut Lexer<'_>,
    first_char: char,
) -> Token {
    let mut value = String::new();
    value.push(first_char);

    consume_digits(lexer, &mut value);

    // Fraction, only when a digit follows the dot
    if lexer.peek() == Some('.') && lexer.peek_next().map(is_digit).unwrap_or(false) {
        lexer.advance();
        value.push('.');
        consume_digits(lexer, &mut value);
    }

    // Exponent, only when well-formed; `1em` stays a number followed by `em`
    if matches!(lexer.peek(), Some('e') | Some('E')) {
        let mut lookahead = lexer.peek_chars();
        lookahead.next();
        let well_formed = match lookahead.next() {
            Some('+') | Some('-') => lookahead.next().map(is_digit).unwrap_or(false),
            Some(c) => is_digit(c),
            None => false,
        };
        if well_formed {
            value.push(lexer.advance().unwrap_or('e'));
            if matches!(lexer.peek(), Some('+') | Some('-')) {
                value.push(lexer.advance().unwrap_or('+'));
            }
            consume_digits(lexer, &mut value);
        }
    }

    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => lexer.make_token(TokenKind::Number(n)),
        _ => lexer.error_token(LexError::InvalidNumber(value)),
    }
}

fn consume_digits(
    lexer: &mut Lexer<'_>,
    value: &mut String,
) {
    while let Some(c) = lexer.peek() {
        if !is_digit(c) {
            break;
        }
        value.push(c);
        lexer.advance();
    }
}

/// Scan a string literal delimited by `quote` (already consumed)
pub fn scan_string(
    lexer: &mut Lexer<'_>,
    quote: char,
) -> Token {
    let start = lexer.start_position();
    let mut value = String::new();

    while let Some(c) = lexer.peek() {
        match c {
            c if c == quote => {
                lexer.advance();
                return lexer.make_token_with_value(TokenKind::String(value.clone()), value);
            }
            '\n' => break,
            '\\' => {
                lexer.advance();
                match lexer.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some('u') => scan_unicode_escape(lexer, &mut value),
                    // `\\`, `\"`, `\'` and unknown escapes keep the escaped char
                    Some(other) => value.push(other),
                    None => break,
                }
            }
            c => {
                value.push(c);
                lexer.advance();
            }
        }
    }

    lexer.error_token(LexError::UnterminatedString {
        position: start.to_string(),
    })
}

/// `\uXXXX` or `\u{X…}`; malformed sequences keep a literal `u`
fn scan_unicode_escape(
    lexer: &mut Lexer<'_>,
    value: &mut String,
) {
    if lexer.peek() == Some('{') {
        let mut lookahead = lexer.peek_chars();
        lookahead.next();
        let hex: String = lookahead.by_ref().take_while(|c| *c != '}').collect();
        let decoded = (!hex.is_empty() && hex.len() <= 6 && hex.chars().all(is_hex_digit))
            .then(|| u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32))
            .flatten();
        match decoded {
            Some(ch) => {
                // `{`, the digits and `}`
                for _ in 0..hex.len() + 2 {
                    lexer.advance();
                }
                value.push(ch);
            }
            None => value.push('u'),
        }
        return;
    }

    let hex: String = lexer.peek_chars().take(4).collect();
    let decoded = (hex.len() == 4 && hex.chars().all(is_hex_digit))
        .then(|| u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32))
        .flatten();
    match decoded {
        Some(ch) => {
            for _ in 0..4 {
                lexer.advance();
            }
            value.push(ch);
        }
        None => value.push('u'),
    }
}

/// Scan `{{ path }}` (the opening braces are consumed)
pub fn scan_reference(lexer: &mut Lexer<'_>) -> Token {
    let start = lexer.start_position();
    let mut path = String::new();

    while let Some(c) = lexer.peek() {
        if c == '}' && lexer.peek_next() == Some('}') {
            lexer.advance();
            lexer.advance();
            let path = path.trim().to_string();
            if path.is_empty() {
                return lexer.error_token(LexError::InvalidReference {
                    reason: "empty reference".to_string(),
                });
            }
            return lexer.make_token_with_value(TokenKind::Reference(path.clone()), path);
        }
        if c == '\n' {
            break;
        }
        path.push(c);
        lexer.advance();
    }

    lexer.error_token(LexError::UnterminatedReference {
        position: start.to_string(),
    })
}

/// Continue an identifier: alphanumerics, `_`, `$`, and a `-` only when a
/// letter follows it (`font-size`, but `a-1` stops before the dash).
pub fn scan_identifier_body(
    lexer: &mut Lexer<'_>,
    value: &mut String,
) {
    while let Some(c) = lexer.peek() {
        if is_identifier_char(c) {
            value.push(c);
            lexer.advance();
        } else if c == '-' && lexer.peek_next().map(char::is_alphabetic).unwrap_or(false) {
            value.push(c);
            lexer.advance();
        } else {
            break;
        }
    }
}

/// Check if character is valid identifier start
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

/// Check if character is valid identifier continuation
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$' || unicode_ident::is_xid_continue(c)
}

/// Check if character is a digit
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Check if character is a hexadecimal digit
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}
