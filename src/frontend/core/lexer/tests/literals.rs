//! 字面量测试 - 字符串、数字、引用

use super::kinds;
use crate::frontend::core::lexer::{tokenize, TokenKind};

fn string(s: &str) -> TokenKind {
    TokenKind::String(s.to_string())
}

#[test]
fn test_string_quotes() {
    assert_eq!(kinds(r#""double" 'single'"#), vec![string("double"), string("single")]);
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        kinds(r#""a\nb\t\"q\" \\ \'""#),
        vec![string("a\nb\t\"q\" \\ '")]
    );
}

#[test]
fn test_unicode_escapes() {
    assert_eq!(kinds(r#""A\u{1F600}""#), vec![string("A😀")]);
}

#[test]
fn test_unknown_escape_keeps_character() {
    assert_eq!(kinds(r#""\q""#), vec![string("q")]);
}

#[test]
fn test_string_value_is_decoded() {
    let tokens = tokenize(r#""x\ty""#);
    assert_eq!(tokens[0].value, "x\ty");
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("42 3.14 1e3 2.5E-2"),
        vec![
            TokenKind::Number(42.0),
            TokenKind::Number(3.14),
            TokenKind::Number(1000.0),
            TokenKind::Number(0.025),
        ]
    );
}

#[test]
fn test_number_keeps_raw_lexeme() {
    let tokens = tokenize("1.50");
    assert_eq!(tokens[0].value, "1.50");
}

#[test]
fn test_number_followed_by_unit() {
    assert_eq!(
        kinds("10em"),
        vec![TokenKind::Number(10.0), TokenKind::Identifier("em".to_string())]
    );
}

#[test]
fn test_signed_number_after_colon() {
    assert_eq!(
        kinds("x: -5"),
        vec![
            TokenKind::Identifier("x".to_string()),
            TokenKind::Colon,
            TokenKind::Number(-5.0)
        ]
    );
}

#[test]
fn test_minus_after_value_is_subtraction() {
    assert_eq!(
        kinds("(a)-1"),
        vec![
            TokenKind::LParen,
            TokenKind::Identifier("a".to_string()),
            TokenKind::RParen,
            TokenKind::Minus,
            TokenKind::Number(1.0)
        ]
    );
    assert_eq!(
        kinds("{{n}}-2"),
        vec![
            TokenKind::Reference("n".to_string()),
            TokenKind::Minus,
            TokenKind::Number(2.0)
        ]
    );
}

#[test]
fn test_sign_at_line_start() {
    assert_eq!(
        kinds("a\n-3"),
        vec![
            TokenKind::Identifier("a".to_string()),
            TokenKind::Newline,
            TokenKind::Number(-3.0)
        ]
    );
}

#[test]
fn test_reference_is_trimmed() {
    let tokens = tokenize("{{ user.name }}");
    assert_eq!(tokens[0].kind, TokenKind::Reference("user.name".to_string()));
    assert_eq!(tokens[0].value, "user.name");
}
