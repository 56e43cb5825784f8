//! Lexer tests module
//!
//! - basic: 标识符、空白符、换行
//! - literals: 字符串、数字、引用
//! - operators: 运算符与最长匹配
//! - errors: 错误 token 与恢复

mod literals;

use crate::frontend::core::lexer::{tokenize, TokenKind};

/// Token kinds without the trailing `Eof`
pub(super) fn kinds(source: &str) -> Vec<TokenKind> {
    let mut tokens: Vec<TokenKind> = tokenize(source).into_iter().map(|t| t.kind).collect();
    assert_eq!(tokens.pop(), Some(TokenKind::Eof));
    tokens
}
