//! Precedence handling for Pratt parser
//!
//! Binding power levels, loosest to tightest. All binary operators are
//! left-associative.

use crate::frontend::core::lexer::tokens::TokenKind;
use crate::frontend::core::parser::ast::BinaryOp;

/// Binding power levels for Pratt parser
pub const BP_LOWEST: u8 = 0;
pub const BP_LOGICAL_OR: u8 = 2;
pub const BP_LOGICAL_AND: u8 = 3;
pub const BP_EQUALITY: u8 = 4;
pub const BP_COMPARISON: u8 = 5;
pub const BP_TERM: u8 = 6;
pub const BP_FACTOR: u8 = 7;
pub const BP_UNARY: u8 = 8;

/// Binding power and operator for an infix token
pub fn infix_binding_power(kind: &TokenKind) -> Option<(u8, BinaryOp)> {
    let entry = match kind {
        TokenKind::Or => (BP_LOGICAL_OR, BinaryOp::Or),
        TokenKind::And => (BP_LOGICAL_AND, BinaryOp::And),
        TokenKind::EqEq => (BP_EQUALITY, BinaryOp::Eq),
        TokenKind::Neq => (BP_EQUALITY, BinaryOp::Ne),
        TokenKind::EqEqEq => (BP_EQUALITY, BinaryOp::StrictEq),
        TokenKind::NeqEq => (BP_EQUALITY, BinaryOp::StrictNe),
        TokenKind::Lt => (BP_COMPARISON, BinaryOp::Lt),
        TokenKind::Gt => (BP_COMPARISON, BinaryOp::Gt),
        TokenKind::Le => (BP_COMPARISON, BinaryOp::Le),
        TokenKind::Ge => (BP_COMPARISON, BinaryOp::Ge),
        TokenKind::Plus => (BP_TERM, BinaryOp::Add),
        TokenKind::Minus => (BP_TERM, BinaryOp::Sub),
        TokenKind::Star => (BP_FACTOR, BinaryOp::Mul),
        TokenKind::Slash => (BP_FACTOR, BinaryOp::Div),
        TokenKind::Percent => (BP_FACTOR, BinaryOp::Mod),
        _ => return None,
    };
    Some(entry)
}

/// Binding power of a binary operator, used when printing to decide parentheses
pub fn operator_binding_power(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => BP_LOGICAL_OR,
        BinaryOp::And => BP_LOGICAL_AND,
        BinaryOp::Eq | BinaryOp::Ne | BinaryOp::StrictEq | BinaryOp::StrictNe => BP_EQUALITY,
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => BP_COMPARISON,
        BinaryOp::Add | BinaryOp::Sub => BP_TERM,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => BP_FACTOR,
    }
}
