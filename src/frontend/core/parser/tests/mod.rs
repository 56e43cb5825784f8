//! Parser tests
//!
//! - basic: blocks, properties, ids
//! - expressions: precedence, references, lambdas, literals
//! - control_flow: @if/@for/@while/@do/@switch/@set/@call and reactive constructs
//! - recovery: error accumulation and resynchronisation
//! - markup: plugin syntax patterns
//! - walk: traversal order

mod basic;
mod expressions;
mod markup;

use crate::frontend::core::parser::ast::{Node, Program};
use crate::frontend::core::parser::parse_with_errors;

/// Parse and assert there were no errors
pub(super) fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse_with_errors(source);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    program
}

/// The single top-level item of `source`
pub(super) fn single(source: &str) -> Node {
    let mut program = parse_ok(source);
    assert_eq!(program.body.len(), 1, "expected one item, got {:?}", program.body);
    program.body.remove(0)
}
