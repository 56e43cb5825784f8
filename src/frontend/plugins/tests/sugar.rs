//! Control-flow sugar tests

use super::compile_with;
use crate::frontend::core::parser::ast::*;
use crate::frontend::plugins::control_flow::rewrite;

#[test]
fn test_elseif_rewrite() {
    assert_eq!(
        rewrite("@if (a) { } @elseif (b) { } @elif (c) { }"),
        "@if (a) { } @else @if (b) { } @else @if (c) { }"
    );
}

#[test]
fn test_unless_rewrite() {
    assert_eq!(rewrite("@unless (a && (b || c)) { }"), "@if (!(a && (b || c))) { }");
    assert_eq!(rewrite("@unless(')') { }"), "@if (!(')')) { }");
}

#[test]
fn test_unless_without_condition_is_untouched() {
    assert_eq!(rewrite("@unless { }"), "@unless { }");
    assert_eq!(rewrite("@unlessly (a)"), "@unlessly (a)");
}

#[test]
fn test_sugar_parses_to_if_chain() {
    let program = compile_with(
        &["control-flow"],
        "@unless (ready) { x: 1 }\n@elseif (late) { x: 2 }",
    );
    assert_eq!(program.body.len(), 1);
    match &program.body[0].kind {
        NodeKind::IfStatement {
            condition,
            alternate,
            ..
        } => {
            assert!(matches!(
                condition.kind,
                NodeKind::UnaryExpression { operator: UnaryOp::Not, .. }
            ));
            assert_eq!(alternate.as_ref().map(|a| a[0].type_name()), Some("IfStatement"));
        }
        other => panic!("Expected IfStatement, got {:?}", other),
    }
}
