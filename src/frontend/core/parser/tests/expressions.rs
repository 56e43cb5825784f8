//! 表达式解析测试

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parse_expression;
use crate::frontend::core::parser::pratt::nud::LAMBDA_RETURN;

fn expr(source: &str) -> Node {
    parse_expression(source).unwrap_or_else(|e| panic!("{}: {}", source, e))
}

fn binary(node: &Node) -> (BinaryOp, &Node, &Node) {
    match &node.kind {
        NodeKind::BinaryExpression { operator, left, right } => (*operator, left, right),
        other => panic!("Expected BinaryExpression, got {:?}", other),
    }
}

#[test]
fn test_reference_path() {
    assert_eq!(
        expr("{{user.name}}").kind,
        NodeKind::Reference {
            path: "user.name".to_string()
        }
    );
}

#[test]
fn test_block_reference() {
    assert_eq!(
        expr("#myBlock").kind,
        NodeKind::BlockReference {
            name: "myBlock".to_string()
        }
    );
}

#[test]
fn test_factor_binds_tighter() {
    let node = expr("1 + 2 * 3");
    let (op, left, right) = binary(&node);
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(left.kind, NodeKind::Literal { value: LiteralValue::Number(1.0) });
    assert_eq!(binary(right).0, BinaryOp::Mul);
}

#[test]
fn test_left_associative() {
    let node = expr("10 - 4 - 3");
    let (op, left, right) = binary(&node);
    assert_eq!(op, BinaryOp::Sub);
    assert_eq!(binary(left).0, BinaryOp::Sub);
    assert_eq!(right.kind, NodeKind::Literal { value: LiteralValue::Number(3.0) });
}

#[test]
fn test_logical_precedence() {
    let node = expr("a || b && c == d");
    let (op, _, right) = binary(&node);
    assert_eq!(op, BinaryOp::Or);
    let (op, _, right) = binary(right);
    assert_eq!(op, BinaryOp::And);
    assert_eq!(binary(right).0, BinaryOp::Eq);
}

#[test]
fn test_strict_equality_and_comparison() {
    let node = expr("x !== 1");
    assert_eq!(binary(&node).0, BinaryOp::StrictNe);
    let node = expr("x >= 1");
    assert_eq!(binary(&node).0, BinaryOp::Ge);
}

#[test]
fn test_unary_operators() {
    let node = expr("!done");
    match node.kind {
        NodeKind::UnaryExpression { operator, argument } => {
            assert_eq!(operator, UnaryOp::Not);
            assert_eq!(argument.type_name(), "Identifier");
        }
        other => panic!("Expected UnaryExpression, got {:?}", other),
    }

    let node = expr("-x * 2");
    let (op, left, _) = binary(&node);
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(left.type_name(), "UnaryExpression");
}

#[test]
fn test_signed_number_literal() {
    assert_eq!(
        expr("-5").kind,
        NodeKind::Literal { value: LiteralValue::Number(-5.0) }
    );
    // after a value, `-` is subtraction
    assert_eq!(binary(&expr("a-1")).0, BinaryOp::Sub);
}

#[test]
fn test_grouping() {
    let node = expr("(1 + 2) * 3");
    let (op, left, _) = binary(&node);
    assert_eq!(op, BinaryOp::Mul);
    assert_eq!(binary(left).0, BinaryOp::Add);
}

#[test]
fn test_dotted_identifier() {
    assert_eq!(
        expr("item.price").kind,
        NodeKind::Identifier {
            name: "item.price".to_string()
        }
    );
}

#[test]
fn test_literals() {
    assert_eq!(expr("true").kind, NodeKind::Literal { value: LiteralValue::Boolean(true) });
    assert_eq!(expr("null").kind, NodeKind::Literal { value: LiteralValue::Null });
    assert_eq!(
        expr("'hi'").kind,
        NodeKind::Literal { value: LiteralValue::String("hi".to_string()) }
    );
}

#[test]
fn test_array_and_object() {
    match expr("[1, 'two', {{three}}]").kind {
        NodeKind::ArrayExpression { elements } => assert_eq!(elements.len(), 3),
        other => panic!("Expected ArrayExpression, got {:?}", other),
    }

    match expr("{ a: 1, 'b': [2]\n c: true }").kind {
        NodeKind::ObjectExpression { properties } => {
            let names: Vec<_> = properties.iter().filter_map(|p| p.as_property()).map(|(n, _)| n).collect();
            assert_eq!(names, vec!["a", "b", "c"]);
        }
        other => panic!("Expected ObjectExpression, got {:?}", other),
    }
}

#[test]
fn test_multiline_array() {
    match expr("[\n  1,\n  2,\n]").kind {
        NodeKind::ArrayExpression { elements } => assert_eq!(elements.len(), 2),
        other => panic!("Expected ArrayExpression, got {:?}", other),
    }
}

#[test]
fn test_lambda_with_expression_body() {
    match expr("(a, b) => a + b").kind {
        NodeKind::LambdaExpression { params, body } => {
            assert_eq!(params, vec!["a", "b"]);
            assert_eq!(body.len(), 1);
            let (name, value) = body[0].as_property().unwrap();
            assert_eq!(name, LAMBDA_RETURN);
            assert_eq!(value.type_name(), "BinaryExpression");
        }
        other => panic!("Expected LambdaExpression, got {:?}", other),
    }
}

#[test]
fn test_lambda_single_param_and_empty_params() {
    match expr("x => x").kind {
        NodeKind::LambdaExpression { params, .. } => assert_eq!(params, vec!["x"]),
        other => panic!("Expected LambdaExpression, got {:?}", other),
    }
    match expr("() => 1").kind {
        NodeKind::LambdaExpression { params, .. } => assert!(params.is_empty()),
        other => panic!("Expected LambdaExpression, got {:?}", other),
    }
}

#[test]
fn test_lambda_with_statement_body() {
    match expr("() => {\n  @set count = count + 1\n}").kind {
        NodeKind::LambdaExpression { body, .. } => {
            assert_eq!(body.len(), 1);
            assert_eq!(body[0].type_name(), "AssignmentStatement");
        }
        other => panic!("Expected LambdaExpression, got {:?}", other),
    }
}

#[test]
fn test_parenthesised_identifier_is_not_a_lambda() {
    assert_eq!(
        expr("(a)").kind,
        NodeKind::Identifier { name: "a".to_string() }
    );
    assert_eq!(binary(&expr("(a) + 1")).0, BinaryOp::Add);
}

#[test]
fn test_trailing_tokens_are_an_error() {
    let err = parse_expression("1 2").unwrap_err();
    assert!(err.message.contains("Unexpected token"));
}

#[test]
fn test_lex_error_message_is_kept() {
    let err = parse_expression("a & b").unwrap_err();
    assert!(err.is_lex_error());
}
