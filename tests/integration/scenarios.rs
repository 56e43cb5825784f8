//! End-to-end scenarios through the public API

use asxr::frontend::core::parser::ast::{BinaryOp, LiteralValue, NodeKind};
use asxr::frontend::core::parser::parse_expression;
use asxr::frontend::plugins::PluginError;
use asxr::{parse, validate, PluginRegistry, ValidateOptions};

#[test]
fn test_atomic_block_with_property() {
    let program = parse(r#"@atomic[myBlock] { name: "test"; }"#);
    assert_eq!(program.body.len(), 1);

    match &program.body[0].kind {
        NodeKind::AtomicBlock { block_type, id, body } => {
            assert_eq!(block_type, "atomic");
            assert_eq!(id.as_deref(), Some("myBlock"));
            assert_eq!(body.len(), 1);
            match &body[0].kind {
                NodeKind::PropertyAssignment { name, value } => {
                    assert_eq!(name, "name");
                    assert_eq!(
                        value.kind,
                        NodeKind::Literal {
                            value: LiteralValue::String("test".to_string())
                        }
                    );
                }
                other => panic!("Expected PropertyAssignment, got {:?}", other),
            }
        }
        other => panic!("Expected AtomicBlock, got {:?}", other),
    }
}

#[test]
fn test_state_reference_expression() {
    let node = parse_expression("{{user.name}}").unwrap();
    assert_eq!(
        node.kind,
        NodeKind::Reference {
            path: "user.name".to_string()
        }
    );
}

#[test]
fn test_block_reference_expression() {
    let node = parse_expression("#myBlock").unwrap();
    assert_eq!(
        node.kind,
        NodeKind::BlockReference {
            name: "myBlock".to_string()
        }
    );
}

#[test]
fn test_if_else() {
    let program = parse("@if (x > 10) { value: true } @else { value: false }");
    assert_eq!(program.body.len(), 1);

    match &program.body[0].kind {
        NodeKind::IfStatement {
            condition,
            alternate,
            ..
        } => {
            assert!(matches!(
                condition.kind,
                NodeKind::BinaryExpression {
                    operator: BinaryOp::Gt,
                    ..
                }
            ));
            let alternate = alternate.as_ref().unwrap();
            assert_eq!(alternate.len(), 1);
            assert!(matches!(alternate[0].kind, NodeKind::PropertyAssignment { .. }));
        }
        other => panic!("Expected IfStatement, got {:?}", other),
    }
}

#[test]
fn test_duplicate_ids_invalidate() {
    let program = parse("@atomic[dup] { }\n@block[dup] { }");
    let result = validate(&program, &ValidateOptions::default());

    assert!(!result.valid);
    assert_eq!(result.with_code("DUPLICATE_ID").count(), 1);
}

#[test]
fn test_jsx_and_vue_conflict() {
    let registry = PluginRegistry::with_builtins();
    let err = registry.resolve(&["jsx", "vue"]).unwrap_err();
    assert!(matches!(err, PluginError::Conflict { .. }));

    // either order
    let err = registry.resolve(&["vue", "jsx"]).unwrap_err();
    assert!(matches!(err, PluginError::Conflict { .. }));
}

#[test]
fn test_undefined_reference() {
    let program = parse("@atomic[a] { target: #missing }");
    let result = validate(&program, &ValidateOptions::default());
    assert_eq!(result.with_code("UNDEFINED_REFERENCE").count(), 1);

    let options = ValidateOptions {
        check_references: false,
        ..ValidateOptions::default()
    };
    assert!(validate(&program, &options).valid);
}
