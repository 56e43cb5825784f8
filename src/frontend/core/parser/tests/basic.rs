//! 基础语法解析测试

use super::{parse_ok, single};
use crate::frontend::core::parser::ast::*;

#[test]
fn test_atomic_block_with_id_and_property() {
    let program = parse_ok(r#"@atomic[myBlock] { name: "test"; }"#);
    assert_eq!(program.body.len(), 1);

    match &program.body[0].kind {
        NodeKind::AtomicBlock { block_type, id, body } => {
            assert_eq!(block_type, "atomic");
            assert_eq!(id.as_deref(), Some("myBlock"));
            assert_eq!(body.len(), 1);
            let (name, value) = body[0].as_property().unwrap();
            assert_eq!(name, "name");
            assert_eq!(value.kind, NodeKind::Literal {
                value: LiteralValue::String("test".to_string())
            });
        }
        other => panic!("Expected AtomicBlock, got {:?}", other),
    }
}

#[test]
fn test_unknown_keyword_is_generic_block() {
    let node = single("@card[c1] { title: \"Hi\" }");
    assert_eq!(node.block_type(), Some("card"));
    assert_eq!(node.block_id(), Some("c1"));
}

#[test]
fn test_block_without_body() {
    let node = single("@system");
    match node.kind {
        NodeKind::AtomicBlock { block_type, id, body } => {
            assert_eq!(block_type, "system");
            assert!(id.is_none());
            assert!(body.is_empty());
        }
        other => panic!("Expected AtomicBlock, got {:?}", other),
    }
}

#[test]
fn test_properties_separated_by_newlines_and_commas() {
    let node = single("@block {\n  a: 1\n  b: 2, c: 3;\n}");
    let names: Vec<_> = node
        .body()
        .unwrap()
        .iter()
        .filter_map(|n| n.as_property().map(|(name, _)| name))
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_string_property_name() {
    let node = single("@block { \"data-id\": 7 }");
    let (name, _) = node.body().unwrap()[0].as_property().unwrap();
    assert_eq!(name, "data-id");
}

#[test]
fn test_dom_selector_is_raw_text() {
    let node = single("@dom div.card > span[title] { text: \"x\" }");
    match node.kind {
        NodeKind::DomBlock { selector, id, body } => {
            assert_eq!(selector, "div.card > span");
            assert_eq!(id.as_deref(), Some("title"));
            assert_eq!(body.len(), 1);
        }
        other => panic!("Expected DomBlock, got {:?}", other),
    }
}

#[test]
fn test_dom_default_selector() {
    let node = single("@dom { }");
    assert_eq!(
        node.kind,
        NodeKind::DomBlock {
            selector: "div".to_string(),
            id: None,
            body: vec![]
        }
    );
}

#[test]
fn test_dom_attribute_selector_is_not_an_id() {
    let node = single("@dom input[type=\"text\"] { }");
    match node.kind {
        NodeKind::DomBlock { selector, id, .. } => {
            assert_eq!(selector, "input[type=\"text\"]");
            assert!(id.is_none());
        }
        other => panic!("Expected DomBlock, got {:?}", other),
    }
}

#[test]
fn test_component_with_params() {
    let node = single("@component Card[main](title, body) { heading: title }");
    match node.kind {
        NodeKind::ComponentDef { name, id, params, body } => {
            assert_eq!(name, "Card");
            assert_eq!(id.as_deref(), Some("main"));
            assert_eq!(params, vec!["title", "body"]);
            assert_eq!(body.len(), 1);
        }
        other => panic!("Expected ComponentDef, got {:?}", other),
    }
}

#[test]
fn test_nested_blocks() {
    let node = single("@dom main {\n  @dom header[top] { }\n  @atomic { x: 1 }\n}");
    let body = node.body().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].block_id(), Some("top"));
    assert_eq!(body[1].block_type(), Some("atomic"));
}

#[test]
fn test_propose_with_constraint() {
    let node = single("@propose[p] {\n  count: 1\n  @constraint positive: {{count}} > 0\n}");
    match node.kind {
        NodeKind::StateProposal { id, body } => {
            assert_eq!(id.as_deref(), Some("p"));
            assert_eq!(body.len(), 2);
            match &body[1].kind {
                NodeKind::Constraint { name, condition } => {
                    assert_eq!(name, "positive");
                    assert_eq!(condition.type_name(), "BinaryExpression");
                }
                other => panic!("Expected Constraint, got {:?}", other),
            }
        }
        other => panic!("Expected StateProposal, got {:?}", other),
    }
}

#[test]
fn test_state_forms() {
    let short = single("@state count = 0");
    let long = single("@state { count: 0 }");
    for node in [short, long] {
        match node.kind {
            NodeKind::StateDefinition { properties } => {
                assert_eq!(properties.len(), 1);
                assert_eq!(properties[0].as_property().unwrap().0, "count");
            }
            other => panic!("Expected StateDefinition, got {:?}", other),
        }
    }
}

#[test]
fn test_plugin_directives() {
    let program = parse_ok("@use jsx\n@plugin \"control-flow\" { strict: true }");
    assert_eq!(program.body.len(), 2);
    match &program.body[1].kind {
        NodeKind::PluginDirective { keyword, name, options } => {
            assert_eq!(keyword, "plugin");
            assert_eq!(name, "control-flow");
            assert_eq!(options.len(), 1);
        }
        other => panic!("Expected PluginDirective, got {:?}", other),
    }
}

#[test]
fn test_section_separators_are_skipped() {
    let program = parse_ok("@atomic[a] { }\n---\n@atomic[b] { }");
    assert_eq!(program.body.len(), 2);
}

#[test]
fn test_spans_cover_the_construct() {
    let node = single("@atomic[x] { a: 1 }");
    assert_eq!(node.span.start.offset, 0);
    assert_eq!(node.span.end.offset, 19);
}
