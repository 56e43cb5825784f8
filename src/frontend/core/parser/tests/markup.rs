//! Markup capture through plugin syntax patterns

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::Parser;
use crate::frontend::plugins::SyntaxPattern;

fn patterns() -> Vec<SyntaxPattern> {
    vec![
        SyntaxPattern::new(r"^<[A-Za-z]", "JSXElement", 10).unwrap(),
        SyntaxPattern::new(r"^<[a-z]", "VueElement", 5).unwrap(),
    ]
}

fn parse_markup(source: &str) -> (Program, usize) {
    let patterns = patterns();
    let mut parser = Parser::with_patterns(source, &patterns);
    let program = parser.parse();
    let errors = parser.errors().len();
    (program, errors)
}

fn element(node: &Node) -> (&str, &MarkupElement) {
    match &node.kind {
        NodeKind::PluginNode { node_type, element } => (node_type, element),
        other => panic!("Expected PluginNode, got {:?}", other),
    }
}

#[test]
fn test_markup_is_captured_as_plugin_node() {
    let (program, errors) = parse_markup("<div class=\"box\" hidden>Hello {name}</div>");
    assert_eq!(errors, 0);
    assert_eq!(program.body.len(), 1);

    let (node_type, el) = element(&program.body[0]);
    assert_eq!(node_type, "JSXElement");
    assert_eq!(el.tag, "div");
    assert_eq!(el.attributes.len(), 2);
    assert!(matches!(
        &el.attributes[0].value,
        AttributeValue::Static { text, .. } if text == "box"
    ));
    assert_eq!(el.attributes[1].value, AttributeValue::Flag);

    assert_eq!(el.children.len(), 2);
    assert!(matches!(&el.children[0], MarkupChild::Text { text, .. } if text == "Hello"));
    match &el.children[1] {
        MarkupChild::Expression(expr) => assert_eq!(expr.type_name(), "Identifier"),
        other => panic!("Expected expression child, got {:?}", other),
    }
}

#[test]
fn test_parsing_resumes_after_markup() {
    let source = "<Card title={1 + 2} />\n@atomic[after] { x: 1 }";
    let (program, errors) = parse_markup(source);
    assert_eq!(errors, 0);
    assert_eq!(program.body.len(), 2);

    let (_, el) = element(&program.body[0]);
    assert!(el.self_closing);
    match &el.attributes[0].value {
        AttributeValue::Expression(expr) => {
            assert_eq!(expr.type_name(), "BinaryExpression");
            // positions are relative to the whole file
            assert_eq!(expr.span.start.offset, 13);
        }
        other => panic!("Expected expression attribute, got {:?}", other),
    }

    let after = &program.body[1];
    assert_eq!(after.block_id(), Some("after"));
    assert_eq!(after.span.start.line, 2);
}

#[test]
fn test_nested_elements_and_interpolation() {
    let patterns = vec![SyntaxPattern::new(r"^<[a-z]", "VueElement", 5)
        .unwrap()
        .with_interpolation()];
    let mut parser = Parser::with_patterns("<ul><li>{{ user.name }}</li><li>b</li></ul>", &patterns);
    let program = parser.parse();
    assert!(parser.errors().is_empty());
    let (_, el) = element(&program.body[0]);
    assert_eq!(el.children.len(), 2);
    match &el.children[0] {
        MarkupChild::Element(li) => match &li.children[0] {
            MarkupChild::Expression(expr) => assert_eq!(
                expr.kind,
                NodeKind::Reference {
                    path: "user.name".to_string()
                }
            ),
            other => panic!("Expected interpolation, got {:?}", other),
        },
        other => panic!("Expected element, got {:?}", other),
    }
}

#[test]
fn test_markup_inside_block_body() {
    let (program, errors) = parse_markup("@dom main {\n  <span>hi</span>\n  title: 'x'\n}");
    assert_eq!(errors, 0);
    let body = program.body[0].body().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].type_name(), "PluginNode");
    assert_eq!(body[1].type_name(), "PropertyAssignment");
}

#[test]
fn test_mismatched_closing_tag() {
    let (_, errors) = parse_markup("<div><span></div>");
    assert!(errors >= 1);
}

#[test]
fn test_markup_without_patterns_is_an_error() {
    let mut parser = Parser::new("<div></div>");
    parser.parse();
    assert!(parser.errors()[0].message.contains("Markup"));
}

#[test]
fn test_highest_priority_pattern_wins() {
    let (program, _) = parse_markup("<p>x</p>");
    assert_eq!(element(&program.body[0]).0, "JSXElement");
}

#[test]
fn test_double_brace_is_object_without_interpolation() {
    let (program, errors) = parse_markup("<div style={{ color: \"red\" }}>{{ a: 1 }}</div>");
    assert_eq!(errors, 0);
    let (_, el) = element(&program.body[0]);
    match &el.attributes[0].value {
        AttributeValue::Expression(expr) => assert_eq!(expr.type_name(), "ObjectExpression"),
        other => panic!("Expected expression attribute, got {:?}", other),
    }
    match &el.children[0] {
        MarkupChild::Expression(expr) => assert_eq!(expr.type_name(), "ObjectExpression"),
        other => panic!("Expected expression child, got {:?}", other),
    }
}
