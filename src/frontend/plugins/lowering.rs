//! Markup lowering: element tree → canonical `DomBlock` nodes
//!
//! Static attributes become literal properties, `{expr}` bindings become
//! expression properties (a bare identifier that is not a loop variable
//! binds as a `{{reference}}`),
//! and in the Vue dialect `v-*` directives dispatch through [`DIRECTIVES`].
//! `v-if` / `v-for` wrap the block in an `IfStatement` / `ForStatement`,
//! with the loop outermost.

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parse_expression_at;
use crate::util::span::{Position, Span};

/// Selector of the block a text child lowers to
pub const TEXT_SELECTOR: &str = "#text";
/// Selector of the block an `{expr}` child lowers to
pub const EXPR_SELECTOR: &str = "expr";

/// Markup dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Jsx,
    Vue,
}

/// A parsed `v-name:arg.mod` attribute
#[derive(Debug)]
struct Directive<'a> {
    name: String,
    arg: Option<String>,
    modifiers: Vec<String>,
    value: Option<Node>,
    /// Raw attribute text and where it starts, for directives with their
    /// own mini-syntax
    raw: Option<(&'a str, Position)>,
    span: Span,
}

#[derive(Debug)]
struct LoopHeader {
    item: String,
    index: Option<String>,
    iterable: Node,
}

/// Accumulated lowering of one element
#[derive(Debug, Default)]
struct Lowered {
    id: Option<String>,
    props: Vec<Node>,
    condition: Option<Node>,
    each: Option<LoopHeader>,
    /// Loop variables in scope; identifiers rooted here are not state paths
    locals: Vec<String>,
}

impl Lowered {
    /// A bare identifier binds to the state path of the same name unless it
    /// names a loop variable
    fn bind(
        &self,
        expr: Node,
    ) -> Node {
        bind(expr, &self.locals)
    }
}

fn bind(
    expr: Node,
    locals: &[String],
) -> Node {
    match expr.kind {
        NodeKind::Identifier { name } if !is_local(&name, locals) => {
            Node::new(NodeKind::Reference { path: name }, expr.span)
        }
        kind => Node::new(kind, expr.span),
    }
}

fn is_local(
    name: &str,
    locals: &[String],
) -> bool {
    let root = name.split('.').next().unwrap_or(name);
    locals.iter().any(|l| l == root)
}

type DirectiveFn = fn(&Directive<'_>, &mut Lowered) -> Result<(), String>;

/// 指令表
const DIRECTIVES: &[(&str, DirectiveFn)] = &[
    ("v-bind", lower_bind),
    ("v-on", lower_on),
    ("v-model", lower_model),
    ("v-show", lower_show),
    ("v-html", lower_html),
    ("v-text", lower_text),
    ("v-if", lower_if),
    ("v-for", lower_for),
];

/// Lower one element (and its children) to canonical nodes
pub fn lower_element(
    element: &MarkupElement,
    dialect: Dialect,
) -> Result<Node, String> {
    lower_in_scope(element, dialect, &[])
}

fn lower_in_scope(
    element: &MarkupElement,
    dialect: Dialect,
    locals: &[String],
) -> Result<Node, String> {
    let span = element.span;
    let mut lowered = Lowered {
        locals: locals.to_vec(),
        ..Lowered::default()
    };

    let attributes = element
        .attributes
        .iter()
        .map(|attribute| Ok((attribute, directive_of(attribute, dialect)?)))
        .collect::<Result<Vec<_>, String>>()?;

    // v-for first: its variables are in scope for every other attribute.
    // The rest keep source order, so props do too.
    let (loops, rest): (Vec<_>, Vec<_>) = attributes
        .iter()
        .partition(|(_, directive)| directive.as_ref().is_some_and(|d| d.name == "v-for"));
    for (attribute, directive) in loops.into_iter().chain(rest) {
        match directive {
            Some(directive) => lower_directive(directive, &mut lowered)?,
            None => lower_attribute(attribute, &mut lowered),
        }
    }

    let mut body = std::mem::take(&mut lowered.props);
    for child in &element.children {
        body.push(lower_child(child, dialect, &lowered.locals)?);
    }

    let mut node = Node::new(
        NodeKind::DomBlock {
            selector: element.tag.clone(),
            id: lowered.id,
            body,
        },
        span,
    );

    if let Some(condition) = lowered.condition {
        node = Node::new(
            NodeKind::IfStatement {
                condition: Box::new(condition),
                consequent: vec![node],
                alternate: None,
            },
            span,
        );
    }
    if let Some(each) = lowered.each {
        node = Node::new(
            NodeKind::ForStatement {
                item: each.item,
                index: each.index,
                iterable: Box::new(each.iterable),
                body: vec![node],
            },
            span,
        );
    }

    Ok(node)
}

fn lower_directive(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let handler = DIRECTIVES
        .iter()
        .find(|(name, _)| *name == directive.name)
        .map(|(_, handler)| *handler)
        .ok_or_else(|| format!("Unknown directive '{}' at {}", directive.name, directive.span.start))?;
    handler(directive, lowered)
}

fn lower_child(
    child: &MarkupChild,
    dialect: Dialect,
    locals: &[String],
) -> Result<Node, String> {
    match child {
        MarkupChild::Element(element) => lower_in_scope(element, dialect, locals),
        MarkupChild::Text { text, span } => Ok(Node::new(
            NodeKind::DomBlock {
                selector: TEXT_SELECTOR.to_string(),
                id: None,
                body: vec![Node::property("textContent", Node::string(text.clone(), *span), *span)],
            },
            *span,
        )),
        MarkupChild::Expression(expr) => Ok(Node::new(
            NodeKind::DomBlock {
                selector: EXPR_SELECTOR.to_string(),
                id: None,
                body: vec![Node::property("value", bind(expr.clone(), locals), expr.span)],
            },
            expr.span,
        )),
    }
}

/// Plain attribute: literal, binding or boolean flag
fn lower_attribute(
    attribute: &MarkupAttribute,
    lowered: &mut Lowered,
) {
    let span = attribute.span;
    let value = match &attribute.value {
        AttributeValue::Static { text, value_span } => {
            if attribute.name == "id" {
                lowered.id = Some(text.clone());
                return;
            }
            Node::string(text.clone(), *value_span)
        }
        AttributeValue::Expression(expr) => lowered.bind(expr.clone()),
        AttributeValue::Flag => Node::literal(LiteralValue::Boolean(true), span),
    };
    lowered.props.push(Node::property(attribute.name.clone(), value, span));
}

/// Split a Vue attribute name into a directive; `None` for plain attributes
fn directive_of<'a>(
    attribute: &'a MarkupAttribute,
    dialect: Dialect,
) -> Result<Option<Directive<'a>>, String> {
    if dialect != Dialect::Vue {
        return Ok(None);
    }

    let name = attribute.name.as_str();
    let full = if let Some(rest) = name.strip_prefix('@') {
        format!("v-on:{}", rest)
    } else if let Some(rest) = name.strip_prefix(':') {
        format!("v-bind:{}", rest)
    } else if name.starts_with("v-") {
        name.to_string()
    } else {
        return Ok(None);
    };

    let (head, arg_part) = match full.split_once(':') {
        Some((head, rest)) => (head.to_string(), Some(rest.to_string())),
        None => (full.clone(), None),
    };
    let (name, arg, modifiers): (String, Option<String>, Vec<String>) = match arg_part {
        Some(rest) => {
            let mut parts = rest.split('.');
            let arg = parts.next().filter(|a| !a.is_empty()).map(str::to_string);
            (head, arg, parts.map(str::to_string).collect())
        }
        None => {
            let mut parts = head.split('.');
            let name = parts.next().unwrap_or_default().to_string();
            let modifiers = parts.map(str::to_string).collect();
            (name, None, modifiers)
        }
    };

    let (value, raw) = match &attribute.value {
        AttributeValue::Static { text, value_span } => {
            // v-for has its own header syntax
            let value = if name == "v-for" {
                None
            } else {
                Some(
                    parse_expression_at(text, value_span.start)
                        .map_err(|e| format!("Invalid expression in {}: {}", attribute.name, e))?,
                )
            };
            (value, Some((text.as_str(), value_span.start)))
        }
        AttributeValue::Expression(expr) => (Some(expr.clone()), None),
        AttributeValue::Flag => (None, None),
    };

    Ok(Some(Directive {
        name,
        arg,
        modifiers,
        value,
        raw,
        span: attribute.span,
    }))
}

fn required_value<'d>(directive: &'d Directive<'_>) -> Result<&'d Node, String> {
    directive
        .value
        .as_ref()
        .ok_or_else(|| format!("{} requires a value at {}", directive.name, directive.span.start))
}

fn required_arg<'d>(directive: &'d Directive<'_>) -> Result<&'d str, String> {
    directive
        .arg
        .as_deref()
        .ok_or_else(|| format!("{} requires an argument at {}", directive.name, directive.span.start))
}

fn lower_bind(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let name = required_arg(directive)?;
    let value = lowered.bind(required_value(directive)?.clone());
    lowered.props.push(Node::property(name, value, directive.span));
    Ok(())
}

fn lower_on(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let event = required_arg(directive)?;
    let handler = lowered.bind(required_value(directive)?.clone());
    let span = directive.span;

    let modifiers: Vec<Node> = directive
        .modifiers
        .iter()
        .filter(|m| matches!(m.as_str(), "prevent" | "stop"))
        .map(|m| Node::string(m.clone(), span))
        .collect();

    let value = if modifiers.is_empty() {
        handler
    } else {
        Node::new(
            NodeKind::ObjectExpression {
                properties: vec![
                    Node::property("handler", handler, span),
                    Node::property(
                        "modifiers",
                        Node::new(NodeKind::ArrayExpression { elements: modifiers }, span),
                        span,
                    ),
                ],
            },
            span,
        )
    };

    lowered.props.push(Node::property(event_prop(event), value, span));
    Ok(())
}

/// `click` → `onClick`
fn event_prop(event: &str) -> String {
    let mut chars = event.chars();
    match chars.next() {
        Some(first) => format!("on{}{}", first.to_uppercase(), chars.as_str()),
        None => "on".to_string(),
    }
}

fn lower_model(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let span = directive.span;
    let path = match &required_value(directive)?.kind {
        NodeKind::Identifier { name } => name.clone(),
        NodeKind::Reference { path } => path.clone(),
        _ => return Err(format!("v-model requires a state path at {}", span.start)),
    };

    lowered.props.push(Node::property(
        "value",
        Node::new(NodeKind::Reference { path: path.clone() }, span),
        span,
    ));

    let setter = Node::new(
        NodeKind::AssignmentStatement {
            target: path,
            value: Box::new(Node::new(
                NodeKind::Identifier {
                    name: "value".to_string(),
                },
                span,
            )),
        },
        span,
    );
    lowered.props.push(Node::property(
        "onInput",
        Node::new(
            NodeKind::LambdaExpression {
                params: vec!["value".to_string()],
                body: vec![setter],
            },
            span,
        ),
        span,
    ));
    Ok(())
}

fn lower_show(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let span = directive.span;
    let test = lowered.bind(required_value(directive)?.clone());
    let style = Node::new(
        NodeKind::ObjectExpression {
            properties: vec![
                Node::property("test", test, span),
                Node::property("consequent", Node::string("", span), span),
                Node::property("alternate", Node::string("display: none", span), span),
            ],
        },
        span,
    );
    lowered.props.push(Node::property("style", style, span));
    Ok(())
}

fn lower_html(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let value = lowered.bind(required_value(directive)?.clone());
    lowered.props.push(Node::property("innerHTML", value, directive.span));
    Ok(())
}

fn lower_text(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let value = lowered.bind(required_value(directive)?.clone());
    lowered.props.push(Node::property("textContent", value, directive.span));
    Ok(())
}

fn lower_if(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    lowered.condition = Some(lowered.bind(required_value(directive)?.clone()));
    Ok(())
}

fn lower_for(
    directive: &Directive<'_>,
    lowered: &mut Lowered,
) -> Result<(), String> {
    let span = directive.span;
    let (raw, raw_start) = directive
        .raw
        .ok_or_else(|| format!("v-for requires \"item in items\" at {}", span.start))?;
    let (item, index, iterable_at) = split_for_header(raw)
        .ok_or_else(|| format!("Invalid v-for expression '{}' at {}", raw, span.start))?;
    let iterable_start = raw_start.advanced_over(&raw[..iterable_at]);
    let iterable = parse_expression_at(raw[iterable_at..].trim_end(), iterable_start)
        .map_err(|e| format!("Invalid v-for iterable: {}", e))?;

    let iterable = lowered.bind(iterable);
    lowered.locals.push(item.clone());
    lowered.locals.extend(index.clone());
    lowered.each = Some(LoopHeader {
        item,
        index,
        iterable,
    });
    Ok(())
}

/// `item in items` / `(item, index) of items`; the last field is the byte
/// offset of the iterable in `raw`
fn split_for_header(raw: &str) -> Option<(String, Option<String>, usize)> {
    let (at, separator) = raw
        .find(" in ")
        .map(|at| (at, " in "))
        .or_else(|| raw.find(" of ").map(|at| (at, " of ")))?;
    let head = raw[..at].trim();
    let rest = &raw[at + separator.len()..];
    let iterable_at = raw.len() - rest.trim_start().len();
    let head = head
        .strip_prefix('(')
        .and_then(|h| h.strip_suffix(')'))
        .unwrap_or(head);

    let mut names = head.split(',').map(str::trim);
    let item = names.next().filter(|n| is_loop_variable(n))?.to_string();
    let index = match names.next() {
        Some(name) if is_loop_variable(name) => Some(name.to_string()),
        Some(_) => return None,
        None => None,
    };
    if names.next().is_some() || rest.trim().is_empty() {
        return None;
    }
    Some((item, index, iterable_at))
}

fn is_loop_variable(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
