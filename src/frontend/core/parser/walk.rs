//! AST traversal
//!
//! [`walk_ast`] is the structural walker consumers rely on for ordering: it
//! calls the node's `visit_*` callback, then descends only into a `body`
//! statement list or, for `PropertyAssignment` / `AssignmentStatement`, into
//! `value`. Conditions, branches, switch cases and operator operands are not
//! descended; use [`for_each_node`] for a full pre-order traversal and
//! [`visit_bodies_mut`] to rewrite every statement list in place.

use super::ast::{AttributeValue, MarkupChild, MarkupElement, Node, NodeKind, Program};

macro_rules! define_visitor {
    ($($variant:ident => $method:ident),* $(,)?) => {
        /// Per-kind callbacks; every method defaults to a no-op
        pub trait Visitor {
            fn visit_program(&mut self, _program: &Program) {}
            $(
                fn $method(&mut self, _node: &Node) {}
            )*
        }

        fn dispatch<V: Visitor + ?Sized>(
            visitor: &mut V,
            node: &Node,
        ) {
            match &node.kind {
                $(NodeKind::$variant { .. } => visitor.$method(node),)*
            }
        }
    };
}

define_visitor! {
    AtomicBlock => visit_atomic_block,
    DomBlock => visit_dom_block,
    ComponentDef => visit_component_def,
    PropertyAssignment => visit_property_assignment,
    Literal => visit_literal,
    Reference => visit_reference,
    BlockReference => visit_block_reference,
    Identifier => visit_identifier,
    BinaryExpression => visit_binary_expression,
    UnaryExpression => visit_unary_expression,
    ArrayExpression => visit_array_expression,
    ObjectExpression => visit_object_expression,
    LambdaExpression => visit_lambda_expression,
    IfStatement => visit_if_statement,
    ForStatement => visit_for_statement,
    WhileStatement => visit_while_statement,
    DoWhileStatement => visit_do_while_statement,
    SwitchStatement => visit_switch_statement,
    AssignmentStatement => visit_assignment_statement,
    ServerCall => visit_server_call,
    ReactorBlock => visit_reactor_block,
    TimerBlock => visit_timer_block,
    BinaryTrigger => visit_binary_trigger,
    StateProposal => visit_state_proposal,
    StateDefinition => visit_state_definition,
    Constraint => visit_constraint,
    PluginDirective => visit_plugin_directive,
    PluginNode => visit_plugin_node,
}

/// Walk a whole program
pub fn walk_program<V: Visitor + ?Sized>(
    program: &Program,
    visitor: &mut V,
) {
    visitor.visit_program(program);
    for node in &program.body {
        walk_ast(node, visitor);
    }
}

/// Structural walk of one node (see module docs for the descent rule)
pub fn walk_ast<V: Visitor + ?Sized>(
    node: &Node,
    visitor: &mut V,
) {
    dispatch(visitor, node);

    if let Some(body) = node.body() {
        for child in body {
            walk_ast(child, visitor);
        }
        return;
    }

    match &node.kind {
        NodeKind::PropertyAssignment { value, .. }
        | NodeKind::AssignmentStatement { value, .. } => walk_ast(value, visitor),
        _ => {}
    }
}

/// Full pre-order traversal: every node reachable from `node`, including
/// conditions, branches, operands and markup expressions.
pub fn for_each_node<'a, F>(
    node: &'a Node,
    f: &mut F,
) where
    F: FnMut(&'a Node),
{
    f(node);
    match &node.kind {
        NodeKind::AtomicBlock { body, .. }
        | NodeKind::DomBlock { body, .. }
        | NodeKind::ComponentDef { body, .. }
        | NodeKind::LambdaExpression { body, .. }
        | NodeKind::ReactorBlock { body, .. }
        | NodeKind::StateProposal { body, .. } => each(body, f),
        NodeKind::PropertyAssignment { value, .. }
        | NodeKind::AssignmentStatement { value, .. } => for_each_node(value, f),
        NodeKind::Literal { .. }
        | NodeKind::Reference { .. }
        | NodeKind::BlockReference { .. }
        | NodeKind::Identifier { .. } => {}
        NodeKind::BinaryExpression { left, right, .. } => {
            for_each_node(left, f);
            for_each_node(right, f);
        }
        NodeKind::UnaryExpression { argument, .. } => for_each_node(argument, f),
        NodeKind::ArrayExpression { elements } => each(elements, f),
        NodeKind::ObjectExpression { properties } | NodeKind::StateDefinition { properties } => {
            each(properties, f)
        }
        NodeKind::IfStatement {
            condition,
            consequent,
            alternate,
        } => {
            for_each_node(condition, f);
            each(consequent, f);
            if let Some(alternate) = alternate {
                each(alternate, f);
            }
        }
        NodeKind::ForStatement { iterable, body, .. } => {
            for_each_node(iterable, f);
            each(body, f);
        }
        NodeKind::WhileStatement { condition, body } => {
            for_each_node(condition, f);
            each(body, f);
        }
        NodeKind::DoWhileStatement { body, condition } => {
            each(body, f);
            for_each_node(condition, f);
        }
        NodeKind::SwitchStatement {
            discriminant,
            cases,
        } => {
            for_each_node(discriminant, f);
            for case in cases {
                if let Some(test) = &case.test {
                    for_each_node(test, f);
                }
                each(&case.body, f);
            }
        }
        NodeKind::ServerCall { arguments, .. } => each(arguments, f),
        NodeKind::TimerBlock { interval, body } => {
            for_each_node(interval, f);
            each(body, f);
        }
        NodeKind::BinaryTrigger {
            trigger,
            body,
            otherwise,
        } => {
            for_each_node(trigger, f);
            each(body, f);
            if let Some(otherwise) = otherwise {
                each(otherwise, f);
            }
        }
        NodeKind::Constraint { condition, .. } => for_each_node(condition, f),
        NodeKind::PluginDirective { options, .. } => each(options, f),
        NodeKind::PluginNode { element, .. } => markup_nodes(element, f),
    }
}

fn each<'a, F>(
    nodes: &'a [Node],
    f: &mut F,
) where
    F: FnMut(&'a Node),
{
    for node in nodes {
        for_each_node(node, f);
    }
}

fn markup_nodes<'a, F>(
    element: &'a MarkupElement,
    f: &mut F,
) where
    F: FnMut(&'a Node),
{
    for attribute in &element.attributes {
        if let AttributeValue::Expression(node) = &attribute.value {
            for_each_node(node, f);
        }
    }
    for child in &element.children {
        match child {
            MarkupChild::Element(child) => markup_nodes(child, f),
            MarkupChild::Expression(node) => for_each_node(node, f),
            MarkupChild::Text { .. } => {}
        }
    }
}

/// Full traversal over a program
pub fn for_each_program_node<'a, F>(
    program: &'a Program,
    f: &mut F,
) where
    F: FnMut(&'a Node),
{
    each(&program.body, f);
}

/// Call `f` on every statement list in the tree, innermost first, so a
/// rewrite of an outer list sees already-rewritten children.
pub fn visit_bodies_mut<E, F>(
    body: &mut Vec<Node>,
    f: &mut F,
) -> Result<(), E>
where
    F: FnMut(&mut Vec<Node>) -> Result<(), E>,
{
    for node in body.iter_mut() {
        visit_node_bodies_mut(node, f)?;
    }
    f(body)
}

fn visit_node_bodies_mut<E, F>(
    node: &mut Node,
    f: &mut F,
) -> Result<(), E>
where
    F: FnMut(&mut Vec<Node>) -> Result<(), E>,
{
    match &mut node.kind {
        NodeKind::AtomicBlock { body, .. }
        | NodeKind::DomBlock { body, .. }
        | NodeKind::ComponentDef { body, .. }
        | NodeKind::LambdaExpression { body, .. }
        | NodeKind::ReactorBlock { body, .. }
        | NodeKind::StateProposal { body, .. } => visit_bodies_mut(body, f),
        NodeKind::PropertyAssignment { value, .. }
        | NodeKind::AssignmentStatement { value, .. }
        | NodeKind::UnaryExpression {
            argument: value, ..
        }
        | NodeKind::Constraint {
            condition: value, ..
        } => visit_node_bodies_mut(value, f),
        NodeKind::BinaryExpression { left, right, .. } => {
            visit_node_bodies_mut(left, f)?;
            visit_node_bodies_mut(right, f)
        }
        NodeKind::ArrayExpression { elements: nodes }
        | NodeKind::ObjectExpression { properties: nodes }
        | NodeKind::StateDefinition { properties: nodes }
        | NodeKind::ServerCall {
            arguments: nodes, ..
        }
        | NodeKind::PluginDirective { options: nodes, .. } => {
            for child in nodes.iter_mut() {
                visit_node_bodies_mut(child, f)?;
            }
            Ok(())
        }
        NodeKind::IfStatement {
            condition,
            consequent,
            alternate,
        } => {
            visit_node_bodies_mut(condition, f)?;
            visit_bodies_mut(consequent, f)?;
            match alternate {
                Some(alternate) => visit_bodies_mut(alternate, f),
                None => Ok(()),
            }
        }
        NodeKind::ForStatement { iterable, body, .. } => {
            visit_node_bodies_mut(iterable, f)?;
            visit_bodies_mut(body, f)
        }
        NodeKind::WhileStatement { condition, body }
        | NodeKind::DoWhileStatement { body, condition }
        | NodeKind::TimerBlock {
            interval: condition,
            body,
        } => {
            visit_node_bodies_mut(condition, f)?;
            visit_bodies_mut(body, f)
        }
        NodeKind::SwitchStatement {
            discriminant,
            cases,
        } => {
            visit_node_bodies_mut(discriminant, f)?;
            for case in cases.iter_mut() {
                visit_bodies_mut(&mut case.body, f)?;
            }
            Ok(())
        }
        NodeKind::BinaryTrigger {
            trigger,
            body,
            otherwise,
        } => {
            visit_node_bodies_mut(trigger, f)?;
            visit_bodies_mut(body, f)?;
            match otherwise {
                Some(otherwise) => visit_bodies_mut(otherwise, f),
                None => Ok(()),
            }
        }
        NodeKind::Literal { .. }
        | NodeKind::Reference { .. }
        | NodeKind::BlockReference { .. }
        | NodeKind::Identifier { .. }
        | NodeKind::PluginNode { .. } => Ok(()),
    }
}
