//! Laws: named whole-program invariants
//!
//! A law sees the entire program and reports any number of violations. The
//! builtin set is always run; caller-supplied laws are appended after it.

use crate::frontend::core::parser::ast::{LiteralValue, Node, NodeKind, Program, UnaryOp};
use crate::frontend::core::parser::walk::{for_each_node, for_each_program_node};
use crate::util::span::Span;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Law body
pub type LawCheck = Arc<dyn Fn(&Program) -> Vec<LawViolation> + Send + Sync>;

/// One broken invariant
#[derive(Debug, Clone, PartialEq)]
pub struct LawViolation {
    pub message: String,
    pub location: Option<Span>,
}

impl LawViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(
        mut self,
        span: Span,
    ) -> Self {
        self.location = Some(span);
        self
    }
}

/// 命名的全程序不变式
#[derive(Clone)]
pub struct Law {
    pub name: String,
    check: LawCheck,
}

impl Law {
    pub fn new<F>(
        name: impl Into<String>,
        check: F,
    ) -> Self
    where
        F: Fn(&Program) -> Vec<LawViolation> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn check(
        &self,
        program: &Program,
    ) -> Vec<LawViolation> {
        (self.check)(program)
    }
}

impl fmt::Debug for Law {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Law").field("name", &self.name).finish()
    }
}

/// The laws every program is held to
pub fn builtin_laws() -> Vec<Law> {
    vec![
        Law::new("constraint-placement", constraint_placement),
        Law::new("proposal-contents", proposal_contents),
        Law::new("positive-timer-interval", positive_timer_interval),
        Law::new("single-default", single_default),
        Law::new("unique-component-names", unique_component_names),
    ]
}

/// `@constraint` only has meaning inside `@propose`
fn constraint_placement(program: &Program) -> Vec<LawViolation> {
    let mut placed: HashSet<*const Node> = HashSet::new();
    for_each_program_node(program, &mut |node| {
        if let NodeKind::StateProposal { body, .. } = &node.kind {
            for child in body {
                for_each_node(child, &mut |inner| {
                    if matches!(inner.kind, NodeKind::Constraint { .. }) {
                        placed.insert(inner as *const Node);
                    }
                });
            }
        }
    });

    let mut violations = Vec::new();
    for_each_program_node(program, &mut |node| {
        if let NodeKind::Constraint { name, .. } = &node.kind {
            if !placed.contains(&(node as *const Node)) {
                violations.push(
                    LawViolation::new(format!(
                        "Constraint '{}' must be declared inside a @propose block",
                        name
                    ))
                    .at(node.span),
                );
            }
        }
    });
    violations
}

/// A proposal carries props and constraints, never child blocks
fn proposal_contents(program: &Program) -> Vec<LawViolation> {
    let mut violations = Vec::new();
    for_each_program_node(program, &mut |node| {
        if let NodeKind::StateProposal { body, .. } = &node.kind {
            for child in body.iter().filter(|child| {
                matches!(
                    child.kind,
                    NodeKind::AtomicBlock { .. }
                        | NodeKind::DomBlock { .. }
                        | NodeKind::ComponentDef { .. }
                        | NodeKind::StateProposal { .. }
                )
            }) {
                violations.push(
                    LawViolation::new(format!(
                        "@propose cannot contain {}",
                        child.type_name()
                    ))
                    .at(child.span),
                );
            }
        }
    });
    violations
}

fn positive_timer_interval(program: &Program) -> Vec<LawViolation> {
    let mut violations = Vec::new();
    for_each_program_node(program, &mut |node| {
        if let NodeKind::TimerBlock { interval, .. } = &node.kind {
            if let Some(ms) = literal_number(interval).filter(|ms| *ms <= 0.0) {
                violations.push(
                    LawViolation::new(format!("@every interval must be positive, found {}", ms))
                        .at(interval.span),
                );
            }
        }
    });
    violations
}

fn single_default(program: &Program) -> Vec<LawViolation> {
    let mut violations = Vec::new();
    for_each_program_node(program, &mut |node| {
        if let NodeKind::SwitchStatement { cases, .. } = &node.kind {
            for extra in cases.iter().filter(|case| case.test.is_none()).skip(1) {
                violations.push(
                    LawViolation::new("@switch may have at most one @default case").at(extra.span),
                );
            }
        }
    });
    violations
}

fn unique_component_names(program: &Program) -> Vec<LawViolation> {
    let mut seen = HashSet::new();
    let mut violations = Vec::new();
    for_each_program_node(program, &mut |node| {
        if let NodeKind::ComponentDef { name, .. } = &node.kind {
            if !seen.insert(name.as_str()) {
                violations.push(
                    LawViolation::new(format!("Component '{}' is defined more than once", name))
                        .at(node.span),
                );
            }
        }
    });
    violations
}

fn literal_number(node: &Node) -> Option<f64> {
    match &node.kind {
        NodeKind::Literal {
            value: LiteralValue::Number(n),
        } => Some(*n),
        NodeKind::UnaryExpression {
            operator: UnaryOp::Neg,
            argument,
        } => literal_number(argument).map(|n| -n),
        _ => None,
    }
}
