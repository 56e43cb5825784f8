//! Abstract Syntax Tree types
//!
//! The node set is closed: every construct the parser produces (and every
//! canonical node plugins lower to) is a [`NodeKind`] variant. Nodes
//! serialise as `{"type": "<Kind>", …fields, "span": …}` for `asxr ast`.

use crate::util::span::Span;
use serde::Serialize;
use std::fmt;

/// Parsed document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: Vec<Node>,
    pub span: Span,
}

/// AST node: a kind plus its source span
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub span: Span,
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl fmt::Display for LiteralValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            LiteralValue::String(s) => write!(f, "\"{}\"", s),
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Null => write!(f, "null"),
        }
    }
}

/// Binary operators, loosest to tightest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNe,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "-")]
    Neg,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

/// One `@case` / `@default` arm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    /// `None` for `@default`
    pub test: Option<Node>,
    pub body: Vec<Node>,
    pub span: Span,
}

/// Markup element captured by a plugin syntax pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: Vec<MarkupAttribute>,
    pub children: Vec<MarkupChild>,
    pub self_closing: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkupAttribute {
    pub name: String,
    pub value: AttributeValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum AttributeValue {
    /// `name="text"`; `value_span` covers the text between the quotes
    Static { text: String, value_span: Span },
    /// `name={expr}`
    Expression(Node),
    /// bare `name`
    Flag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum MarkupChild {
    Element(MarkupElement),
    Text { text: String, span: Span },
    /// `{expr}` or `{{path}}`
    Expression(Node),
}

/// Node kinds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    // Blocks
    AtomicBlock {
        block_type: String,
        id: Option<String>,
        body: Vec<Node>,
    },
    DomBlock {
        selector: String,
        id: Option<String>,
        body: Vec<Node>,
    },
    ComponentDef {
        name: String,
        id: Option<String>,
        params: Vec<String>,
        body: Vec<Node>,
    },

    PropertyAssignment {
        name: String,
        value: Box<Node>,
    },

    // Expressions
    Literal {
        value: LiteralValue,
    },
    Reference {
        path: String,
    },
    BlockReference {
        name: String,
    },
    /// Dotted member paths are kept whole: `a.b.c`
    Identifier {
        name: String,
    },
    BinaryExpression {
        operator: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryExpression {
        operator: UnaryOp,
        argument: Box<Node>,
    },
    ArrayExpression {
        elements: Vec<Node>,
    },
    /// Properties are `PropertyAssignment` nodes
    ObjectExpression {
        properties: Vec<Node>,
    },
    LambdaExpression {
        params: Vec<String>,
        body: Vec<Node>,
    },

    // Statements
    IfStatement {
        condition: Box<Node>,
        consequent: Vec<Node>,
        alternate: Option<Vec<Node>>,
    },
    ForStatement {
        item: String,
        index: Option<String>,
        iterable: Box<Node>,
        body: Vec<Node>,
    },
    WhileStatement {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    DoWhileStatement {
        body: Vec<Node>,
        condition: Box<Node>,
    },
    SwitchStatement {
        discriminant: Box<Node>,
        cases: Vec<SwitchCase>,
    },
    AssignmentStatement {
        target: String,
        value: Box<Node>,
    },
    ServerCall {
        endpoint: String,
        arguments: Vec<Node>,
        target: Option<String>,
    },

    // Reactive
    ReactorBlock {
        id: Option<String>,
        body: Vec<Node>,
    },
    TimerBlock {
        interval: Box<Node>,
        body: Vec<Node>,
    },
    BinaryTrigger {
        trigger: Box<Node>,
        body: Vec<Node>,
        otherwise: Option<Vec<Node>>,
    },

    // State
    StateProposal {
        id: Option<String>,
        body: Vec<Node>,
    },
    StateDefinition {
        properties: Vec<Node>,
    },
    Constraint {
        name: String,
        condition: Box<Node>,
    },

    PluginDirective {
        keyword: String,
        name: String,
        options: Vec<Node>,
    },
    /// Sentinel produced by a plugin syntax pattern, replaced in `after_parse`
    PluginNode {
        node_type: String,
        element: MarkupElement,
    },
}

impl Node {
    pub fn new(
        kind: NodeKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }

    pub fn literal(
        value: LiteralValue,
        span: Span,
    ) -> Self {
        Self::new(NodeKind::Literal { value }, span)
    }

    pub fn string(
        value: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::literal(LiteralValue::String(value.into()), span)
    }

    pub fn property(
        name: impl Into<String>,
        value: Node,
        span: Span,
    ) -> Self {
        Self::new(
            NodeKind::PropertyAssignment {
                name: name.into(),
                value: Box::new(value),
            },
            span,
        )
    }

    /// The `type` tag this node serialises with
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Block-like nodes that may carry an id
    ///
    /// 所有带 id 的节点共享一个命名空间：生成代码把它们都注册为
    /// `blocks['id']`，`#id` 也从同一张表读取。
    pub fn is_block(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::AtomicBlock { .. }
                | NodeKind::DomBlock { .. }
                | NodeKind::ComponentDef { .. }
                | NodeKind::ReactorBlock { .. }
                | NodeKind::StateProposal { .. }
        )
    }

    /// Declared block id
    pub fn block_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::AtomicBlock { id, .. }
            | NodeKind::DomBlock { id, .. }
            | NodeKind::ComponentDef { id, .. }
            | NodeKind::ReactorBlock { id, .. }
            | NodeKind::StateProposal { id, .. } => id.as_deref(),
            _ => None,
        }
    }

    /// Schema key of a block: the `@keyword` it was written with
    pub fn block_type(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::AtomicBlock { block_type, .. } => Some(block_type),
            NodeKind::DomBlock { .. } => Some("dom"),
            NodeKind::ComponentDef { .. } => Some("component"),
            NodeKind::ReactorBlock { .. } => Some("reactor"),
            NodeKind::StateProposal { .. } => Some("propose"),
            _ => None,
        }
    }

    /// The statement list in a `body` field, if the node has one
    pub fn body(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::AtomicBlock { body, .. }
            | NodeKind::DomBlock { body, .. }
            | NodeKind::ComponentDef { body, .. }
            | NodeKind::LambdaExpression { body, .. }
            | NodeKind::ForStatement { body, .. }
            | NodeKind::WhileStatement { body, .. }
            | NodeKind::DoWhileStatement { body, .. }
            | NodeKind::ReactorBlock { body, .. }
            | NodeKind::TimerBlock { body, .. }
            | NodeKind::BinaryTrigger { body, .. }
            | NodeKind::StateProposal { body, .. } => Some(body),
            _ => None,
        }
    }

    /// `PropertyAssignment` name and value
    pub fn as_property(&self) -> Option<(&str, &Node)> {
        match &self.kind {
            NodeKind::PropertyAssignment { name, value } => Some((name, value)),
            _ => None,
        }
    }
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::AtomicBlock { .. } => "AtomicBlock",
            NodeKind::DomBlock { .. } => "DomBlock",
            NodeKind::ComponentDef { .. } => "ComponentDef",
            NodeKind::PropertyAssignment { .. } => "PropertyAssignment",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::Reference { .. } => "Reference",
            NodeKind::BlockReference { .. } => "BlockReference",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::LambdaExpression { .. } => "LambdaExpression",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::ForStatement { .. } => "ForStatement",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::DoWhileStatement { .. } => "DoWhileStatement",
            NodeKind::SwitchStatement { .. } => "SwitchStatement",
            NodeKind::AssignmentStatement { .. } => "AssignmentStatement",
            NodeKind::ServerCall { .. } => "ServerCall",
            NodeKind::ReactorBlock { .. } => "ReactorBlock",
            NodeKind::TimerBlock { .. } => "TimerBlock",
            NodeKind::BinaryTrigger { .. } => "BinaryTrigger",
            NodeKind::StateProposal { .. } => "StateProposal",
            NodeKind::StateDefinition { .. } => "StateDefinition",
            NodeKind::Constraint { .. } => "Constraint",
            NodeKind::PluginDirective { .. } => "PluginDirective",
            NodeKind::PluginNode { .. } => "PluginNode",
        }
    }
}
