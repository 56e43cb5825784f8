//! 表达式代码生成
//!
//! Expressions render to a single JavaScript expression string. A
//! `{{path}}` reference renders as a thunk (`() => state.get('path')`) in
//! value position, so the runtime can re-read it, and as a plain
//! `state.get('path')` anywhere it is evaluated on the spot.

use crate::frontend::core::parser::ast::{BinaryOp, LiteralValue, Node, NodeKind, UnaryOp};
use crate::frontend::core::parser::pratt::nud::LAMBDA_RETURN;
use crate::frontend::core::parser::pratt::operator_binding_power;
use crate::middle::codegen::buffer::CodeBuffer;
use crate::middle::codegen::CodegenContext;

use super::Scope;

impl CodegenContext<'_> {
    /// Expression evaluated where it stands
    pub(crate) fn expr(
        &mut self,
        node: &Node,
    ) -> String {
        match &node.kind {
            NodeKind::Literal { value } => literal(value),
            NodeKind::Reference { path } => format!("state.get({})", js_string(path)),
            NodeKind::BlockReference { name } => format!("blocks[{}]", js_string(name)),
            NodeKind::Identifier { name } => name.clone(),
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => self.binary(*operator, left, right),
            NodeKind::UnaryExpression { operator, argument } => self.unary(*operator, argument),
            NodeKind::ArrayExpression { elements } => {
                let elements: Vec<String> = elements.iter().map(|e| self.expr(e)).collect();
                format!("[{}]", elements.join(", "))
            }
            NodeKind::ObjectExpression { properties } => self.object(properties, false),
            NodeKind::LambdaExpression { params, body } => self.lambda(params, body),
            _ => format!("/* unknown: {} */ undefined", node.type_name()),
        }
    }

    /// Expression in property-value position
    pub(crate) fn value(
        &mut self,
        node: &Node,
    ) -> String {
        match &node.kind {
            NodeKind::Reference { path } => format!("() => state.get({})", js_string(path)),
            NodeKind::ArrayExpression { elements } => {
                let elements: Vec<String> = elements.iter().map(|e| self.value(e)).collect();
                format!("[{}]", elements.join(", "))
            }
            NodeKind::ObjectExpression { properties } => self.object(properties, true),
            _ => self.expr(node),
        }
    }

    fn binary(
        &mut self,
        operator: BinaryOp,
        left: &Node,
        right: &Node,
    ) -> String {
        let bp = operator_binding_power(operator);
        let left = self.operand(left, bp, false);
        let right = self.operand(right, bp, true);
        format!("{} {} {}", left, operator.as_str(), right)
    }

    /// Operands are parenthesised when they bind looser than the parent;
    /// on the right, equal strength too, since every level is left-associative.
    fn operand(
        &mut self,
        node: &Node,
        parent_bp: u8,
        right: bool,
    ) -> String {
        let text = self.expr(node);
        let wrap = match &node.kind {
            NodeKind::BinaryExpression { operator, .. } => {
                let bp = operator_binding_power(*operator);
                bp < parent_bp || (right && bp == parent_bp)
            }
            NodeKind::LambdaExpression { .. } => true,
            _ => false,
        };
        if wrap {
            format!("({})", text)
        } else {
            text
        }
    }

    fn unary(
        &mut self,
        operator: UnaryOp,
        argument: &Node,
    ) -> String {
        let text = self.expr(argument);
        let wrap = matches!(
            argument.kind,
            NodeKind::BinaryExpression { .. } | NodeKind::LambdaExpression { .. }
        ) || (operator == UnaryOp::Neg && text.starts_with('-'));
        if wrap {
            format!("{}({})", operator.as_str(), text)
        } else {
            format!("{}{}", operator.as_str(), text)
        }
    }

    fn object(
        &mut self,
        properties: &[Node],
        value_position: bool,
    ) -> String {
        if properties.is_empty() {
            return "{}".to_string();
        }
        let entries: Vec<String> = properties
            .iter()
            .map(|property| match property.as_property() {
                Some((name, value)) => {
                    let value = if value_position {
                        self.value(value)
                    } else {
                        self.expr(value)
                    };
                    format!("{}: {}", object_key(name), value)
                }
                None => format!("/* unknown: {} */", property.type_name()),
            })
            .collect();
        format!("{{ {} }}", entries.join(", "))
    }

    /// A body that is only the synthetic `_return` property becomes an
    /// arrow expression; anything else a statement block.
    fn lambda(
        &mut self,
        params: &[String],
        body: &[Node],
    ) -> String {
        let head = format!("({}) =>", params.join(", "));
        if let [only] = body {
            if let Some((LAMBDA_RETURN, value)) = only.as_property() {
                let value = self.expr(value);
                return if value.starts_with('{') {
                    format!("{} ({})", head, value)
                } else {
                    format!("{} {}", head, value)
                };
            }
        }

        let level = self.out.level();
        let outer = std::mem::replace(&mut self.out, CodeBuffer::with_level(level + 1));
        self.generate_body(body, &Scope::Handler);
        let closing = outer.prefix();
        let inner = std::mem::replace(&mut self.out, outer).finish();
        format!("{} {{\n{}{}}}", head, inner, closing)
    }
}

/// Single-quoted JavaScript string literal
pub fn js_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            c if (c as u32) < 0x20 => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// JavaScript number literal
pub fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

fn literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) => js_string(s),
        LiteralValue::Number(n) => js_number(*n),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Null => "null".to_string(),
    }
}

/// Usable as a bare JavaScript identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '$' || first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
        }
        _ => false,
    }
}

fn object_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// `object.name`, or `object['name']` when `name` is not an identifier
pub fn member(
    object: &str,
    name: &str,
) -> String {
    if is_identifier(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, js_string(name))
    }
}
