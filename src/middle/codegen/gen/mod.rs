//! 代码生成子模块
//!
//! 包含表达式、语句、块与响应式结构的代码生成逻辑。

pub mod block;
pub mod expr;
pub mod reactive;
pub mod stmt;

use crate::frontend::core::parser::ast::{Node, NodeKind};
use crate::frontend::core::parser::pratt::nud::LAMBDA_RETURN;
use crate::middle::codegen::CodegenContext;

use self::expr::{js_string, member};

/// Where the statements being generated sit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Directly inside `mount`
    Root,
    /// Inside a block: properties fill `props`, nested blocks are pushed
    /// onto `children` (or created standalone when there is none)
    Block {
        props: String,
        children: Option<String>,
    },
    /// Lambda and reactive handler bodies
    Handler,
}

impl CodegenContext<'_> {
    /// 生成语句列表
    pub(crate) fn generate_body(
        &mut self,
        body: &[Node],
        scope: &Scope,
    ) {
        for node in body {
            self.generate_item(node, scope);
        }
    }

    fn generate_item(
        &mut self,
        node: &Node,
        scope: &Scope,
    ) {
        match &node.kind {
            NodeKind::PropertyAssignment { name, value } => {
                self.generate_property(name, value, scope)
            }
            NodeKind::AtomicBlock { .. } | NodeKind::DomBlock { .. } => {
                self.generate_block(node, scope)
            }
            NodeKind::ComponentDef {
                name,
                id,
                params,
                body,
            } => self.generate_component(name, id.as_deref(), params, body),
            NodeKind::StateProposal { id, body } => self.generate_proposal(id.as_deref(), body),
            NodeKind::StateDefinition { properties } => self.generate_state(properties),

            NodeKind::IfStatement {
                condition,
                consequent,
                alternate,
            } => self.generate_if(condition, consequent, alternate.as_deref(), scope),
            NodeKind::ForStatement {
                item,
                index,
                iterable,
                body,
            } => self.generate_for(item, index.as_deref(), iterable, body, scope),
            NodeKind::WhileStatement { condition, body } => {
                self.generate_while(condition, body, scope)
            }
            NodeKind::DoWhileStatement { body, condition } => {
                self.generate_do_while(body, condition, scope)
            }
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => self.generate_switch(discriminant, cases, scope),
            NodeKind::AssignmentStatement { target, value } => {
                let value = self.expr(value);
                self.out
                    .line(format!("state.set({}, {});", js_string(target), value));
            }
            NodeKind::ServerCall {
                endpoint,
                arguments,
                target,
            } => self.generate_call(endpoint, arguments, target.as_deref()),

            NodeKind::ReactorBlock { id, body } => self.generate_reactor(id.as_deref(), body),
            NodeKind::TimerBlock { interval, body } => self.generate_timer(interval, body),
            NodeKind::BinaryTrigger {
                trigger,
                body,
                otherwise,
            } => self.generate_trigger(trigger, body, otherwise.as_deref()),

            NodeKind::PluginDirective { keyword, name, .. } => {
                self.out.line(format!("// @{} {}", keyword, name));
            }
            _ => self.out.line(format!("// unknown: {}", node.type_name())),
        }
    }

    /// Properties fill the enclosing block's props; elsewhere they write
    /// state, and the synthetic `_return` property returns from a handler.
    fn generate_property(
        &mut self,
        name: &str,
        value: &Node,
        scope: &Scope,
    ) {
        match scope {
            Scope::Block { props, .. } => {
                let value = self.value(value);
                self.out
                    .line(format!("{} = {};", member(props, name), value));
            }
            Scope::Handler if name == LAMBDA_RETURN => {
                let value = self.expr(value);
                self.out.line(format!("return {};", value));
            }
            Scope::Root | Scope::Handler => {
                let value = self.expr(value);
                self.out
                    .line(format!("state.set({}, {});", js_string(name), value));
            }
        }
    }

    /// Hand a created block to its scope
    fn sink(
        &mut self,
        scope: &Scope,
        id: Option<&str>,
        created: String,
    ) {
        let created = match id {
            Some(id) => format!("blocks[{}] = {}", js_string(id), created),
            None => created,
        };
        match scope {
            Scope::Block {
                children: Some(children),
                ..
            } => self.out.line(format!("{}.push({});", children, created)),
            _ => self.out.line(format!("{};", created)),
        }
    }
}
