//! 块代码生成
//!
//! ```js
//! {
//!   const props0 = {};
//!   const children0 = [];
//!   …body…
//!   blocks['id'] = createBlock('atomic', 'id', props0, children0);
//! }
//! ```

use crate::frontend::core::parser::ast::{Node, NodeKind};
use crate::middle::codegen::CodegenContext;

use super::expr::js_string;
use super::Scope;

/// `'id'` or `null`
fn id_arg(id: Option<&str>) -> String {
    id.map(js_string).unwrap_or_else(|| "null".to_string())
}

impl CodegenContext<'_> {
    /// `AtomicBlock` → `createBlock`, `DomBlock` → `createDom`
    pub(crate) fn generate_block(
        &mut self,
        node: &Node,
        scope: &Scope,
    ) {
        let (factory, first, id, body) = match &node.kind {
            NodeKind::AtomicBlock {
                block_type,
                id,
                body,
            } => ("createBlock", block_type, id.as_deref(), body),
            NodeKind::DomBlock { selector, id, body } => ("createDom", selector, id.as_deref(), body),
            _ => {
                self.out.line(format!("// unknown: {}", node.type_name()));
                return;
            }
        };

        let n = self.scope_id();
        let props = format!("props{}", n);
        let children = format!("children{}", n);

        self.out.line("{");
        self.out.indent();
        self.out.line(format!("const {} = {{}};", props));
        self.out.line(format!("const {} = [];", children));
        let inner = Scope::Block {
            props: props.clone(),
            children: Some(children.clone()),
        };
        self.generate_body(body, &inner);

        let created = format!(
            "{}({}, {}, {}, {})",
            factory,
            js_string(first),
            id_arg(id),
            props,
            children
        );
        self.sink(scope, id, created);
        self.out.dedent();
        self.out.line("}");
    }

    /// A component is a factory registered under its name
    pub(crate) fn generate_component(
        &mut self,
        name: &str,
        id: Option<&str>,
        params: &[String],
        body: &[Node],
    ) {
        let n = self.scope_id();
        let props = format!("props{}", n);
        let children = format!("children{}", n);

        self.out.line(format!(
            "blocks[{}] = ({}) => {{",
            js_string(name),
            params.join(", ")
        ));
        self.out.indent();
        self.out.line(format!("const {} = {{}};", props));
        self.out.line(format!("const {} = [];", children));
        let inner = Scope::Block {
            props: props.clone(),
            children: Some(children.clone()),
        };
        self.generate_body(body, &inner);
        self.out.line(format!(
            "return createBlock({}, {}, {}, {});",
            js_string(name),
            id_arg(id),
            props,
            children
        ));
        self.out.dedent();
        self.out.line("};");
    }

    /// `propose('id' | null, props, [constraints])`
    ///
    /// Direct `@constraint` children become `{ name, check }` entries; the
    /// rest of the body fills the proposed props. A proposal has no children,
    /// so a nested block is marked unknown rather than created and dropped.
    pub(crate) fn generate_proposal(
        &mut self,
        id: Option<&str>,
        body: &[Node],
    ) {
        let n = self.scope_id();
        let props = format!("props{}", n);

        self.out.line("{");
        self.out.indent();
        self.out.line(format!("const {} = {{}};", props));

        let mut constraints = Vec::new();
        let inner = Scope::Block {
            props: props.clone(),
            children: None,
        };
        for node in body {
            match &node.kind {
                NodeKind::Constraint { name, condition } => {
                    let check = self.expr(condition);
                    constraints.push(format!(
                        "{{ name: {}, check: () => {} }},",
                        js_string(name),
                        check
                    ));
                }
                NodeKind::AtomicBlock { .. }
                | NodeKind::DomBlock { .. }
                | NodeKind::ComponentDef { .. }
                | NodeKind::StateProposal { .. } => {
                    self.out.line(format!("// unknown: {}", node.type_name()));
                }
                _ => self.generate_body(std::slice::from_ref(node), &inner),
            }
        }

        let call = format!("propose({}, {}, [", id_arg(id), props);
        let call = match id {
            Some(id) => format!("blocks[{}] = {}", js_string(id), call),
            None => call,
        };
        if constraints.is_empty() {
            self.out.line(format!("{}]);", call));
        } else {
            self.out.line(call);
            self.out.indent();
            for constraint in &constraints {
                self.out.line(constraint);
            }
            self.out.dedent();
            self.out.line("]);");
        }

        self.out.dedent();
        self.out.line("}");
    }
}
