//! 语句代码生成
//!
//! Control flow maps one-to-one onto JavaScript statements. Bodies stay in
//! the enclosing scope, so a property inside `@if` still fills the
//! surrounding block's props.

use crate::frontend::core::parser::ast::{Node, NodeKind, SwitchCase};
use crate::middle::codegen::CodegenContext;

use super::expr::js_string;
use super::Scope;

impl CodegenContext<'_> {
    /// `if` / `else if` / `else`
    pub(crate) fn generate_if(
        &mut self,
        condition: &Node,
        consequent: &[Node],
        alternate: Option<&[Node]>,
        scope: &Scope,
    ) {
        let condition = self.expr(condition);
        self.out.line(format!("if ({}) {{", condition));
        self.nested_body(consequent, scope);

        let mut alternate = alternate;
        while let Some(branch) = alternate {
            match branch {
                [Node {
                    kind:
                        NodeKind::IfStatement {
                            condition,
                            consequent,
                            alternate: next,
                        },
                    ..
                }] => {
                    let condition = self.expr(condition);
                    self.out.line(format!("}} else if ({}) {{", condition));
                    self.nested_body(consequent, scope);
                    alternate = next.as_deref();
                }
                _ => {
                    self.out.line("} else {");
                    self.nested_body(branch, scope);
                    alternate = None;
                }
            }
        }
        self.out.line("}");
    }

    /// `for … of`; an index uses `entries()`
    pub(crate) fn generate_for(
        &mut self,
        item: &str,
        index: Option<&str>,
        iterable: &Node,
        body: &[Node],
        scope: &Scope,
    ) {
        let iterable = self.expr(iterable);
        match index {
            Some(index) => self.out.line(format!(
                "for (const [{}, {}] of Array.from({}).entries()) {{",
                index, item, iterable
            )),
            None => self
                .out
                .line(format!("for (const {} of {}) {{", item, iterable)),
        }
        self.nested_body(body, scope);
        self.out.line("}");
    }

    pub(crate) fn generate_while(
        &mut self,
        condition: &Node,
        body: &[Node],
        scope: &Scope,
    ) {
        let condition = self.expr(condition);
        self.out.line(format!("while ({}) {{", condition));
        self.nested_body(body, scope);
        self.out.line("}");
    }

    pub(crate) fn generate_do_while(
        &mut self,
        body: &[Node],
        condition: &Node,
        scope: &Scope,
    ) {
        self.out.line("do {");
        self.nested_body(body, scope);
        let condition = self.expr(condition);
        self.out.line(format!("}} while ({});", condition));
    }

    /// Every arm is its own braced block ending in `break`
    pub(crate) fn generate_switch(
        &mut self,
        discriminant: &Node,
        cases: &[SwitchCase],
        scope: &Scope,
    ) {
        let discriminant = self.expr(discriminant);
        self.out.line(format!("switch ({}) {{", discriminant));
        self.out.indent();
        for case in cases {
            match &case.test {
                Some(test) => {
                    let test = self.expr(test);
                    self.out.line(format!("case {}: {{", test));
                }
                None => self.out.line("default: {"),
            }
            self.out.indent();
            self.generate_body(&case.body, scope);
            self.out.line("break;");
            self.out.dedent();
            self.out.line("}");
        }
        self.out.dedent();
        self.out.line("}");
    }

    /// `call('endpoint', [args], 'target' | null)`
    pub(crate) fn generate_call(
        &mut self,
        endpoint: &str,
        arguments: &[Node],
        target: Option<&str>,
    ) {
        let arguments: Vec<String> = arguments.iter().map(|a| self.expr(a)).collect();
        let target = target.map(js_string).unwrap_or_else(|| "null".to_string());
        self.out.line(format!(
            "call({}, [{}], {});",
            js_string(endpoint),
            arguments.join(", "),
            target
        ));
    }

    /// `@state` properties are written straight into state
    pub(crate) fn generate_state(
        &mut self,
        properties: &[Node],
    ) {
        for property in properties {
            match property.as_property() {
                Some((name, value)) => {
                    let value = self.expr(value);
                    self.out
                        .line(format!("state.set({}, {});", js_string(name), value));
                }
                None => self
                    .out
                    .line(format!("// unknown: {}", property.type_name())),
            }
        }
    }

    fn nested_body(
        &mut self,
        body: &[Node],
        scope: &Scope,
    ) {
        self.out.indent();
        self.generate_body(body, scope);
        self.out.dedent();
    }
}
