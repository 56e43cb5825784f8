//! 响应式结构代码生成
//!
//! `@reactor`, `@every` and `@on` all lower to one runtime call,
//! `reactor(kind, config, handler[, otherwise])`.

use crate::frontend::core::parser::ast::Node;
use crate::middle::codegen::CodegenContext;

use super::expr::js_string;
use super::Scope;

impl CodegenContext<'_> {
    pub(crate) fn generate_reactor(
        &mut self,
        id: Option<&str>,
        body: &[Node],
    ) {
        let (config, prefix) = match id {
            Some(id) => (
                format!("{{ id: {} }}", js_string(id)),
                format!("blocks[{}] = ", js_string(id)),
            ),
            None => ("{}".to_string(), String::new()),
        };
        self.reactive_call(&prefix, "reactor", &config, body, None);
    }

    pub(crate) fn generate_timer(
        &mut self,
        interval: &Node,
        body: &[Node],
    ) {
        let interval = self.expr(interval);
        let config = format!("{{ interval: {} }}", interval);
        self.reactive_call("", "every", &config, body, None);
    }

    /// The trigger is wrapped in a thunk so the runtime can re-evaluate it
    pub(crate) fn generate_trigger(
        &mut self,
        trigger: &Node,
        body: &[Node],
        otherwise: Option<&[Node]>,
    ) {
        let trigger = self.expr(trigger);
        let config = format!("{{ trigger: () => {} }}", trigger);
        self.reactive_call("", "on", &config, body, otherwise);
    }

    fn reactive_call(
        &mut self,
        prefix: &str,
        kind: &str,
        config: &str,
        body: &[Node],
        otherwise: Option<&[Node]>,
    ) {
        self.out.line(format!(
            "{}reactor({}, {}, () => {{",
            prefix,
            js_string(kind),
            config
        ));
        self.out.indent();
        self.generate_body(body, &Scope::Handler);
        self.out.dedent();

        if let Some(otherwise) = otherwise {
            self.out.line("}, () => {");
            self.out.indent();
            self.generate_body(otherwise, &Scope::Handler);
            self.out.dedent();
        }
        self.out.line("});");
    }
}
