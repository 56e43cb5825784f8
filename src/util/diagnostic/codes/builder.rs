//! 通用诊断构建器
//!
//! Template-parameterised diagnostic construction.

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::Span;

/// 诊断构建器（支持模板参数）
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    code: &'static str,
    message_template: &'static str,
    severity: Severity,
    params: Vec<(&'static str, String)>,
    span: Option<Span>,
}

impl DiagnosticBuilder {
    /// 创建新的诊断构建器
    pub fn new(
        code: &'static str,
        template: &'static str,
        severity: Severity,
    ) -> Self {
        Self {
            code,
            message_template: template,
            severity,
            params: Vec::new(),
            span: None,
        }
    }

    /// 添加模板参数
    pub fn param(
        mut self,
        key: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// 设置位置
    #[inline]
    pub fn at(
        mut self,
        span: Span,
    ) -> Self {
        self.span = Some(span);
        self
    }

    /// 设置可选位置
    #[inline]
    pub fn at_opt(
        mut self,
        span: Option<Span>,
    ) -> Self {
        self.span = span;
        self
    }

    /// Override the registry's default severity
    #[inline]
    pub fn severity(
        mut self,
        severity: Severity,
    ) -> Self {
        self.severity = severity;
        self
    }

    /// 构建 Diagnostic
    pub fn build(&self) -> Diagnostic {
        Diagnostic::new(
            self.severity,
            self.code,
            render_template(self.message_template, &self.params),
            self.span,
        )
    }
}

/// Substitute `{key}` placeholders. Unknown keys are left verbatim so a
/// missing parameter shows up in the output instead of aborting.
pub fn render_template(
    template: &str,
    params: &[(&'static str, String)],
) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match params.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                output.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}
