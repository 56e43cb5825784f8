//! 诊断数据结构
//!
//! A `Diagnostic` is the uniform `{severity, code, message, location?}` record
//! every stage reports through. Messages are rendered when the diagnostic is
//! built, so consumers never re-interpret them.
//!
//! Diagnostics are created through [`DiagnosticBuilder`], normally via the
//! shortcut constructors on [`ErrorCodeDefinition`]:
//!
//! ```ignore
//! ErrorCodeDefinition::duplicate_id("header")
//!     .at(span)
//!     .build();
//! ```
//!
//! [`DiagnosticBuilder`]: crate::util::diagnostic::codes::DiagnosticBuilder
//! [`ErrorCodeDefinition`]: crate::util::diagnostic::codes::ErrorCodeDefinition

use crate::util::span::Span;
use serde::Serialize;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// 检查是否为错误级别
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// A rendered diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 严重级别
    pub severity: Severity,
    /// Stable machine-readable code, e.g. `DUPLICATE_ID`
    pub code: String,
    /// 完整消息
    pub message: String,
    /// 位置信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
}

impl Diagnostic {
    /// `pub(crate)`: only `DiagnosticBuilder::build()` constructs diagnostics,
    /// which keeps every code inside the registry.
    pub(crate) fn new(
        severity: Severity,
        code: impl Into<String>,
        message: impl Into<String>,
        location: Option<Span>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            location,
        }
    }

    /// 检查是否为错误
    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(span) = self.location.filter(|s| !s.is_dummy()) {
            write!(f, " at {}", span.start)?;
        }
        Ok(())
    }
}
