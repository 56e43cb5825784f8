//! 统一诊断系统
//!
//! Every stage reports problems as [`Diagnostic`] records with a stable code
//! from the [`codes`] registry.
//!
//! # 模块结构
//!
//! - [`error`] - 诊断数据结构 (Diagnostic, Severity)
//! - [`codes`] - 错误码注册表与构建器
//! - [`emitter`] - 文本 / JSON 渲染
//! - [`check`] - `asxr check` 命令

pub mod check;
pub mod codes;
pub mod emitter;
pub mod error;

pub use codes::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
pub use emitter::{EmitterConfig, JsonEmitter, TextEmitter};
pub use error::{Diagnostic, Severity};

/// Count of error-severity diagnostics
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Count of warning-severity diagnostics
pub fn warning_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count()
}
