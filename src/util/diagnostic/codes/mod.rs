//! 错误码注册表
//!
//! Central registry of every diagnostic code the toolchain emits. Codes are
//! stable, machine-readable identifiers that editor tooling keys on, so they
//! are spelled out (`DUPLICATE_ID`) rather than numbered.

pub mod schema;
pub mod semantic;
pub mod syntax;

pub use schema::SCHEMA_CODES;
pub use semantic::SEMANTIC_CODES;
pub use syntax::SYNTAX_CODES;

pub mod builder;
pub use builder::{render_template, DiagnosticBuilder};

use crate::util::diagnostic::Severity;
use once_cell::sync::Lazy;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexer,
    Parser,
    Plugin,
    Schema,
    Law,
    Reference,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexer => write!(f, "Lexer"),
            ErrorCategory::Parser => write!(f, "Parser"),
            ErrorCategory::Plugin => write!(f, "Plugin"),
            ErrorCategory::Schema => write!(f, "Schema"),
            ErrorCategory::Law => write!(f, "Law"),
            ErrorCategory::Reference => write!(f, "Reference"),
        }
    }
}

/// 错误码定义
#[derive(Debug, Clone, Copy)]
pub struct ErrorCodeDefinition {
    /// 错误码，如 "DUPLICATE_ID"
    pub code: &'static str,
    /// 错误类别
    pub category: ErrorCategory,
    /// Severity used unless the builder overrides it
    pub severity: Severity,
    /// 消息模板，支持 {param} 占位符
    pub message_template: &'static str,
}

/// 完整的错误码注册表
static ERROR_CODES: Lazy<Vec<ErrorCodeDefinition>> = Lazy::new(|| {
    let mut codes: Vec<ErrorCodeDefinition> = Vec::new();
    codes.extend_from_slice(SYNTAX_CODES);
    codes.extend_from_slice(SCHEMA_CODES);
    codes.extend_from_slice(SEMANTIC_CODES);
    codes
});

impl ErrorCodeDefinition {
    /// 根据代码查找错误码定义
    pub fn find(code: &str) -> Option<&'static Self> {
        ERROR_CODES.iter().find(|c| c.code == code)
    }

    /// 获取所有错误码
    pub fn all() -> &'static [Self] {
        &ERROR_CODES
    }

    /// 创建 DiagnosticBuilder
    pub fn builder(&self) -> DiagnosticBuilder {
        DiagnosticBuilder::new(self.code, self.message_template, self.severity)
    }

    /// Builder for a registered code. Unregistered codes are a programming
    /// error, caught by the registry tests.
    pub(crate) fn lookup(code: &'static str) -> DiagnosticBuilder {
        match Self::find(code) {
            Some(def) => def.builder(),
            None => DiagnosticBuilder::new(code, "{message}", Severity::Error),
        }
    }
}
