//! 词法、语法与插件阶段的错误码

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::Severity;

/// Lexer / parser / plugin codes
pub static SYNTAX_CODES: &[ErrorCodeDefinition] = &[
    ErrorCodeDefinition {
        code: "LEX_ERROR",
        category: ErrorCategory::Lexer,
        severity: Severity::Error,
        message_template: "{message}",
    },
    ErrorCodeDefinition {
        code: "PARSE_ERROR",
        category: ErrorCategory::Parser,
        severity: Severity::Error,
        message_template: "{message}",
    },
    ErrorCodeDefinition {
        code: "PLUGIN_CONFLICT",
        category: ErrorCategory::Plugin,
        severity: Severity::Error,
        message_template: "Plugin '{plugin}' conflicts with '{other}'",
    },
    ErrorCodeDefinition {
        code: "PLUGIN_ERROR",
        category: ErrorCategory::Plugin,
        severity: Severity::Error,
        message_template: "{message}",
    },
];

// 快捷方法
impl ErrorCodeDefinition {
    /// LEX_ERROR 词法错误
    pub fn lex_error(message: &str) -> DiagnosticBuilder {
        Self::lookup("LEX_ERROR").param("message", message)
    }

    /// PARSE_ERROR 语法错误
    pub fn parse_error(message: &str) -> DiagnosticBuilder {
        Self::lookup("PARSE_ERROR").param("message", message)
    }

    /// PLUGIN_CONFLICT 插件冲突
    pub fn plugin_conflict(
        plugin: &str,
        other: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("PLUGIN_CONFLICT")
            .param("plugin", plugin)
            .param("other", other)
    }

    /// PLUGIN_ERROR 其他插件错误
    pub fn plugin_error(message: &str) -> DiagnosticBuilder {
        Self::lookup("PLUGIN_ERROR").param("message", message)
    }
}
