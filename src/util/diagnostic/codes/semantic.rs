//! Whole-program codes: ids, references and laws

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::Severity;

pub static SEMANTIC_CODES: &[ErrorCodeDefinition] = &[
    ErrorCodeDefinition {
        code: "DUPLICATE_ID",
        category: ErrorCategory::Reference,
        severity: Severity::Error,
        message_template: "Duplicate block id '{id}'",
    },
    ErrorCodeDefinition {
        code: "UNDEFINED_REFERENCE",
        category: ErrorCategory::Reference,
        severity: Severity::Error,
        message_template: "Reference to undefined block #{name}",
    },
    ErrorCodeDefinition {
        code: "UNUSED_BLOCK",
        category: ErrorCategory::Reference,
        severity: Severity::Warning,
        message_template: "Block '{id}' is never referenced",
    },
    ErrorCodeDefinition {
        code: "LAW_VIOLATION",
        category: ErrorCategory::Law,
        severity: Severity::Error,
        message_template: "[{law}] {message}",
    },
];

impl ErrorCodeDefinition {
    /// DUPLICATE_ID 重复的块 ID
    pub fn duplicate_id(id: &str) -> DiagnosticBuilder {
        Self::lookup("DUPLICATE_ID").param("id", id)
    }

    /// UNDEFINED_REFERENCE 未定义的块引用
    pub fn undefined_reference(name: &str) -> DiagnosticBuilder {
        Self::lookup("UNDEFINED_REFERENCE").param("name", name)
    }

    /// UNUSED_BLOCK 未使用的块
    pub fn unused_block(id: &str) -> DiagnosticBuilder {
        Self::lookup("UNUSED_BLOCK").param("id", id)
    }

    /// LAW_VIOLATION
    pub fn law_violation(
        law: &str,
        message: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("LAW_VIOLATION")
            .param("law", law)
            .param("message", message)
    }
}
