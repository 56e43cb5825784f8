//! Schema conformance codes

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::Severity;

macro_rules! schema_code {
    ($code:literal, $template:literal) => {
        ErrorCodeDefinition {
            code: $code,
            category: ErrorCategory::Schema,
            severity: Severity::Error,
            message_template: $template,
        }
    };
}

/// Schema codes
pub static SCHEMA_CODES: &[ErrorCodeDefinition] = &[
    schema_code!("TYPE_MISMATCH", "{path}: expected {expected}, found {found}"),
    schema_code!("ENUM_MISMATCH", "{path}: {value} is not one of {allowed}"),
    schema_code!("PATTERN_MISMATCH", "{path}: '{value}' does not match /{pattern}/"),
    schema_code!("MIN_VALUE", "{path}: {value} is less than the minimum {limit}"),
    schema_code!("MAX_VALUE", "{path}: {value} is greater than the maximum {limit}"),
    schema_code!("MIN_LENGTH", "{path}: length {length} is shorter than {limit}"),
    schema_code!("MAX_LENGTH", "{path}: length {length} is longer than {limit}"),
    schema_code!("REQUIRED", "{path}: missing required property '{property}'"),
    schema_code!("ADDITIONAL_PROPERTY", "{path}: property '{property}' is not allowed"),
    schema_code!("INVALID_SCHEMA", "Schema for '{block_type}' is invalid: {reason}"),
];

impl ErrorCodeDefinition {
    /// TYPE_MISMATCH
    pub fn type_mismatch(
        path: &str,
        expected: &str,
        found: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("TYPE_MISMATCH")
            .param("path", path)
            .param("expected", expected)
            .param("found", found)
    }

    /// ENUM_MISMATCH
    pub fn enum_mismatch(
        path: &str,
        value: &str,
        allowed: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("ENUM_MISMATCH")
            .param("path", path)
            .param("value", value)
            .param("allowed", allowed)
    }

    /// PATTERN_MISMATCH
    pub fn pattern_mismatch(
        path: &str,
        value: &str,
        pattern: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("PATTERN_MISMATCH")
            .param("path", path)
            .param("value", value)
            .param("pattern", pattern)
    }

    /// MIN_VALUE / MAX_VALUE
    pub fn out_of_range(
        code: &'static str,
        path: &str,
        value: f64,
        limit: f64,
    ) -> DiagnosticBuilder {
        Self::lookup(code)
            .param("path", path)
            .param("value", value.to_string())
            .param("limit", limit.to_string())
    }

    /// MIN_LENGTH / MAX_LENGTH
    pub fn bad_length(
        code: &'static str,
        path: &str,
        length: usize,
        limit: usize,
    ) -> DiagnosticBuilder {
        Self::lookup(code)
            .param("path", path)
            .param("length", length.to_string())
            .param("limit", limit.to_string())
    }

    /// REQUIRED
    pub fn required_property(
        path: &str,
        property: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("REQUIRED")
            .param("path", path)
            .param("property", property)
    }

    /// ADDITIONAL_PROPERTY
    pub fn additional_property(
        path: &str,
        property: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("ADDITIONAL_PROPERTY")
            .param("path", path)
            .param("property", property)
    }

    /// INVALID_SCHEMA
    pub fn invalid_schema(
        block_type: &str,
        reason: &str,
    ) -> DiagnosticBuilder {
        Self::lookup("INVALID_SCHEMA")
            .param("block_type", block_type)
            .param("reason", reason)
    }
}
