//! 校验器测试
//!
//! - references: ids, duplicates, `#name` resolution, unused warnings
//! - schema: declarative schema conformance
//! - laws: builtin and custom laws


use crate::frontend::core::parser::ast::Program;
use crate::frontend::core::parser::parse_with_errors;
use crate::frontend::validator::{validate, ValidateOptions, ValidationResult};

pub(super) fn parse_clean(source: &str) -> Program {
    let (program, errors) = parse_with_errors(source);
    assert!(errors.is_empty(), "{:?}", errors);
    program
}

pub(super) fn validate_source(
    source: &str,
    options: &ValidateOptions,
) -> ValidationResult {
    validate(&parse_clean(source), options)
}

pub(super) fn codes(result: &ValidationResult) -> Vec<&str> {
    result.diagnostics.iter().map(|d| d.code.as_str()).collect()
}
