//! 校验器
//!
//! Whole-program validation of a parsed (and plugin-lowered) `Program`.
//! Checks run in a fixed order so diagnostics are stable:
//!
//! 1. duplicate block ids
//! 2. schema conformance of block properties
//! 3. laws
//! 4. `#name` resolution (when `check_references`)
//! 5. unused block ids (when `warn_unused`)
//!
//! The validator never fails; every finding is a [`Diagnostic`].

pub mod builtin;
pub mod laws;
pub mod references;
pub mod schema;

#[cfg(test)]
mod tests;

pub use laws::{builtin_laws, Law, LawViolation};
pub use schema::{Schema, SchemaType};

use crate::frontend::core::parser::ast::Program;
use crate::frontend::core::parser::walk::for_each_program_node;
use crate::util::diagnostic::codes::ErrorCodeDefinition;
use crate::util::diagnostic::{Diagnostic, Severity};
use indexmap::IndexMap;
use references::SymbolTable;
use schema::SchemaChecker;
use serde::Serialize;
use tracing::debug;

/// 校验选项
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Report `#name` references to undeclared blocks
    pub check_references: bool,
    /// Warn about block ids nothing references
    pub warn_unused: bool,
    /// Checked in addition to any builtin schema for the same block type
    pub custom_schemas: IndexMap<String, Schema>,
    /// Run after the builtin laws
    pub custom_laws: Vec<Law>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            check_references: true,
            warn_unused: false,
            custom_schemas: IndexMap::new(),
            custom_laws: Vec::new(),
        }
    }
}

/// Counters reported alongside the diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub blocks: usize,
    pub references: usize,
    pub schemas_checked: usize,
    pub laws_run: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// 校验结果
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// No error-severity diagnostics
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ValidationStats,
}

impl ValidationResult {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Diagnostics carrying `code`
    pub fn with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }
}

/// Validate a program
pub fn validate(
    program: &Program,
    options: &ValidateOptions,
) -> ValidationResult {
    let symbols = SymbolTable::collect(program);
    let mut stats = ValidationStats {
        blocks: symbols.blocks,
        references: symbols.references.len(),
        ..ValidationStats::default()
    };
    let mut diagnostics = symbols.duplicate_diagnostics();

    let mut checker = SchemaChecker::new();
    for_each_program_node(program, &mut |node| {
        let (Some(block_type), Some(body)) = (node.block_type(), node.body()) else {
            return;
        };
        let label = match node.block_id() {
            Some(id) => format!("@{}[{}]", block_type, id),
            None => format!("@{}", block_type),
        };
        let schemas = builtin::builtin_schema(block_type)
            .into_iter()
            .chain(options.custom_schemas.get(block_type));
        for schema in schemas {
            checker.check_block(block_type, &label, body, node.span, schema);
            stats.schemas_checked += 1;
        }
    });
    diagnostics.extend(checker.into_diagnostics());

    for law in builtin_laws().iter().chain(&options.custom_laws) {
        stats.laws_run += 1;
        for violation in law.check(program) {
            diagnostics.push(
                ErrorCodeDefinition::law_violation(&law.name, &violation.message)
                    .at_opt(violation.location)
                    .build(),
            );
        }
    }

    if options.check_references {
        diagnostics.extend(symbols.undefined_diagnostics());
    }
    if options.warn_unused {
        diagnostics.extend(symbols.unused_diagnostics());
    }

    stats.errors = diagnostics.iter().filter(|d| d.is_error()).count();
    stats.warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    debug!(
        "validate: {} blocks, {} references, {} errors, {} warnings",
        stats.blocks, stats.references, stats.errors, stats.warnings
    );

    ValidationResult {
        valid: stats.errors == 0,
        diagnostics,
        stats,
    }
}
