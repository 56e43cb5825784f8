//! Frontend compilation pipeline
//!
//! This module contains the lexer, parser, plugin layer and validator, and
//! the [`Compiler`] that strings them together with code generation:
//!
//! source → `before_parse` hooks → lexer/parser → `after_parse` hooks →
//! validator → code generator

use crate::frontend::core::lexer::{Lexer, TokenKind};
use crate::frontend::core::parser::{Parser, Program};
use crate::frontend::plugins::{PluginError, PluginRegistry, PluginSet};
use crate::frontend::validator::{validate, ValidateOptions, ValidationStats};
use crate::middle::codegen::{generate, GenerateOptions};
use crate::util::diagnostic::codes::ErrorCodeDefinition;
use crate::util::diagnostic::{error_count, Diagnostic};
use thiserror::Error;
use tracing::{debug, warn};

pub mod core;
pub mod plugins;
pub mod validator;

/// Pipeline options
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Plugins enabled for every file, in addition to `@use` directives
    pub plugins: Vec<String>,
    pub validate: ValidateOptions,
    pub generate: GenerateOptions,
}

/// Everything learned about one source file, short of generating code
#[derive(Debug, Clone)]
pub struct Analysis {
    pub program: Program,
    /// Lex, parse, plugin and validation diagnostics, in that order
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ValidationStats,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        error_count(&self.diagnostics) > 0
    }
}

/// Successful compilation
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub code: String,
    pub program: Program,
    /// Warnings only
    pub diagnostics: Vec<Diagnostic>,
}

/// Compilation errors
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{name}: compilation failed with {errors} error(s)")]
    Failed {
        name: String,
        errors: usize,
        diagnostics: Vec<Diagnostic>,
    },

    #[error(transparent)]
    Plugin(#[from] PluginError),
}

impl CompileError {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileError::Failed { diagnostics, .. } => diagnostics.clone(),
            CompileError::Plugin(err) => vec![err.to_diagnostic(None)],
        }
    }
}

/// Compiler context
///
/// Immutable once built; one `Compiler` can serve many files, including
/// from several threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: PluginRegistry,
    options: CompileOptions,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Compiler with the builtin plugins and default options
    #[inline]
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self::with_registry(PluginRegistry::with_builtins(), options)
    }

    pub fn with_registry(
        registry: PluginRegistry,
        options: CompileOptions,
    ) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Configured plugins followed by the ones the source asks for with
    /// `@use` / `@plugin`
    pub fn resolve_plugins(
        &self,
        source: &str,
    ) -> Result<PluginSet, PluginError> {
        let mut names = self.options.plugins.clone();
        names.extend(plugin_directives(source));
        self.registry.resolve(&names)
    }

    /// Run everything but code generation. Never fails: problems are
    /// reported as diagnostics.
    pub fn analyze(
        &self,
        name: &str,
        source: &str,
    ) -> Analysis {
        match self.resolve_plugins(source) {
            Ok(set) => self.analyze_with(&set, name, source),
            Err(err) => {
                warn!("{}: {}", name, err);
                let mut analysis = self.analyze_with(&PluginSet::default(), name, source);
                analysis.diagnostics.insert(0, err.to_diagnostic(None));
                analysis
            }
        }
    }

    /// Compile one source file to a JavaScript module
    pub fn compile(
        &self,
        name: &str,
        source: &str,
    ) -> Result<CompileOutput, CompileError> {
        let set = self.resolve_plugins(source)?;
        let analysis = self.analyze_with(&set, name, source);

        let errors = error_count(&analysis.diagnostics);
        if errors > 0 {
            return Err(CompileError::Failed {
                name: name.to_string(),
                errors,
                diagnostics: analysis.diagnostics,
            });
        }

        let code = generate(&analysis.program, &self.options.generate);
        debug!("{}: generated {} bytes", name, code.len());
        Ok(CompileOutput {
            code,
            program: analysis.program,
            diagnostics: analysis.diagnostics,
        })
    }

    fn analyze_with(
        &self,
        set: &PluginSet,
        name: &str,
        source: &str,
    ) -> Analysis {
        debug!("{}: plugins [{}]", name, set.names().join(", "));
        let source = set.before_parse(source);

        let mut parser = Parser::with_patterns(&source, set.patterns());
        let mut program = parser.parse();

        let mut diagnostics: Vec<Diagnostic> = parser
            .tokens()
            .iter()
            .filter_map(|token| match &token.kind {
                TokenKind::Error(message) => Some(
                    ErrorCodeDefinition::lex_error(message)
                        .at(token.span)
                        .build(),
                ),
                _ => None,
            })
            .collect();
        // errors raised on an error token are already reported as LEX_ERROR
        diagnostics.extend(
            parser
                .errors()
                .iter()
                .filter(|err| !err.is_lex_error())
                .map(|err| {
                    ErrorCodeDefinition::parse_error(&err.message)
                        .at(err.span())
                        .build()
                }),
        );
        if !parser.errors().is_empty() {
            warn!("{}: recovered from {} parse error(s)", name, parser.errors().len());
        }
        debug!("{}: parsed {} top-level items", name, program.body.len());

        if let Err(err) = set.after_parse(&mut program) {
            warn!("{}: {}", name, err);
            diagnostics.push(err.to_diagnostic(None));
        }

        let validation = validate(&program, &self.options.validate);
        diagnostics.extend(validation.diagnostics);

        Analysis {
            program,
            diagnostics,
            stats: validation.stats,
        }
    }
}

/// Plugin names named by `@use name` / `@plugin "name"`
pub fn plugin_directives(source: &str) -> Vec<String> {
    let tokens = Lexer::new(source).tokenize();
    tokens
        .windows(2)
        .filter_map(|pair| match (&pair[0].kind, &pair[1].kind) {
            (TokenKind::AtIdentifier(keyword), TokenKind::Identifier(name) | TokenKind::String(name))
                if keyword == "use" || keyword == "plugin" =>
            {
                Some(name.clone())
            }
            _ => None,
        })
        .collect()
}
