//! ASXR
//!
//! A compiler for a declarative DSL describing UI blocks, reactive state and
//! constraints. Source is lexed and parsed into an AST, optionally rewritten
//! by dialect plugins (`jsx`, `vue`), validated against schemas and laws,
//! and finally turned into a JavaScript module driving the ASXR runtime.
//!
//! # Example
//!
//! ```asxr
//! @atomic[counter] {
//!     count: 0
//!     label: "Clicks: " + {{clicks}}
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/asxr")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;
pub mod middle;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use frontend::core::lexer::tokenize;
pub use frontend::core::parser::{parse, parse_with_errors, Program};
pub use frontend::plugins::{Plugin, PluginRegistry};
pub use frontend::validator::{validate, ValidateOptions, ValidationResult};
pub use frontend::{Analysis, CompileError, CompileOptions, CompileOutput, Compiler};
pub use middle::codegen::{generate, GenerateOptions, OutputFormat};
pub use util::diagnostic::Diagnostic;

use ::std::fs;
use ::std::path::Path;
use tracing::debug;

/// Compiler version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compiler name
pub const NAME: &str = "ASXR";

/// Compile source text with the builtin plugins
///
/// # Example
///
/// ```
/// use asxr::{compile, CompileOptions};
///
/// let output = compile("@atomic[a] { count: 1 }", CompileOptions::default()).unwrap();
/// assert!(output.code.contains("createBlock('atomic', 'a', props0, children0)"));
/// ```
pub fn compile(
    source: &str,
    options: CompileOptions,
) -> ::std::result::Result<CompileOutput, CompileError> {
    Compiler::with_options(options).compile("<input>", source)
}

/// Compile a file on disk
pub fn compile_file(
    path: &Path,
    options: CompileOptions,
) -> Result<CompileOutput> {
    debug!("compiling {}", path.display());
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let name = path.display().to_string();
    Compiler::with_options(options)
        .compile(&name, &source)
        .with_context(|| format!("Failed to compile: {}", path.display()))
}
