//! Core algorithm layer
//!
//! The lexer and parser; everything downstream works on the `Program`
//! they produce.

pub mod lexer;
pub mod parser;

// Re-export commonly used items
pub use lexer::tokenize;
pub use parser::{parse, parse_with_errors, Parser, Program};
