//! Code generation
//!
//! This module handles the transformation from a validated `Program` to a
//! JavaScript module driving the runtime.

pub mod codegen;

pub use codegen::{generate, CodegenContext, GenerateOptions, OutputFormat};
