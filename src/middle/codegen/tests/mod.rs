//! 代码生成测试
//!
//! - expr: expression rendering
//! - block: blocks, components and proposals
//! - stmt: control flow and reactive constructs
//! - generator: module framing, formats and determinism

mod generator;
mod stmt;

use crate::frontend::core::parser::parse_with_errors;
use crate::middle::codegen::{generate, GenerateOptions};

/// Generate `source` without a header and return the body of `mount`,
/// dedented to column zero
pub(super) fn mount_body(source: &str) -> String {
    let (program, errors) = parse_with_errors(source);
    assert!(errors.is_empty(), "{:?}", errors);
    let options = GenerateOptions {
        header: false,
        ..GenerateOptions::default()
    };
    let output = generate(&program, &options);

    let mut body = String::new();
    let mut inside = false;
    for line in output.lines() {
        if line.starts_with("export default function mount") {
            inside = true;
            continue;
        }
        if line == "  return blocks;" {
            break;
        }
        if inside {
            body.push_str(line.strip_prefix("  ").unwrap_or(line));
            body.push('\n');
        }
    }
    body
}
