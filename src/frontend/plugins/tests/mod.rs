//! 插件系统测试
//!
//! - registry: registration, resolution and conflicts
//! - lowering: markup → canonical nodes for both dialects
//! - sugar: control-flow source rewrites

mod registry;
mod sugar;

use crate::frontend::core::parser::ast::Program;
use crate::frontend::core::parser::Parser;
use crate::frontend::plugins::PluginRegistry;

/// Run `source` through the named builtin plugins and return the lowered
/// program
pub(super) fn compile_with(
    plugins: &[&str],
    source: &str,
) -> Program {
    let set = PluginRegistry::with_builtins().resolve(plugins).unwrap();
    let source = set.before_parse(source);
    let mut parser = Parser::with_patterns(&source, set.patterns());
    let mut program = parser.parse();
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
    set.after_parse(&mut program).unwrap();
    program
}
