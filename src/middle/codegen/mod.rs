//! 代码生成器
//!
//! 将 `Program` 转换为调用运行时 API 的 JavaScript 模块。
//! 核心设计原则：
//! 1. 纯结构化：每种节点对应一个生成例程，没有优化遍
//! 2. 确定性：相同的输入与选项产生逐字节相同的输出
//! 3. 永不失败：无法识别的节点输出 `// unknown: <type>` 标记
//!
//! ## 输出形状
//!
//! ```js
//! // Generated by asxr <version>. Do not edit.
//! import { createBlock, createDom, propose, call, reactor } from '@asxr/runtime';
//!
//! export default function mount(state, blocks = {}) {
//!   …statements…
//!   return blocks;
//! }
//! ```
//!
//! Nested blocks are emitted inline, in source order, each in its own
//! `{ … }` scope that pushes the finished block into the parent's children.

pub mod buffer;
pub mod gen;

#[cfg(test)]
mod tests;

use crate::frontend::core::parser::ast::Program;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use self::buffer::CodeBuffer;
use self::gen::Scope;

/// The five runtime functions every module imports
pub const RUNTIME_IMPORTS: [&str; 5] = ["createBlock", "createDom", "propose", "call", "reactor"];

/// 默认运行时模块路径
pub const DEFAULT_RUNTIME_PATH: &str = "@asxr/runtime";

/// 模块格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `import` / `export default`
    #[default]
    Esm,
    /// `require` / `module.exports`
    #[serde(alias = "cjs")]
    CommonJs,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "esm" | "module" => Ok(OutputFormat::Esm),
            "cjs" | "commonjs" => Ok(OutputFormat::CommonJs),
            other => Err(format!("unknown output format '{}', expected esm or cjs", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            OutputFormat::Esm => write!(f, "esm"),
            OutputFormat::CommonJs => write!(f, "cjs"),
        }
    }
}

/// 代码生成选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub format: OutputFormat,
    /// Module the runtime functions are imported from
    pub runtime_path: String,
    /// Emit the `// Generated by …` comment
    pub header: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Esm,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            header: true,
        }
    }
}

/// 代码生成上下文
///
/// Owns the output buffer and the counter that names block scopes
/// (`props0`, `children0`, …). One context generates one module.
pub struct CodegenContext<'o> {
    options: &'o GenerateOptions,
    out: CodeBuffer,
    next_scope: usize,
}

impl<'o> CodegenContext<'o> {
    pub fn new(options: &'o GenerateOptions) -> Self {
        Self {
            options,
            out: CodeBuffer::new(),
            next_scope: 0,
        }
    }

    /// 生成完整模块
    pub fn generate(
        mut self,
        program: &Program,
    ) -> String {
        if self.options.header {
            self.out.line(format!(
                "// Generated by asxr {}. Do not edit.",
                env!("CARGO_PKG_VERSION")
            ));
        }

        let imports = RUNTIME_IMPORTS.join(", ");
        let runtime = gen::expr::js_string(&self.options.runtime_path);
        match self.options.format {
            OutputFormat::Esm => {
                self.out
                    .line(format!("import {{ {} }} from {};", imports, runtime));
                self.out.blank();
                self.out
                    .line("export default function mount(state, blocks = {}) {");
            }
            OutputFormat::CommonJs => {
                self.out
                    .line(format!("const {{ {} }} = require({});", imports, runtime));
                self.out.blank();
                self.out
                    .line("module.exports = function mount(state, blocks = {}) {");
            }
        }

        self.out.indent();
        self.generate_body(&program.body, &Scope::Root);
        self.out.line("return blocks;");
        self.out.dedent();

        match self.options.format {
            OutputFormat::Esm => self.out.line("}"),
            OutputFormat::CommonJs => self.out.line("};"),
        }

        debug!(
            "codegen: {} top-level items, {} block scopes",
            program.body.len(),
            self.next_scope
        );
        self.out.finish()
    }

    /// Allocate the next block scope number
    fn scope_id(&mut self) -> usize {
        let id = self.next_scope;
        self.next_scope += 1;
        id
    }
}

/// Generate a JavaScript module for `program`
pub fn generate(
    program: &Program,
    options: &GenerateOptions,
) -> String {
    CodegenContext::new(options).generate(program)
}
