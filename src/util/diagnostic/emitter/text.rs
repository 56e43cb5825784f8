//! 诊断渲染器
//!
//! Human-readable output with a source snippet and caret underline:
//!
//! ```text
//! error[DUPLICATE_ID]: Duplicate block id 'dup'
//!  --> page.asxr:3:9
//!    3 | @atomic[dup] { }
//!      |         ^^^
//! ```

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::SourceFile;
use owo_colors::OwoColorize;

/// 渲染器配置
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// 是否启用颜色输出
    pub use_colors: bool,
    /// 是否显示源码片段
    pub show_source: bool,
    /// 是否显示行号
    pub show_line_numbers: bool,
    /// 指示字符 (默认: "^")
    pub indicator: char,
    /// 最大显示行数
    pub max_lines: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_line_numbers: true,
            indicator: '^',
            max_lines: 6,
        }
    }
}

/// 文本诊断渲染器
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    /// 创建新的文本渲染器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义配置创建渲染器
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// 渲染单个诊断
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        self.render_with_source(diagnostic, None)
    }

    /// 渲染诊断到指定源码文件
    pub fn render_with_source(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut output = self.render_header(diagnostic);
        output.push_str(&self.render_location(diagnostic, source_file));

        if self.config.show_source {
            if let Some(snippet) = self.render_source_snippet(diagnostic, source_file) {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// 渲染多个诊断
    pub fn render_all<'a>(
        &self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
        source_file: Option<&SourceFile>,
    ) -> String {
        diagnostics
            .into_iter()
            .map(|d| self.render_with_source(d, source_file))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let severity = diagnostic.severity.to_string();
        let severity = if self.config.use_colors {
            match diagnostic.severity {
                Severity::Error => severity.red().bold().to_string(),
                Severity::Warning => severity.yellow().bold().to_string(),
                Severity::Info => severity.blue().to_string(),
                Severity::Hint => severity.cyan().to_string(),
            }
        } else {
            severity
        };

        let code = format!("[{}]", diagnostic.code);
        let code = if self.config.use_colors {
            code.bold().to_string()
        } else {
            code
        };

        format!("{}{}: {}\n", severity, code, diagnostic.message)
    }

    fn render_location(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        match diagnostic.location.filter(|s| !s.is_dummy()) {
            Some(span) => {
                let file_name = source_file
                    .map(|sf| sf.name.as_str())
                    .unwrap_or("<unknown>");
                format!(" --> {}:{}:{}\n", file_name, span.start.line, span.start.column)
            }
            None => String::new(),
        }
    }

    fn render_source_snippet(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> Option<String> {
        let span = diagnostic.location.filter(|s| !s.is_dummy())?;
        let source_file = source_file?;
        let start_line = span.start.line;
        let end_line = span.end.line.max(start_line);

        let lines_to_show = (end_line - start_line + 1).min(self.config.max_lines);
        let mut output = String::new();

        for i in 0..lines_to_show {
            let line_num = start_line + i;
            let Some(line) = source_file.line_text(line_num) else {
                break;
            };
            if self.config.show_line_numbers {
                output.push_str(&format!("{:>4} | ", line_num));
            } else {
                output.push_str("     | ");
            }
            output.push_str(line);
            output.push('\n');

            if i == 0 {
                let spaces = " ".repeat(span.start.column.saturating_sub(1));
                let width = if start_line == end_line {
                    span.end.column.saturating_sub(span.start.column).max(1)
                } else {
                    line.chars()
                        .count()
                        .saturating_sub(span.start.column - 1)
                        .max(1)
                };
                let carets = self.config.indicator.to_string().repeat(width);
                let carets = if self.config.use_colors {
                    match diagnostic.severity {
                        Severity::Error => carets.red().to_string(),
                        Severity::Warning => carets.yellow().to_string(),
                        _ => carets,
                    }
                } else {
                    carets
                };
                output.push_str(&format!("     | {}{}\n", spaces, carets));
            }
        }

        Some(output)
    }
}
