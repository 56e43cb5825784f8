//! JSON 诊断渲染器
//!
//! 提供符合 Language Server Protocol (LSP) 规范的 JSON 输出。Ranges are
//! 0-based; diagnostics without a location map to the empty range at 0:0.

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::Span;
use serde::{Deserialize, Serialize};
use serde_json::to_string_pretty;

/// LSP 位置范围
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspRange {
    pub start: LspPosition,
    pub end: LspPosition,
}

/// LSP 位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspPosition {
    pub line: u32,
    pub character: u32,
}

/// LSP 诊断结构
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspDiagnostic {
    /// 诊断范围
    pub range: LspRange,
    /// 严重级别 (1 = error … 4 = hint)
    pub severity: u8,
    /// 错误代码
    pub code: String,
    /// 错误代码来源
    pub source: String,
    /// 诊断消息
    pub message: String,
    /// Originating file, present in `asxr check --json` output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// JSON 诊断渲染器
#[derive(Debug, Clone)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// 渲染诊断为 JSON 字符串
    pub fn render(diagnostic: &Diagnostic) -> String {
        to_string_pretty(&Self::to_lsp_diagnostic(diagnostic, None))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// 渲染多个诊断
    pub fn render_all(diagnostics: &[Diagnostic]) -> String {
        let lsp_diagnostics: Vec<LspDiagnostic> = diagnostics
            .iter()
            .map(|d| Self::to_lsp_diagnostic(d, None))
            .collect();
        to_string_pretty(&lsp_diagnostics).unwrap_or_else(|_| "[]".to_string())
    }

    /// 转换为 LSP 诊断结构
    pub fn to_lsp_diagnostic(
        diagnostic: &Diagnostic,
        file: Option<&str>,
    ) -> LspDiagnostic {
        LspDiagnostic {
            range: Self::span_to_range(diagnostic.location.as_ref()),
            severity: match diagnostic.severity {
                Severity::Error => 1,
                Severity::Warning => 2,
                Severity::Info => 3,
                Severity::Hint => 4,
            },
            code: diagnostic.code.clone(),
            source: "asxr".to_string(),
            message: diagnostic.message.clone(),
            file: file.map(str::to_string),
        }
    }

    /// 转换 Span 到 LSP Range
    fn span_to_range(span: Option<&Span>) -> LspRange {
        match span.filter(|s| !s.is_dummy()) {
            Some(s) => LspRange {
                start: LspPosition {
                    line: s.start.line.saturating_sub(1) as u32,
                    character: s.start.column.saturating_sub(1) as u32,
                },
                end: LspPosition {
                    line: s.end.line.saturating_sub(1) as u32,
                    character: s.end.column.saturating_sub(1) as u32,
                },
            },
            None => Self::dummy_range(),
        }
    }

    /// 创建虚拟 Range（用于无位置的错误）
    fn dummy_range() -> LspRange {
        let origin = LspPosition {
            line: 0,
            character: 0,
        };
        LspRange {
            start: origin,
            end: origin,
        }
    }
}
