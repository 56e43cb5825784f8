//! Control-flow sugar
//!
//! Source rewrites only: `@elseif` / `@elif` become `@else @if`, and
//! `@unless (c)` becomes `@if (!(c))`. Rewrites change lengths, so spans
//! after a rewrite refer to the rewritten text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Plugin, PluginError};

pub const NAME: &str = "control-flow";

static ELSE_IF: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"@(?:elseif|elif)\b").ok());

pub fn rewrite(source: &str) -> String {
    let source = match ELSE_IF.as_ref() {
        Some(re) => re.replace_all(source, "@else @if").into_owned(),
        None => source.to_string(),
    };
    rewrite_unless(&source)
}

/// `@unless (c)` → `@if (!(c))`; an `@unless` without a balanced
/// parenthesised condition is left alone
fn rewrite_unless(source: &str) -> String {
    const KEYWORD: &str = "@unless";
    let mut output = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(at) = rest.find(KEYWORD) {
        output.push_str(&rest[..at]);
        let after = &rest[at + KEYWORD.len()..];
        let boundary = !after.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '-');
        let trimmed = after.trim_start();

        match (boundary && trimmed.starts_with('('))
            .then(|| matching_paren(trimmed))
            .flatten()
        {
            Some(close) => {
                output.push_str("@if (!");
                output.push_str(&trimmed[..=close]);
                output.push(')');
                rest = &trimmed[close + 1..];
            }
            None => {
                output.push_str(KEYWORD);
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

/// Byte index of the `)` closing the `(` at index 0
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

pub fn plugin() -> Result<Plugin, PluginError> {
    Plugin::builder(NAME, env!("CARGO_PKG_VERSION"))
        .before_parse(rewrite)
        .build()
}
