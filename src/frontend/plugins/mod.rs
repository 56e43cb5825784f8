//! 插件系统
//!
//! Plugins extend the language with markup dialects and source rewrites.
//!
//! # 模块结构
//!
//! - [`registry`] - 插件注册表与冲突检查
//! - [`lowering`] - markup element → canonical nodes
//! - [`jsx`], [`vue`], [`control_flow`] - 内置方言
//!
//! A plugin contributes up to four things: syntax patterns that make the
//! parser capture markup as `PluginNode` sentinels, per-`node_type` handlers
//! that replace those sentinels, and `before_parse` / `after_parse` hooks.
//! Resolution is explicit: a selected set with conflicting members is an
//! error, never a silent override.

pub mod control_flow;
pub mod error;
pub mod jsx;
pub mod lowering;
pub mod registry;
pub mod vue;

#[cfg(test)]
mod tests;

pub use error::PluginError;
pub use registry::PluginRegistry;

use crate::frontend::core::parser::ast::{MarkupElement, Node, NodeKind, Program};
use crate::frontend::core::parser::walk::visit_bodies_mut;
use crate::util::span::Span;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Source rewrite run before lexing
pub type SourceHook = Arc<dyn Fn(&str) -> String + Send + Sync>;
/// Whole-program rewrite run after parsing
pub type ProgramHook = Arc<dyn Fn(&mut Program) -> Result<(), String> + Send + Sync>;
/// Replacement for one captured markup element
pub type NodeHandler = Arc<dyn Fn(&MarkupElement, Span) -> Result<Node, String> + Send + Sync>;

/// 插件元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMeta {
    pub name: String,
    pub version: String,
    /// Plugins that may not be selected together with this one
    pub conflicts: Vec<String>,
}

/// Markup trigger: when `pattern` matches the source at a `<` in item
/// position, the element there is captured as a `PluginNode` of `ast_node`.
#[derive(Debug, Clone)]
pub struct SyntaxPattern {
    pub pattern: Regex,
    pub ast_node: String,
    /// Higher wins when several patterns match
    pub priority: i32,
    /// `{{ path }}` in captured markup is a state reference; otherwise it is
    /// an expression container around `{ … }`
    pub interpolation: bool,
}

impl SyntaxPattern {
    pub fn new(
        pattern: &str,
        ast_node: impl Into<String>,
        priority: i32,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            ast_node: ast_node.into(),
            priority,
            interpolation: false,
        })
    }

    /// Read `{{ path }}` as interpolation
    pub fn with_interpolation(mut self) -> Self {
        self.interpolation = true;
        self
    }

    /// Whether the pattern matches at the very start of `text`
    pub fn matches_at_start(
        &self,
        text: &str,
    ) -> bool {
        self.pattern
            .find(text)
            .map(|m| m.start() == 0)
            .unwrap_or(false)
    }
}

/// 插件
pub struct Plugin {
    pub meta: PluginMeta,
    pub syntax: Vec<SyntaxPattern>,
    handlers: IndexMap<String, NodeHandler>,
    before_parse: Option<SourceHook>,
    after_parse: Option<ProgramHook>,
}

impl Plugin {
    /// Start building a plugin
    pub fn builder(
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> PluginBuilder {
        PluginBuilder {
            name: name.into(),
            version: version.into(),
            conflicts: Vec::new(),
            syntax: Vec::new(),
            handlers: IndexMap::new(),
            before_parse: None,
            after_parse: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Whether this plugin declares a conflict with `other`
    pub fn conflicts_with(
        &self,
        other: &str,
    ) -> bool {
        self.meta.conflicts.iter().any(|c| c == other)
    }

    pub fn handler(
        &self,
        node_type: &str,
    ) -> Option<&NodeHandler> {
        self.handlers.get(node_type)
    }

    /// Run the `before_parse` hook, if any
    pub fn rewrite_source(
        &self,
        source: &str,
    ) -> Option<String> {
        self.before_parse.as_ref().map(|hook| hook(source))
    }

    /// Explicit `after_parse` hook, or sentinel replacement through the
    /// handler table
    pub fn transform(
        &self,
        program: &mut Program,
    ) -> Result<(), PluginError> {
        let failed = |message: String| PluginError::HookFailed {
            plugin: self.meta.name.clone(),
            message,
        };

        if let Some(hook) = &self.after_parse {
            return hook(program).map_err(&failed);
        }
        if self.handlers.is_empty() {
            return Ok(());
        }

        visit_bodies_mut(&mut program.body, &mut |body: &mut Vec<Node>| {
            for node in body.iter_mut() {
                let NodeKind::PluginNode { node_type, element } = &node.kind else {
                    continue;
                };
                let Some(handler) = self.handlers.get(node_type) else {
                    continue;
                };
                let replacement = handler(element, node.span).map_err(&failed)?;
                *node = replacement;
            }
            Ok(())
        })
    }
}

impl fmt::Debug for Plugin {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("meta", &self.meta)
            .field("syntax", &self.syntax)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("before_parse", &self.before_parse.is_some())
            .field("after_parse", &self.after_parse.is_some())
            .finish()
    }
}

/// 插件构建器
pub struct PluginBuilder {
    name: String,
    version: String,
    conflicts: Vec<String>,
    /// Pattern, node type, priority, interpolation
    syntax: Vec<(String, String, i32, bool)>,
    handlers: IndexMap<String, NodeHandler>,
    before_parse: Option<SourceHook>,
    after_parse: Option<ProgramHook>,
}

impl PluginBuilder {
    pub fn conflicts(
        mut self,
        other: impl Into<String>,
    ) -> Self {
        self.conflicts.push(other.into());
        self
    }

    /// Add a syntax pattern; the regex is compiled by [`build`](Self::build)
    pub fn syntax(
        mut self,
        pattern: impl Into<String>,
        ast_node: impl Into<String>,
        priority: i32,
    ) -> Self {
        self.syntax.push((pattern.into(), ast_node.into(), priority, false));
        self
    }

    /// Like [`syntax`](Self::syntax), for template dialects where
    /// `{{ path }}` interpolates state
    pub fn template_syntax(
        mut self,
        pattern: impl Into<String>,
        ast_node: impl Into<String>,
        priority: i32,
    ) -> Self {
        self.syntax.push((pattern.into(), ast_node.into(), priority, true));
        self
    }

    pub fn handler<F>(
        mut self,
        node_type: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(&MarkupElement, Span) -> Result<Node, String> + Send + Sync + 'static,
    {
        self.handlers.insert(node_type.into(), Arc::new(handler));
        self
    }

    pub fn before_parse<F>(
        mut self,
        hook: F,
    ) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.before_parse = Some(Arc::new(hook));
        self
    }

    pub fn after_parse<F>(
        mut self,
        hook: F,
    ) -> Self
    where
        F: Fn(&mut Program) -> Result<(), String> + Send + Sync + 'static,
    {
        self.after_parse = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<Plugin, PluginError> {
        let invalid = |reason: String| PluginError::InvalidMeta {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if self.version.trim().is_empty() {
            return Err(invalid("version must not be empty".to_string()));
        }

        let syntax = self
            .syntax
            .iter()
            .map(|(pattern, ast_node, priority, interpolation)| {
                SyntaxPattern::new(pattern, ast_node.clone(), *priority)
                    .map(|p| if *interpolation { p.with_interpolation() } else { p })
                    .map_err(|e| invalid(format!("bad syntax pattern /{}/: {}", pattern, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Plugin {
            meta: PluginMeta {
                name: self.name,
                version: self.version,
                conflicts: self.conflicts,
            },
            syntax,
            handlers: self.handlers,
            before_parse: self.before_parse,
            after_parse: self.after_parse,
        })
    }
}

/// Resolved, conflict-free plugins in registration order
#[derive(Debug, Clone, Default)]
pub struct PluginSet {
    plugins: Vec<Arc<Plugin>>,
    patterns: Vec<SyntaxPattern>,
}

impl PluginSet {
    pub(crate) fn new(plugins: Vec<Arc<Plugin>>) -> Self {
        let mut patterns: Vec<SyntaxPattern> = plugins
            .iter()
            .flat_map(|p| p.syntax.iter().cloned())
            .collect();
        // stable: equal priorities keep registration order
        patterns.sort_by_key(|p| std::cmp::Reverse(p.priority));
        Self { plugins, patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// All syntax patterns, highest priority first
    pub fn patterns(&self) -> &[SyntaxPattern] {
        &self.patterns
    }

    /// Run every `before_parse` hook in order
    pub fn before_parse(
        &self,
        source: &str,
    ) -> String {
        let mut current = source.to_string();
        for plugin in &self.plugins {
            if let Some(rewritten) = plugin.rewrite_source(&current) {
                current = rewritten;
            }
        }
        current
    }

    /// Run every `after_parse` step in order
    pub fn after_parse(
        &self,
        program: &mut Program,
    ) -> Result<(), PluginError> {
        for plugin in &self.plugins {
            tracing::debug!("Running after_parse for plugin '{}'", plugin.name());
            plugin.transform(program)?;
        }
        Ok(())
    }
}
