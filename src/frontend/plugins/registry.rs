//! 插件注册表
//!
//! 管理所有已注册的插件，按名称查询，并把一组插件名解析为
//! 无冲突的 [`PluginSet`]。

use std::sync::Arc;

use indexmap::IndexMap;

use super::{control_flow, jsx, vue, Plugin, PluginError, PluginSet};

/// 插件注册表
///
/// Registration order is preserved and is the order hooks run in.
#[derive(Debug, Default, Clone)]
pub struct PluginRegistry {
    /// 插件映射（name -> Plugin）
    plugins: IndexMap<String, Arc<Plugin>>,
}

impl PluginRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            plugins: IndexMap::new(),
        }
    }

    /// 创建包含内置方言的注册表
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// 注册一个插件；重名返回 `AlreadyRegistered`
    pub fn register(
        &mut self,
        plugin: Plugin,
    ) -> Result<(), PluginError> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(PluginError::AlreadyRegistered { name });
        }
        tracing::debug!("Registered plugin '{}' v{}", name, plugin.meta.version);
        self.plugins.insert(name, Arc::new(plugin));
        Ok(())
    }

    /// 获取插件
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Arc<Plugin>> {
        self.plugins.get(name)
    }

    /// 检查插件是否已注册
    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.plugins.contains_key(name)
    }

    /// 所有插件名（注册顺序）
    pub fn names(&self) -> Vec<&str> {
        self.plugins.keys().map(|s| s.as_str()).collect()
    }

    /// Resolve `names` into a plugin set.
    ///
    /// Duplicates collapse; unknown names fail with `NotFound`; two selected
    /// plugins that list each other (either direction) fail with `Conflict`.
    /// The set keeps registration order, not request order.
    pub fn resolve<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<PluginSet, PluginError> {
        for name in names {
            if !self.plugins.contains_key(name.as_ref()) {
                return Err(PluginError::NotFound {
                    name: name.as_ref().to_string(),
                });
            }
        }

        let selected: Vec<Arc<Plugin>> = self
            .plugins
            .iter()
            .filter(|(name, _)| names.iter().any(|n| n.as_ref() == name.as_str()))
            .map(|(_, plugin)| Arc::clone(plugin))
            .collect();

        for (i, plugin) in selected.iter().enumerate() {
            for other in &selected[i + 1..] {
                if plugin.conflicts_with(other.name()) || other.conflicts_with(plugin.name()) {
                    return Err(PluginError::Conflict {
                        plugin: plugin.name().to_string(),
                        other: other.name().to_string(),
                    });
                }
            }
        }

        Ok(PluginSet::new(selected))
    }

    fn register_builtins(&mut self) {
        for plugin in [jsx::plugin(), vue::plugin(), control_flow::plugin()] {
            if let Err(e) = plugin.and_then(|p| self.register(p)) {
                tracing::warn!("Skipping builtin plugin: {}", e);
            }
        }
    }
}
