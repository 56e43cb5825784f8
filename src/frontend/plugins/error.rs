//! Plugin errors

use crate::util::diagnostic::codes::ErrorCodeDefinition;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::Span;

/// 插件系统错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PluginError {
    /// 两个选中的插件互相冲突
    #[error("plugin '{plugin}' conflicts with '{other}'")]
    Conflict { plugin: String, other: String },

    /// 插件未注册
    #[error("plugin not found: '{name}'")]
    NotFound { name: String },

    /// 重复注册
    #[error("plugin already registered: '{name}'")]
    AlreadyRegistered { name: String },

    /// 元数据或语法模式无效
    #[error("invalid plugin '{name}': {reason}")]
    InvalidMeta { name: String, reason: String },

    /// 钩子或节点处理器返回错误
    #[error("plugin '{plugin}' failed: {message}")]
    HookFailed { plugin: String, message: String },
}

impl PluginError {
    /// Diagnostic form, for the compile pipeline
    pub fn to_diagnostic(
        &self,
        location: Option<Span>,
    ) -> Diagnostic {
        let builder = match self {
            PluginError::Conflict { plugin, other } => {
                ErrorCodeDefinition::plugin_conflict(plugin, other)
            }
            other => ErrorCodeDefinition::plugin_error(&other.to_string()),
        };
        builder.at_opt(location).build()
    }
}
