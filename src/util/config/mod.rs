//! asxr project configuration
//!
//! Settings are read from an `asxr.toml` found in the working directory or
//! one of its ancestors, and merged with command-line flags.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Project-level (asxr.toml)
//! 3. Default values
//! ```
//!
//! # Example
//!
//! ```toml
//! [compile]
//! format = "esm"
//! runtime = "@asxr/runtime"
//! plugins = ["jsx"]
//! header = true
//!
//! [validate]
//! check_references = true
//! warn_unused = false
//! schemas = ["schemas/card.json"]
//!
//! [log]
//! level = "info"
//! ```

use crate::frontend::validator::{Schema, ValidateOptions};
use crate::frontend::CompileOptions;
use crate::middle::codegen::{GenerateOptions, OutputFormat, DEFAULT_RUNTIME_PATH};
use crate::util::logger::LogLevel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
mod tests;

/// 项目配置文件名
pub const CONFIG_FILE_NAME: &str = "asxr.toml";

/// Project-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub compile: CompileConfig,
    pub validate: ValidateConfig,
    pub log: LogConfig,
    /// Directory the file was loaded from; relative schema paths resolve here
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

/// `[compile]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    pub format: OutputFormat,
    pub runtime: String,
    /// Plugins enabled for every file
    pub plugins: Vec<String>,
    pub header: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Esm,
            runtime: DEFAULT_RUNTIME_PATH.to_string(),
            plugins: Vec::new(),
            header: true,
        }
    }
}

/// `[validate]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    pub check_references: bool,
    pub warn_unused: bool,
    /// JSON files mapping block types to schemas
    pub schemas: Vec<PathBuf>,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            check_references: true,
            warn_unused: false,
            schemas: Vec::new(),
        }
    }
}

/// `[log]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid schema file {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ProjectConfig {
    /// Parse config text; `root` is where relative paths resolve
    pub fn from_toml(
        text: &str,
        root: Option<PathBuf>,
    ) -> Result<Self, toml::de::Error> {
        let mut config: ProjectConfig = toml::from_str(text)?;
        config.root = root;
        Ok(config)
    }

    /// Schema file paths, resolved against the config directory
    pub fn schema_paths(&self) -> Vec<PathBuf> {
        self.validate
            .schemas
            .iter()
            .map(|path| match &self.root {
                Some(root) if path.is_relative() => root.join(path),
                _ => path.clone(),
            })
            .collect()
    }

    /// Load every configured schema file. Later files override earlier
    /// ones for the same block type.
    pub fn load_schemas(&self) -> Result<IndexMap<String, Schema>, ConfigError> {
        let mut schemas = IndexMap::new();
        for path in self.schema_paths() {
            schemas.extend(load_schema_file(&path)?);
        }
        Ok(schemas)
    }

    /// Pipeline options described by this config
    pub fn compile_options(&self) -> Result<CompileOptions, ConfigError> {
        Ok(CompileOptions {
            plugins: self.compile.plugins.clone(),
            validate: ValidateOptions {
                check_references: self.validate.check_references,
                warn_unused: self.validate.warn_unused,
                custom_schemas: self.load_schemas()?,
                custom_laws: Vec::new(),
            },
            generate: GenerateOptions {
                format: self.compile.format,
                runtime_path: self.compile.runtime.clone(),
                header: self.compile.header,
            },
        })
    }
}

/// Walk up from `start` looking for `asxr.toml`
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Load a specific config file
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root = path.parent().map(Path::to_path_buf);
    let config = ProjectConfig::from_toml(&content, root).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Load the nearest `asxr.toml` above `start`, or defaults when none exists
pub fn load_project_config(start: &Path) -> Result<ProjectConfig, ConfigError> {
    match find_project_config(start) {
        Some(path) => load_config(&path),
        None => Ok(ProjectConfig::default()),
    }
}

/// A schema file is a JSON object from block type to schema
pub fn load_schema_file(path: &Path) -> Result<IndexMap<String, Schema>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Schema {
        path: path.to_path_buf(),
        source,
    })
}
