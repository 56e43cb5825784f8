//! 配置加载测试

use crate::middle::codegen::{OutputFormat, DEFAULT_RUNTIME_PATH};
use crate::util::config::{
    find_project_config, load_config, load_project_config, ConfigError, ProjectConfig,
    CONFIG_FILE_NAME,
};
use crate::util::logger::LogLevel;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let config = ProjectConfig::default();
    assert_eq!(config.compile.format, OutputFormat::Esm);
    assert_eq!(config.compile.runtime, DEFAULT_RUNTIME_PATH);
    assert!(config.compile.header);
    assert!(config.validate.check_references);
    assert!(!config.validate.warn_unused);
    assert_eq!(config.log.level, LogLevel::Info);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let config = ProjectConfig::from_toml(
        r#"
[compile]
format = "cjs"
plugins = ["jsx", "vue"]

[log]
level = "debug"
"#,
        None,
    )
    .unwrap();

    assert_eq!(config.compile.format, OutputFormat::CommonJs);
    assert_eq!(config.compile.plugins, vec!["jsx", "vue"]);
    assert_eq!(config.compile.runtime, DEFAULT_RUNTIME_PATH);
    assert!(config.validate.check_references);
    assert_eq!(config.log.level, LogLevel::Debug);
}

#[test]
fn test_unknown_format_is_an_error() {
    assert!(ProjectConfig::from_toml("[compile]\nformat = \"amd\"\n", None).is_err());
}

#[test]
fn test_find_walks_up() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("src").join("pages");
    fs::create_dir_all(&nested).unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[validate]\nwarn_unused = true\n").unwrap();

    let found = find_project_config(&nested).unwrap();
    assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));

    let config = load_project_config(&nested).unwrap();
    assert!(config.validate.warn_unused);
    assert_eq!(config.root.as_deref(), Some(dir.path()));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_project_config(dir.path()).unwrap();
    assert_eq!(config, ProjectConfig::default());
}

#[test]
fn test_load_config_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "[compile\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}

#[test]
fn test_schemas_resolve_relative_to_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("schemas")).unwrap();
    fs::write(
        dir.path().join("schemas").join("card.json"),
        r#"{ "card": { "required": ["title"], "properties": { "title": { "type": "string" } } } }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[validate]\nschemas = [\"schemas/card.json\"]\n",
    )
    .unwrap();

    let config = load_project_config(dir.path()).unwrap();
    assert_eq!(
        config.schema_paths(),
        vec![dir.path().join("schemas").join("card.json")]
    );

    let options = config.compile_options().unwrap();
    let card = &options.validate.custom_schemas["card"];
    assert_eq!(card.required, vec!["title"]);
    assert!(card.properties.contains_key("title"));
}

#[test]
fn test_missing_schema_file() {
    let config = ProjectConfig::from_toml(
        "[validate]\nschemas = [\"nowhere.json\"]\n",
        Some(PathBuf::from("/definitely/not/here")),
    )
    .unwrap();
    let err = config.compile_options().unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_compile_options_carry_generate_settings() {
    let config = ProjectConfig::from_toml(
        "[compile]\nruntime = \"./runtime.js\"\nheader = false\n",
        None,
    )
    .unwrap();
    let options = config.compile_options().unwrap();
    assert_eq!(options.generate.runtime_path, "./runtime.js");
    assert!(!options.generate.header);
    assert!(options.plugins.is_empty());
}
