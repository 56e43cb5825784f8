//! Integration tests for the `asxr` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn asxr(
    dir: &Path,
    args: &[&str],
) -> Output {
    Command::new(env!("CARGO_BIN_EXE_asxr"))
        .current_dir(dir)
        .args(args)
        .arg("--color")
        .arg("never")
        .output()
        .unwrap()
}

/// Helper function to create a test file
fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_compile_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "page.asxr", "@atomic[hero] { title: \"Hi\" }");

    let output = asxr(temp_dir.path(), &["compile", "page.asxr", "--no-header"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("import { createBlock"));
    assert!(stdout.contains("blocks['hero'] = createBlock('atomic', 'hero', props0, children0);"));
}

#[test]
fn test_compile_flags_override_config() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(
        &temp_dir,
        "asxr.toml",
        "[compile]\nformat = \"esm\"\nruntime = \"from-config\"\n",
    );
    create_test_file(&temp_dir, "page.asxr", "@atomic { }");

    let output = asxr(
        temp_dir.path(),
        &["compile", "page.asxr", "--format", "cjs", "-o", "page.js"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let code = fs::read_to_string(temp_dir.path().join("page.js")).unwrap();
    assert!(code.contains("require('from-config')"));
    assert!(code.contains("module.exports = function mount"));
}

#[test]
fn test_compile_reports_errors() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "dup.asxr", "@atomic[x] { }\n@atomic[x] { }");

    let output = asxr(temp_dir.path(), &["compile", "dup.asxr"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DUPLICATE_ID"), "{}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_check_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("pages")).unwrap();
    create_test_file(&temp_dir, "pages/a.asxr", "@atomic[a] { }");
    create_test_file(&temp_dir, "pages/b.asxr", "@atomic[b] { link: #b }");

    let output = asxr(temp_dir.path(), &["check", "pages"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All checks passed"));
}

#[test]
fn test_check_json_output() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "bad.asxr", "@atomic[a] { link: #missing }");

    let output = asxr(temp_dir.path(), &["check", "bad.asxr", "--json"]);
    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let diagnostics = json.as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["code"], "UNDEFINED_REFERENCE");
}

#[test]
fn test_tokens_and_ast() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "t.asxr", "@atomic[a] { n: 1 }");

    let output = asxr(temp_dir.path(), &["tokens", "t.asxr"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NUMBER"));
    assert!(stdout.trim_end().ends_with("\"\""));

    let output = asxr(temp_dir.path(), &["ast", "t.asxr"]);
    assert!(output.status.success());
    let ast: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(ast["body"].is_array());
    assert_eq!(ast["body"].as_array().unwrap().len(), 1);
}
