//! Check command implementation
//!
//! Provides the `asxr check` command with support for:
//! - Multiple files and directories
//! - JSON output format
//! - Color control

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::frontend::Compiler;
use crate::util::diagnostic::{
    error_count, warning_count, Diagnostic, EmitterConfig, JsonEmitter, TextEmitter,
};
use crate::util::span::SourceFile;

/// ASXR 源文件扩展名
pub const SOURCE_EXTENSION: &str = "asxr";

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions<'a> {
    /// Output in JSON format
    pub json: bool,
    /// Color control: "auto", "always", or "never"
    pub color: &'a str,
}

/// Result of checking a set of paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl CheckSummary {
    pub fn passed(&self) -> bool {
        self.errors == 0
    }
}

/// Check multiple paths (files or directories) with options
pub fn check_paths_with_options(
    compiler: &Compiler,
    paths: &[PathBuf],
    options: CheckOptions<'_>,
) -> Result<CheckSummary> {
    let files = collect_source_files(paths)?;

    if files.is_empty() {
        eprintln!("No .{} source files found in the specified paths", SOURCE_EXTENSION);
        return Ok(CheckSummary::default());
    }

    tracing::debug!("checking {} file(s)", files.len());

    // Files are independent compilations
    let results: Vec<(PathBuf, Result<(SourceFile, Vec<Diagnostic>)>)> = files
        .par_iter()
        .map(|file| (file.clone(), check_single_file(compiler, file)))
        .collect();

    let mut summary = CheckSummary {
        files: files.len(),
        ..Default::default()
    };
    let mut reports: Vec<(SourceFile, Vec<Diagnostic>)> = Vec::new();

    for (file, result) in results {
        match result {
            Ok((source_file, diagnostics)) => {
                summary.errors += error_count(&diagnostics);
                summary.warnings += warning_count(&diagnostics);
                if !diagnostics.is_empty() {
                    reports.push((source_file, diagnostics));
                }
            }
            Err(e) => {
                eprintln!("Error checking {}: {:#}", file.display(), e);
                summary.errors += 1;
            }
        }
    }

    if options.json {
        output_json(&reports);
    } else {
        output_text(&reports, options.color);
        if summary.passed() {
            println!(
                "All checks passed ({} file{}, {} warning{})",
                summary.files,
                if summary.files == 1 { "" } else { "s" },
                summary.warnings,
                if summary.warnings == 1 { "" } else { "s" },
            );
        }
    }

    Ok(summary)
}

/// Check a single file and return diagnostics
pub fn check_single_file(
    compiler: &Compiler,
    file: &Path,
) -> Result<(SourceFile, Vec<Diagnostic>)> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file {}", file.display()))?;

    let source_name = file.display().to_string();
    let analysis = compiler.analyze(&source_name, &source);

    Ok((SourceFile::new(source_name, source), analysis.diagnostics))
}

/// Output diagnostics in JSON format
fn output_json(reports: &[(SourceFile, Vec<Diagnostic>)]) {
    let diagnostics: Vec<_> = reports
        .iter()
        .flat_map(|(file, diags)| {
            diags
                .iter()
                .map(move |d| JsonEmitter::to_lsp_diagnostic(d, Some(&file.name)))
        })
        .collect();

    if let Ok(json) = serde_json::to_string_pretty(&diagnostics) {
        println!("{}", json);
    }
}

/// Output diagnostics in text format
fn output_text(
    reports: &[(SourceFile, Vec<Diagnostic>)],
    color: &str,
) {
    let use_colors = match color {
        "always" => true,
        "never" => false,
        _ => std::io::stderr().is_terminal(),
    };

    let emitter = TextEmitter::with_config(EmitterConfig {
        use_colors,
        ..Default::default()
    });

    for (source_file, diags) in reports {
        for diagnostic in diags {
            eprintln!("{}", emitter.render_with_source(diagnostic, Some(source_file)));
        }
    }
}

/// Collect all .asxr source files from the given paths
pub fn collect_source_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(anyhow::anyhow!("Path does not exist: {}", path.display()));
        }

        if path.is_file() {
            if is_source_file(path) {
                files.push(path.clone());
            } else {
                tracing::warn!("Skipping non-.{} file: {}", SOURCE_EXTENSION, path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
                let entry = entry.with_context(|| {
                    format!("Failed to read directory entry in {}", path.display())
                })?;

                if entry.file_type().is_file() && is_source_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
    }

    Ok(files)
}

fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(SOURCE_EXTENSION)
}
