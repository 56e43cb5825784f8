//! ASXR - CLI

use anyhow::{Context, Result};
use asxr::frontend::core::lexer::tokenize;
use asxr::frontend::core::parser::parse_with_errors;
use asxr::util::config::{load_config, load_project_config, ProjectConfig};
use asxr::util::diagnostic::check::{check_paths_with_options, CheckOptions};
use asxr::util::diagnostic::{EmitterConfig, TextEmitter};
use asxr::util::logger::{self, LogLevel};
use asxr::util::span::SourceFile;
use asxr::{CompileError, CompileOptions, Compiler, OutputFormat, NAME, VERSION};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Compiler for the ASXR block DSL
#[derive(Parser, Debug)]
#[command(name = "asxr")]
#[command(author = "ASXR Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// More logging; repeat for debug output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file to use instead of the nearest asxr.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Color output: auto, always or never
    #[arg(long, global = true, default_value = "auto")]
    color: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file to a JavaScript module
    Compile {
        /// Source file to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Module format: esm or cjs
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Runtime module path
        #[arg(long, value_name = "PATH")]
        runtime: Option<String>,

        /// Enable a plugin (repeatable)
        #[arg(long = "plugin", value_name = "NAME")]
        plugins: Vec<String>,

        /// Omit the generated-by header
        #[arg(long)]
        no_header: bool,
    },

    /// Check source files or directories for errors
    Check {
        /// Files or directories to check
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output diagnostics as JSON
        #[arg(long)]
        json: bool,

        /// Warn about block ids nothing references
        #[arg(long)]
        warn_unused: bool,

        /// Enable a plugin (repeatable)
        #[arg(long = "plugin", value_name = "NAME")]
        plugins: Vec<String>,
    },

    /// Print the token stream of a file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the AST of a file as JSON
    Ast {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {:#}", "error".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let cwd = std::env::current_dir().context("Cannot read working directory")?;
            load_project_config(&cwd)?
        }
    };
    logger::init_with_level(effective_level(&config, args.verbose));

    match args.command {
        Commands::Compile {
            file,
            output,
            format,
            runtime,
            plugins,
            no_header,
        } => {
            let mut options = config.compile_options()?;
            if let Some(format) = format {
                options.generate.format = format;
            }
            if let Some(runtime) = runtime {
                options.generate.runtime_path = runtime;
            }
            if no_header {
                options.generate.header = false;
            }
            options.plugins.extend(plugins);
            compile(&file, output.as_deref(), options, &args.color)
        }
        Commands::Check {
            paths,
            json,
            warn_unused,
            plugins,
        } => {
            let mut options = config.compile_options()?;
            options.validate.warn_unused |= warn_unused;
            options.plugins.extend(plugins);
            let compiler = Compiler::with_options(options);
            let summary = check_paths_with_options(
                &compiler,
                &paths,
                CheckOptions {
                    json,
                    color: &args.color,
                },
            )?;
            Ok(if summary.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Tokens { file } => {
            let source = read_source(&file)?;
            for token in tokenize(&source) {
                println!(
                    "{:>4}:{:<3} {:<16} {:?}",
                    token.span.start.line,
                    token.span.start.column,
                    token.kind.name(),
                    token.value
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Ast { file } => {
            let source = read_source(&file)?;
            let (program, errors) = parse_with_errors(&source);
            for err in &errors {
                eprintln!("{}: {} at {}", "parse error".red(), err.message, err.span().start);
            }
            let json = serde_json::to_string_pretty(&program).context("Cannot serialize AST")?;
            println!("{}", json);
            Ok(if errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// `[log] level`, made more verbose by each `-v`
fn effective_level(
    config: &ProjectConfig,
    verbose: u8,
) -> LogLevel {
    config.log.level.raised_by(verbose)
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read file: {}", file.display()))
}

fn compile(
    file: &Path,
    output: Option<&Path>,
    options: CompileOptions,
    color: &str,
) -> Result<ExitCode> {
    let source = read_source(file)?;
    let name = file.display().to_string();
    let compiler = Compiler::with_options(options);

    let emitter = TextEmitter::with_config(EmitterConfig {
        use_colors: use_colors(color),
        ..Default::default()
    });
    let source_file = SourceFile::new(name.clone(), source.clone());

    match compiler.compile(&name, &source) {
        Ok(result) => {
            for diagnostic in &result.diagnostics {
                eprintln!("{}", emitter.render_with_source(diagnostic, Some(&source_file)));
            }
            match output {
                Some(path) => std::fs::write(path, &result.code)
                    .with_context(|| format!("Failed to write output: {}", path.display()))?,
                None => print!("{}", result.code),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ CompileError::Failed { .. }) => {
            for diagnostic in err.diagnostics() {
                eprintln!("{}", emitter.render_with_source(&diagnostic, Some(&source_file)));
            }
            eprintln!("{}: {}", "error".red().bold(), err);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn use_colors(color: &str) -> bool {
    match color {
        "always" => true,
        "never" => false,
        _ => std::io::stderr().is_terminal(),
    }
}
