use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use ugo::codegen::CodegenOptions;
use ugo::compiler::{CompilationPipeline, CompilationState};

#[derive(Parser)]
#[command(name = "ugoc")]
#[command(author, version, about = "The uGo code generator driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options shared by every subcommand that runs code generation
#[derive(clap::Args)]
struct InputArgs {
    /// The JSON AST produced by the parser
    input: PathBuf,

    /// Original source file, used to render diagnostics
    #[arg(long)]
    source: Option<PathBuf>,

    /// Package that receives the `main` entry point
    #[arg(long, default_value = "main")]
    entry_package: String,

    /// Target triple written into the IR header
    #[arg(long)]
    target: Option<String>,
}

impl InputArgs {
    fn options(&self) -> CodegenOptions {
        CodegenOptions {
            entry_package: self.entry_package.clone(),
            target_triple: self.target.clone(),
            ..CodegenOptions::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate LLVM IR (.ll)
    Compile {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to the input with a .ll extension)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Build an executable with clang
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Output executable
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Keep the intermediate .ll file next to the input
        #[arg(long)]
        keep_temps: bool,
    },

    /// Build and run a program
    Run {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check that code generation succeeds without writing anything
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the verbose flag
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Compile { input, output } => compile(&input, output),
        Commands::Build {
            input,
            output,
            keep_temps,
        } => build(&input, output, keep_temps),
        Commands::Run { input } => run(&input),
        Commands::Check { input } => check(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Runs the pipeline and returns the IR text
fn generate(input: &InputArgs) -> Result<String> {
    let state = CompilationState::new(input.input.clone(), input.source.clone())?;
    let mut pipeline = CompilationPipeline::new(state, input.options());

    match pipeline.run()? {
        Some(ir) => Ok(ir),
        None => anyhow::bail!(
            "code generation failed with {} error(s)",
            pipeline.state().error_count()
        ),
    }
}

fn compile(input: &InputArgs, output: Option<PathBuf>) -> Result<()> {
    let ir = generate(input)?;

    let output_path = output.unwrap_or_else(|| input.input.with_extension("ll"));
    fs::write(&output_path, ir)
        .with_context(|| format!("Failed to write LLVM IR to {:?}", output_path))?;

    println!("{}: Created LLVM IR file {:?}", "success".green().bold(), output_path);
    Ok(())
}

fn build(input: &InputArgs, output: Option<PathBuf>, keep_temps: bool) -> Result<()> {
    let executable_path = build_executable(input, output, keep_temps)?;
    println!("{}: Created executable {:?}", "success".green().bold(), executable_path);
    Ok(())
}

/// Generates IR and links it into an executable with clang
fn build_executable(
    input: &InputArgs,
    output: Option<PathBuf>,
    keep_temps: bool,
) -> Result<PathBuf> {
    let ir = generate(input)?;

    let executable_path = output.unwrap_or_else(|| input.input.with_extension(""));

    // Create temporary directory for intermediate files
    let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
    let ir_path = if keep_temps {
        input.input.with_extension("ll")
    } else {
        temp_dir.path().join("program.ll")
    };

    log::debug!("writing LLVM IR to {:?}", ir_path);
    fs::write(&ir_path, ir).with_context(|| format!("Failed to write {:?}", ir_path))?;

    link(&ir_path, &executable_path)?;
    Ok(executable_path)
}

/// Compiles an IR file into an executable with clang
fn link(ir_path: &Path, executable_path: &Path) -> Result<()> {
    log::debug!("running clang on {:?}", ir_path);
    let status = Command::new("clang")
        .arg("-Wno-override-module")
        .arg("-o")
        .arg(executable_path)
        .arg(ir_path)
        .status()
        .context("Failed to run clang")?;

    if !status.success() {
        anyhow::bail!("clang failed with status: {}", status);
    }
    Ok(())
}

fn run(input: &InputArgs) -> Result<()> {
    log::info!("Running {:?}", input.input);

    let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
    let temp_exe = temp_dir.path().join("ugo_run");
    build_executable(input, Some(temp_exe.clone()), false)?;

    log::debug!("Executing {:?}", temp_exe);
    let status = Command::new(&temp_exe)
        .status()
        .context("Failed to execute compiled program")?;
    drop(temp_dir);

    if !status.success() {
        match status.code() {
            Some(code) => std::process::exit(code),
            None => anyhow::bail!("Program terminated by signal"),
        }
    }

    Ok(())
}

fn check(input: &InputArgs) -> Result<()> {
    log::info!("Checking {:?}", input.input);
    generate(input)?;
    println!("{}: No errors found", "success".green().bold());
    Ok(())
}
