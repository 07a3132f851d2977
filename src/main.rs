//! CLI entry point for `workflow-gate`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use workflow_gate::discover;
use workflow_gate::{PolicyConfig, PolicyEngine};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "workflow-gate",
    version,
    about = "Reject workflow exports that leak secrets or run unreviewed SQL"
)]
struct Cli {
    /// Directory holding exported workflow JSON files
    #[arg(long, default_value = "workflows", value_name = "DIR")]
    workflows_dir: PathBuf,

    /// Extra file or directory scanned for forbidden tokens only (repeatable)
    #[arg(long = "scan", value_name = "PATH")]
    scan: Vec<PathBuf>,

    /// TOML policy file (defaults to the built-in policy)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("[ERROR] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("workflow_gate={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Returns whether validation passed.
fn run(cli: &Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => PolicyConfig::load(path)?,
        None => PolicyConfig::default(),
    };
    let engine = PolicyEngine::from_config(&config).context("invalid policy configuration")?;

    let docs = discover::load_documents(&cli.workflows_dir, &cli.scan)?;
    if docs.is_empty() {
        match cli.format {
            OutputFormat::Text => println!(
                "[OK] No {}/*.json found (skipping)",
                cli.workflows_dir.display()
            ),
            OutputFormat::Json => println!("{}", engine.validate_all(&docs).to_json()?),
        }
        return Ok(true);
    }

    let report = engine.validate_all(&docs);
    match cli.format {
        OutputFormat::Text => {
            if report.passed() {
                print!("{}", report.render_text());
            } else {
                for line in report.failure_lines() {
                    eprintln!("{line}");
                }
            }
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(report.passed())
}
