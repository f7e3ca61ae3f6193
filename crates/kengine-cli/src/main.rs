//! # kengine CLI entry point
//!
//! Parses arguments, resolves configuration, bootstraps services and
//! dispatches to the subcommand handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kengine_cli::analyze::{run_analyze, AnalyzeArgs};
use kengine_cli::asset::{run_asset, AssetCommand};
use kengine_cli::{AppContext, KengineConfig};
use kengine_media::AnalyzerKind;

/// Knowledge Engine asset toolkit.
///
/// Content-addressed storage for uploaded media and pluggable media
/// analysis.
#[derive(Parser, Debug)]
#[command(name = "kengine", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Upload directory (overrides config and KENGINE_UPLOAD_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    upload_dir: Option<PathBuf>,

    /// Media analyzer: current or legacy (overrides config and KENGINE_ANALYZER).
    #[arg(long, global = true)]
    analyzer: Option<AnalyzerKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Asset(AssetCommand),

    /// Analyze a media file and render its embed markup.
    Analyze(AnalyzeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output (`read` emits raw bytes).
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match KengineConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(cli.upload_dir.clone(), cli.analyzer),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "resolved configuration");

    let ctx = AppContext::bootstrap(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Asset(cmd) => run_asset(cmd, &ctx, &mut out),
        Commands::Analyze(args) => run_analyze(args, &ctx, &mut out),
    };
    let result = finish_output(result, &mut out);

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Flush buffered command output, folding a flush failure into the result.
///
/// A failed flush means truncated output, e.g. a closed pipe during `read`.
fn finish_output(result: anyhow::Result<u8>, out: &mut impl Write) -> anyhow::Result<u8> {
    result.and_then(|code| out.flush().map(|()| code).map_err(Into::into))
}
