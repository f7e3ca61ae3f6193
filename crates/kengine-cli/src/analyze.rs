//! # Analyze Subcommand
//!
//! Runs the configured media analyzer over a file and prints the analysis,
//! the embed HTML and, when a document is given, the suggested placement.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use kengine_media::{MediaAnalysis, MediaInput, Placement};
use kengine_store::{extension_of, read_file};

use crate::bootstrap::AppContext;

/// Arguments for `kengine analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Media file to analyze.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Surrounding text (caption or nearby prose).
    #[arg(long, default_value = "")]
    pub context: String,

    /// Text document to compute a placement against.
    #[arg(long, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// URL the embed markup should reference. Defaults to the stored path.
    #[arg(long)]
    pub src: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    analysis: MediaAnalysis,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    placement: Option<Placement>,
}

/// Execute the analyze subcommand.
pub fn run_analyze(args: &AnalyzeArgs, ctx: &AppContext, out: &mut dyn Write) -> Result<u8> {
    let data = read_file(&args.file)?;
    let filename = file_name(&args.file);

    let analysis = ctx
        .media
        .analyze_media_comprehensive(&MediaInput::new(&filename, &data), &args.context)?;

    let src = match &args.src {
        Some(src) => src.clone(),
        None => default_src(ctx.store.base_dir(), &analysis, &filename),
    };
    let html = ctx.media.create_enhanced_media_html(&src, &analysis);

    let placement = match &args.document {
        Some(path) => {
            let document = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read document: {}", path.display()))?;
            Some(ctx.media.generate_contextual_placement(&analysis, &document))
        }
        None => None,
    };

    let report = AnalyzeReport {
        analysis,
        html,
        placement,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(0)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `/{upload_dir}/{hash}{ext}` with forward slashes, where the asset would
/// be served from once saved.
fn default_src(upload_dir: &Path, analysis: &MediaAnalysis, filename: &str) -> String {
    let dir = upload_dir.to_string_lossy().replace('\\', "/");
    let dir = dir.trim_matches('/');
    let name = format!("{}{}", analysis.hash, extension_of(filename));
    if dir.is_empty() {
        format!("/{name}")
    } else {
        format!("/{dir}/{name}")
    }
}
