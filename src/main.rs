use anyhow::{Context, Result};
use clap::Parser;
use process_metadata::process_metadata;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Normalize avian influenza sequence metadata into a phylogenetics-ready TSV"
)]
struct Args {
    /// Path to the input metadata spreadsheet (first sheet is used)
    #[arg(long)]
    input: PathBuf,
    /// Path to the output processed metadata TSV
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout carries only the result line; diagnostics go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) normalize ────────────────────────────────────────────────
    let args = Args::parse();
    info!(input = %args.input.display(), "processing metadata");
    let rows = process_metadata(&args.input, &args.output)
        .with_context(|| format!("processing {}", args.input.display()))?;
    info!(rows, "done");

    println!("Output written to: {}", args.output.display());
    Ok(())
}
