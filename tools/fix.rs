/// Fix — capitalizes lines and adds missing terminal periods.
///
/// Usage: fix <input> [--output <path>]
use anyhow::{Context, Result};
use clap::Parser;
use corpus_walk::core::fixer::fix_file;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fix")]
#[command(about = "Capitalize each line and terminate it with punctuation")]
struct Args {
    /// File to repair
    input: PathBuf,

    /// Where to write the result (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    let output = args.output.unwrap_or_else(|| args.input.clone());
    fix_file(&args.input, &output)
        .with_context(|| format!("failed to fix {}", args.input.display()))?;
    println!("Wrote: {}", output.display());
    Ok(())
}
