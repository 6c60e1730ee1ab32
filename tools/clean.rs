/// Clean — batch converts raw prose files into one-sentence-per-line corpora.
///
/// Usage: clean [--root <dir>] [--mode smart|simple] [--in-place] [--config <settings.ron>] [FILES...]
///
/// Without explicit files, every raw (untagged) text file under the root is
/// cleaned. Each file is handled independently; a failure is reported and
/// the batch continues.
use anyhow::Result;
use clap::Parser;
use corpus_walk::core::cleaner::{clean_file, CleanError};
use corpus_walk::core::discovery::{discover, Selection};
use corpus_walk::schema::settings::{Settings, SplitMode};
use log::{error, info, warn};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "clean")]
#[command(about = "Clean raw text into one sentence per line")]
struct Args {
    /// Files to clean; defaults to every raw file under the root
    files: Vec<PathBuf>,

    /// Settings file (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to search for raw files
    #[arg(long)]
    root: Option<PathBuf>,

    /// Only search the root directory itself
    #[arg(long)]
    no_recursive: bool,

    /// Sentence splitting mode (smart, simple)
    #[arg(long)]
    mode: Option<SplitMode>,

    /// Also remove apostrophes and backticks
    #[arg(long)]
    remove_single_quotes: bool,

    /// Overwrite the input files instead of writing tagged copies
    #[arg(long)]
    in_place: bool,

    /// Do not keep backups when cleaning in place
    #[arg(long)]
    no_backup: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if let Some(root) = args.root {
        settings.discovery.root = root;
    }
    if args.no_recursive {
        settings.discovery.recursive = false;
    }
    if let Some(mode) = args.mode {
        settings.clean.mode = mode;
    }
    settings.clean.remove_single_quotes |= args.remove_single_quotes;
    settings.clean.in_place |= args.in_place;
    if args.no_backup {
        settings.clean.backup = false;
    }

    let files = if args.files.is_empty() {
        discover(&settings.discovery, Selection::Raw)
    } else {
        args.files
    };
    if files.is_empty() {
        warn!("no raw files found under {}", settings.discovery.root.display());
        return Ok(());
    }

    let mut cleaned = 0;
    let mut skipped = 0;
    let mut failed = 0;
    for file in &files {
        match clean_file(file, &settings.discovery.cleaned_tag, &settings.clean) {
            Ok(out) => {
                println!("Wrote: {}", out.display());
                cleaned += 1;
            }
            Err(CleanError::TooLarge { .. }) => {
                println!("Skipping (too large): {}", file.display());
                skipped += 1;
            }
            Err(e) => {
                error!("error processing {}: {}", file.display(), e);
                failed += 1;
            }
        }
    }

    info!("{} cleaned, {} skipped, {} failed", cleaned, skipped, failed);
    Ok(())
}
