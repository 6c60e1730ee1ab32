/// Walk — interactive sentence generator over cleaned corpus files.
///
/// Usage: walk [--root <dir>] [--file <path>] [--seed <n>] [--config <settings.ron>]
///             [--max-words <n>] [--log-level <level>]
///
/// Lists cleaned corpus files, then generates one sentence per Enter.
/// Typing anything else returns to file selection; `exit` quits.
use anyhow::Result;
use clap::Parser;
use corpus_walk::core::corpus::CorpusIndex;
use corpus_walk::core::discovery::{discover, display_name, Selection};
use corpus_walk::core::walker::{SentenceWalker, WalkError};
use corpus_walk::schema::settings::Settings;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "walk")]
#[command(about = "Generate sentences by random walks over a cleaned corpus")]
struct Args {
    /// Settings file (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to search for cleaned files
    #[arg(long)]
    root: Option<PathBuf>,

    /// Use this corpus file directly instead of the selection menu
    #[arg(long)]
    file: Option<PathBuf>,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Stop a walk after this many words
    #[arg(long)]
    max_words: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if let Some(root) = args.root {
        settings.discovery.root = root;
    }
    if args.max_words.is_some() {
        settings.walk.max_words = args.max_words;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if let Some(file) = args.file {
        run_session(&file, &settings, &mut rng, &mut input)?;
        return Ok(());
    }

    while let Some(selected) = select_cleaned_file(&settings, &mut input)? {
        if run_session(&selected, &settings, &mut rng, &mut input)? == Session::Quit {
            break;
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Session {
    Reselect,
    Quit,
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Numbered menu of cleaned files. `None` when there is nothing to pick or
/// the user typed `exit`.
fn select_cleaned_file(settings: &Settings, input: &mut impl BufRead) -> Result<Option<PathBuf>> {
    let tag = &settings.discovery.cleaned_tag;
    let files = discover(&settings.discovery, Selection::Cleaned);
    if files.is_empty() {
        println!("No cleaned files found.");
        return Ok(None);
    }

    println!("Select a cleaned file:");
    for (i, file) in files.iter().enumerate() {
        println!("{}. {}", i + 1, display_name(file, tag));
    }

    loop {
        print!("Enter file number ('exit' to stop): ");
        io::stdout().flush()?;
        let choice = match read_line(input)? {
            Some(choice) => choice,
            None => return Ok(None),
        };
        if choice == "exit" {
            return Ok(None);
        }
        if let Ok(n) = choice.parse::<usize>() {
            if (1..=files.len()).contains(&n) {
                return Ok(Some(files[n - 1].clone()));
            }
        }
        println!("Invalid choice. Please try again.");
    }
}

/// Generate sentences from one file until the user asks for another.
fn run_session(
    path: &Path,
    settings: &Settings,
    rng: &mut StdRng,
    input: &mut impl BufRead,
) -> Result<Session> {
    let corpus = match CorpusIndex::load(path) {
        Ok(corpus) => corpus,
        Err(e) => {
            error!("could not load {}: {}", path.display(), e);
            println!("Cannot use {}: {}", path.display(), e);
            return Ok(Session::Reselect);
        }
    };
    info!("loaded {} sentences from {}", corpus.len(), path.display());
    let walker = SentenceWalker::with_config(&corpus, settings.walk.clone());

    println!();
    println!(
        "Generating from source: {}",
        display_name(path, &settings.discovery.cleaned_tag)
    );
    println!("Press Enter to make another");
    println!("Type anything to change source");
    println!();

    loop {
        print_generation(&walker, rng);
        match read_line(input)? {
            Some(line) if line.is_empty() => continue,
            Some(_) => {
                println!();
                return Ok(Session::Reselect);
            }
            None => return Ok(Session::Quit),
        }
    }
}

fn print_generation(walker: &SentenceWalker<'_>, rng: &mut StdRng) {
    match walker.generate(rng) {
        Ok(generated) => print!("{}", generated.text()),
        Err(WalkError::DeadEnd { partial, word }) => {
            print!("{} [oops! something went wrong with the word '{}'!]", partial, word)
        }
        Err(WalkError::TooLong { partial, words }) => {
            print!("{} [gave up after {} words]", partial, words)
        }
        Err(e) => print!("[{}]", e),
    }
    io::stdout().flush().ok();
}
