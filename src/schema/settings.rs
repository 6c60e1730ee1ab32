/// Settings — explicit configuration for discovery, cleaning, and walking.
///
/// Every tool builds one `Settings` value up front (defaults, optionally
/// overlaid by a RON file and then by command-line flags) and passes the
/// relevant section down. Nothing reads configuration from global state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Top-level configuration bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub discovery: DiscoveryConfig,
    pub clean: CleanConfig,
    pub walk: WalkConfig,
}

impl Settings {
    /// Load settings from a RON file. Missing sections and fields fall back
    /// to their defaults.
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Settings, SettingsError> {
        Ok(ron::from_str(input)?)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Settings, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Settings::default()),
        }
    }
}

/// Where corpus files are looked for and how cleaned files are recognised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub root: PathBuf,
    /// File extension to match, without the dot.
    pub extension: String,
    pub recursive: bool,
    /// Marker inserted into the stem of cleaned files (`book.cleaned.txt`).
    pub cleaned_tag: String,
    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: "txt".to_string(),
            recursive: true,
            cleaned_tag: ".cleaned".to_string(),
            exclude_dirs: [".git", "venv", "__pycache__", ".venv", "env", "node_modules", "target"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Sentence splitting strategy used by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitMode {
    /// Break after terminal punctuation only when an uppercase letter or
    /// digit follows.
    #[default]
    Smart,
    /// Break after every terminal punctuation mark followed by whitespace.
    Simple,
}

impl std::str::FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smart" => Ok(SplitMode::Smart),
            "simple" => Ok(SplitMode::Simple),
            other => Err(format!("unknown split mode '{}': expected smart or simple", other)),
        }
    }
}

/// Options for turning raw prose into a one-sentence-per-line corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    pub mode: SplitMode,
    /// Also strip apostrophes and backticks.
    pub remove_single_quotes: bool,
    /// Overwrite the source file instead of writing a tagged copy.
    pub in_place: bool,
    /// Keep a timestamped backup when overwriting in place.
    pub backup: bool,
    /// Files larger than this many bytes are skipped.
    pub max_size: u64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            mode: SplitMode::Smart,
            remove_single_quotes: false,
            in_place: false,
            backup: true,
            max_size: 10_000_000,
        }
    }
}

/// Walk limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Give up once the output holds this many words. `None` walks until an
    /// ending word or a dead end, however long that takes.
    pub max_words: Option<usize>,
}
