/// Corpus discovery — finding raw and cleaned text files under a root.

use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::schema::settings::DiscoveryConfig;

/// Which side of the cleaning step to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Files not yet cleaned (stem does not contain the cleaned tag).
    Raw,
    /// Cleaned corpus files (stem contains the cleaned tag).
    Cleaned,
}

/// List matching files under `config.root`, sorted by path.
pub fn discover(config: &DiscoveryConfig, selection: Selection) -> Vec<PathBuf> {
    if root_is_excluded(&config.root, &config.exclude_dirs) {
        debug!("root {} is inside an excluded directory", config.root.display());
        return Vec::new();
    }

    let mut walker = WalkDir::new(&config.root).min_depth(1);
    if !config.recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, &config.exclude_dirs))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(|path| path.extension() == Some(OsStr::new(&config.extension)))
        .filter(|path| is_cleaned(path, &config.cleaned_tag) == (selection == Selection::Cleaned))
        .collect();

    files.sort();
    debug!(
        "found {} {:?} files under {}",
        files.len(),
        selection,
        config.root.display()
    );
    files
}

fn is_excluded(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && exclude_dirs
            .iter()
            .any(|dir| entry.file_name() == OsStr::new(dir))
}

fn root_is_excluded(root: &Path, exclude_dirs: &[String]) -> bool {
    root.components().any(|part| {
        exclude_dirs
            .iter()
            .any(|dir| part.as_os_str() == OsStr::new(dir))
    })
}

/// True when the file stem carries the cleaned tag.
pub fn is_cleaned(path: &Path, tag: &str) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().contains(tag))
        .unwrap_or(false)
}

/// Path as shown in menus: the cleaned tag is dropped.
pub fn display_name(path: &Path, tag: &str) -> String {
    let shown = path.display().to_string();
    if tag.is_empty() {
        shown
    } else {
        shown.replace(tag, "")
    }
}
