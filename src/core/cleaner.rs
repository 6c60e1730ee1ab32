/// Text cleaner — turns raw prose into a one-sentence-per-line corpus.
///
/// The output is what `CorpusIndex` expects: one sentence per line, single
/// spaces between tokens, brackets and double quotes removed.

use log::{info, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

use crate::schema::settings::{CleanConfig, SplitMode};

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path:?} is {size} bytes, over the {max} byte limit")]
    TooLarge { path: PathBuf, size: u64, max: u64 },
    #[error("path has no file name: {0:?}")]
    NoFileName(PathBuf),
}

/// Placeholder that keeps `...` runs from being read as sentence ends.
const ELLIPSIS_TOKEN: &str = "\u{27EA}ELLIPSIS\u{27EB}";

struct Patterns {
    paren: Regex,
    square: Regex,
    curly: Regex,
    reference: Regex,
    double_quotes: Regex,
    single_quotes: Regex,
    newlines: Regex,
    blanks: Regex,
    ellipsis: Regex,
    simple_break: Regex,
    smart_break: Regex,
    trailing_break: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).unwrap_or_else(|e| panic!("bad pattern {}: {}", p, e));
        Patterns {
            paren: re(r"(?s) \([^()]*\)"),
            square: re(r"(?s)\[[^\[\]]*\]"),
            curly: re(r"(?s)\{[^{}]*\}"),
            reference: re(r":.\d+."),
            double_quotes: re("[\"\u{201C}\u{201D}\u{AB}\u{BB}\u{201E}\u{201F}\u{2039}\u{203A}]"),
            single_quotes: re("['\u{2018}\u{2019}`]"),
            newlines: re(r"\n+"),
            blanks: re(r"[ \t]+"),
            ellipsis: re(r"\.{3,}"),
            simple_break: re(r"([.!?])\s+"),
            smart_break: re(r"([.!?])\s+([A-Z0-9])"),
            trailing_break: re(r"([.!?])\s*$"),
        }
    })
}

/// Run the full cleaning pipeline over raw text.
pub fn clean_text(raw: &str, config: &CleanConfig) -> String {
    let text = remove_partial_lines(raw);
    let text = remove_bracket_contents(&text);
    let text = remove_reference_issues(&text);
    let text = remove_quotes(&text, config.remove_single_quotes);
    let text = normalize_whitespace(&text);
    split_sentences(&text, config.mode)
}

/// Keep only lines that contain a period and are not a lone period.
pub fn remove_partial_lines(text: &str) -> String {
    let mut kept = String::new();
    for line in text.split('\n') {
        if line.contains('.') && line.trim() != "." {
            kept.push_str(line);
            kept.push('\n');
        }
    }
    kept
}

/// Strip ` (...)`, `[...]`, and `{...}` spans, innermost first, until none
/// remain.
pub fn remove_bracket_contents(text: &str) -> String {
    let p = patterns();
    let mut text = text.to_string();
    for re in [&p.paren, &p.square, &p.curly] {
        loop {
            let next = re.replace_all(&text, "").into_owned();
            if next == text {
                break;
            }
            text = next;
        }
    }
    text
}

/// Strip footnote-style artifacts such as `:p12,`.
pub fn remove_reference_issues(text: &str) -> String {
    patterns().reference.replace_all(text, "").into_owned()
}

pub fn remove_quotes(text: &str, remove_single: bool) -> String {
    let p = patterns();
    let text = p.double_quotes.replace_all(text, "");
    if remove_single {
        p.single_quotes.replace_all(&text, "").into_owned()
    } else {
        text.into_owned()
    }
}

/// Fold all line breaks and runs of blanks into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    let p = patterns();
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = p.newlines.replace_all(&text, " ");
    let text = p.blanks.replace_all(&text, " ");
    text.trim().to_string()
}

/// Break normalized text into one sentence per line.
pub fn split_sentences(text: &str, mode: SplitMode) -> String {
    let p = patterns();
    let text = p.ellipsis.replace_all(text, ELLIPSIS_TOKEN);
    let text = match mode {
        SplitMode::Simple => p.simple_break.replace_all(&text, "$1\n").into_owned(),
        SplitMode::Smart => {
            let text = p.smart_break.replace_all(&text, "$1\n$2");
            p.trailing_break.replace_all(&text, "$1\n").into_owned()
        }
    };
    let text = text.replace(ELLIPSIS_TOKEN, "...");

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Where the cleaned version of `path` is written.
pub fn cleaned_path(path: &Path, tag: &str) -> Result<PathBuf, CleanError> {
    let stem = path
        .file_stem()
        .ok_or_else(|| CleanError::NoFileName(path.to_path_buf()))?
        .to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, tag, ext.to_string_lossy()),
        None => format!("{}{}", stem, tag),
    };
    Ok(path.with_file_name(name))
}

/// Clean one file according to `config`, returning the path written.
///
/// Writes `<stem><tag>.<ext>` next to the input, or overwrites the input in
/// place (after an optional timestamped backup).
pub fn clean_file(path: &Path, tag: &str, config: &CleanConfig) -> Result<PathBuf, CleanError> {
    let size = std::fs::metadata(path)?.len();
    if size > config.max_size {
        warn!("skipping {} (too large: {} bytes)", path.display(), size);
        return Err(CleanError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: config.max_size,
        });
    }

    let bytes = std::fs::read(path)?;
    let raw = String::from_utf8_lossy(&bytes);
    let cleaned = clean_text(&raw, config);

    let out = if config.in_place {
        if config.backup {
            let name = path
                .file_name()
                .ok_or_else(|| CleanError::NoFileName(path.to_path_buf()))?
                .to_string_lossy();
            let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
            let backup = path.with_file_name(format!("{}.bak-{}", name, stamp));
            std::fs::write(&backup, &bytes)?;
            info!("backed up {} to {}", path.display(), backup.display());
        }
        path.to_path_buf()
    } else {
        cleaned_path(path, tag)?
    };

    std::fs::write(&out, &cleaned)?;
    info!(
        "cleaned {} -> {} ({} sentences)",
        path.display(),
        out.display(),
        cleaned.lines().count()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_lines_dropped() {
        let text = "Chapter One\nIt was late. The rain fell.\n.\n  .  \nNo period here\nEnd.";
        assert_eq!(
            remove_partial_lines(text),
            "It was late. The rain fell.\nEnd.\n"
        );
    }

    #[test]
    fn nested_brackets_removed() {
        let text = "He left (quietly (very quietly)) at dawn [note [1]] {x {y}}.";
        assert_eq!(remove_bracket_contents(text), "He left at dawn  .");
    }

    #[test]
    fn paren_without_leading_space_is_kept() {
        assert_eq!(remove_bracket_contents("f(x) is (so) fine"), "f(x) is fine");
    }

    #[test]
    fn brackets_span_lines() {
        assert_eq!(remove_bracket_contents("a [b\nc] d"), "a  d");
    }

    #[test]
    fn reference_artifacts_removed() {
        assert_eq!(remove_reference_issues("as noted:p12, later"), "as noted later");
    }

    #[test]
    fn quotes_removed() {
        let text = "\u{201C}Hi,\u{201D} she said. \"Don't.\" \u{AB}Non\u{BB}";
        assert_eq!(remove_quotes(text, false), "Hi, she said. Don't. Non");
        assert_eq!(remove_quotes("Don't `x` \u{2018}y\u{2019}", true), "Dont x y");
    }

    #[test]
    fn whitespace_normalized() {
        assert_eq!(
            normalize_whitespace("  One\r\ntwo\r\rthree\t\t four  \n\n"),
            "One two three four"
        );
    }

    #[test]
    fn smart_split_needs_capital_or_digit() {
        let text = "It was late. The rain fell. e.g. this stays. 3 more! Why? ok";
        assert_eq!(
            split_sentences(text, SplitMode::Smart),
            "It was late.\nThe rain fell. e.g. this stays.\n3 more!\nWhy? ok\n"
        );
    }

    #[test]
    fn simple_split_breaks_everywhere() {
        let text = "It was late. the rain fell! ok? yes";
        assert_eq!(
            split_sentences(text, SplitMode::Simple),
            "It was late.\nthe rain fell!\nok?\nyes\n"
        );
    }

    #[test]
    fn ellipsis_is_not_a_break() {
        let text = "Wait... Then it came. Done.";
        assert_eq!(
            split_sentences(text, SplitMode::Smart),
            "Wait... Then it came.\nDone.\n"
        );
        assert_eq!(
            split_sentences("Wait.... Then", SplitMode::Simple),
            "Wait... Then\n"
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(split_sentences("", SplitMode::Smart), "");
        assert_eq!(clean_text("no periods at all", &CleanConfig::default()), "");
    }

    #[test]
    fn full_pipeline() {
        let raw = "Title\n\nThe \"old\" house (built 1901) stood.\nIt was [citation needed] empty. Nobody\nlived there.\n";
        assert_eq!(
            clean_text(raw, &CleanConfig::default()),
            "The old house stood.\nIt was empty.\nNobody lived there.\n"
        );
    }

    #[test]
    fn cleaned_path_inserts_tag() {
        assert_eq!(
            cleaned_path(Path::new("books/moby.txt"), ".cleaned").unwrap(),
            PathBuf::from("books/moby.cleaned.txt")
        );
        assert_eq!(
            cleaned_path(Path::new("notes"), ".cleaned").unwrap(),
            PathBuf::from("notes.cleaned")
        );
    }

    #[test]
    fn clean_file_writes_tagged_copy() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("story.txt");
        std::fs::write(&input, "It began. Then it ended.").unwrap();

        let out = clean_file(&input, ".cleaned", &CleanConfig::default()).unwrap();
        assert_eq!(out, dir.path().join("story.cleaned.txt"));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "It began.\nThen it ended.\n");
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "It began. Then it ended.");
    }

    #[test]
    fn clean_file_in_place_with_backup() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("story.txt");
        std::fs::write(&input, "It began. Then it ended.").unwrap();

        let config = CleanConfig {
            in_place: true,
            ..CleanConfig::default()
        };
        let out = clean_file(&input, ".cleaned", &config).unwrap();
        assert_eq!(out, input);
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "It began.\nThen it ended.\n");

        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().starts_with("story.txt.bak-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            std::fs::read_to_string(backups[0].path()).unwrap(),
            "It began. Then it ended."
        );
    }

    #[test]
    fn backup_keeps_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("latin1.txt");
        let original = b"Caf\xe9 au lait. Tr\xe8s bon.".to_vec();
        std::fs::write(&input, &original).unwrap();

        let config = CleanConfig {
            in_place: true,
            ..CleanConfig::default()
        };
        clean_file(&input, ".cleaned", &config).unwrap();

        let backup = std::fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .find(|e| e.file_name().to_string_lossy().starts_with("latin1.txt.bak-"))
            .unwrap();
        assert_eq!(std::fs::read(backup.path()).unwrap(), original);
    }

    #[test]
    fn clean_file_skips_large_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("big.txt");
        std::fs::write(&input, "Some text. More text.").unwrap();

        let config = CleanConfig {
            max_size: 4,
            ..CleanConfig::default()
        };
        let err = clean_file(&input, ".cleaned", &config).unwrap_err();
        assert!(matches!(err, CleanError::TooLarge { size: 21, max: 4, .. }));
        assert!(!dir.path().join("big.cleaned.txt").exists());
    }
}
