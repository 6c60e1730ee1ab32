/// Sentence walker — random walk over a corpus index with positional re-entry.
///
/// Each step looks up the word that followed the current occurrence in its
/// own sentence, then continues from a uniformly chosen occurrence of that
/// word anywhere in the corpus. Common words therefore splice unrelated
/// sentences together while rare words carry their sentence along intact.

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::core::corpus::{CorpusIndex, Position};
use crate::schema::settings::WalkConfig;

/// Characters that may terminate a sentence.
pub const TERMINALS: &[char] = &['.', '!', '?'];

/// Abbreviations that end in a period but never end a sentence.
pub const ABBREVIATIONS: &[&str] = &["e.g.", "i.e.", "p.", "pp.", "Inc.", "etc."];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// The walk reached the last token of a sentence without that token
    /// being an ending word.
    #[error("dead end at '{word}' after: {partial}")]
    DeadEnd { partial: String, word: String },
    /// The configured word limit was reached before an ending word.
    #[error("gave up after {words} words: {partial}")]
    TooLong { partial: String, words: usize },
    #[error("no sentence {0} in corpus")]
    NoSuchSentence(usize),
}

impl WalkError {
    /// The text emitted before the walk failed.
    pub fn partial(&self) -> Option<&str> {
        match self {
            WalkError::DeadEnd { partial, .. } | WalkError::TooLong { partial, .. } => {
                Some(partial)
            }
            WalkError::NoSuchSentence(_) => None,
        }
    }
}

/// A successfully generated sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Emitted tokens, in order.
    pub words: Vec<String>,
    /// The occurrence each token was read from.
    pub path: Vec<Position>,
}

impl Generated {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Number of distinct sentences the walk visited.
    pub fn sentences_visited(&self) -> usize {
        let mut seen: Vec<usize> = self.path.iter().map(|p| p.sentence).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

/// True when `word` may legally end a generated sentence: it ends in a
/// terminal character, is longer than two characters, and is not one of
/// the fixed abbreviations.
pub fn is_ending_word(word: &str) -> bool {
    if !word.contains(TERMINALS) {
        return false;
    }
    if !word.ends_with(TERMINALS) {
        return false;
    }
    if ABBREVIATIONS.contains(&word) {
        return false;
    }
    word.chars().count() > 2
}

/// Generates sentences from a shared, read-only corpus index.
///
/// The walker holds no mutable state; every call is independent, so one
/// walker (or many) can be used for as many generations as needed.
#[derive(Debug, Clone)]
pub struct SentenceWalker<'a> {
    corpus: &'a CorpusIndex,
    config: WalkConfig,
}

impl<'a> SentenceWalker<'a> {
    pub fn new(corpus: &'a CorpusIndex) -> Self {
        Self::with_config(corpus, WalkConfig::default())
    }

    pub fn with_config(corpus: &'a CorpusIndex, config: WalkConfig) -> Self {
        Self { corpus, config }
    }

    pub fn corpus(&self) -> &'a CorpusIndex {
        self.corpus
    }

    /// Generate one sentence starting at the first word of a uniformly
    /// chosen corpus sentence.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Generated, WalkError> {
        let start = rng.gen_range(0..self.corpus.len());
        self.generate_from(start, rng)
    }

    /// Generate one sentence starting at the first word of sentence `start`.
    pub fn generate_from<R: Rng>(
        &self,
        start: usize,
        rng: &mut R,
    ) -> Result<Generated, WalkError> {
        let mut current = Position::new(start, 0);
        let first = self
            .corpus
            .token(current)
            .ok_or(WalkError::NoSuchSentence(start))?;
        debug!("walk starts at sentence {}", start);

        let mut words = vec![first.to_string()];
        let mut path = vec![current];

        loop {
            let word = self.corpus.token(current).unwrap_or_default();
            if is_ending_word(word) {
                return Ok(Generated { words, path });
            }

            if let Some(limit) = self.config.max_words {
                if words.len() >= limit {
                    warn!("walk exceeded {} words without an ending word", limit);
                    return Err(WalkError::TooLong {
                        partial: words.join(" "),
                        words: words.len(),
                    });
                }
            }

            let successor = match self.corpus.successor(current) {
                Some(pos) => pos,
                None => {
                    warn!("dead end at '{}' ({:?})", word, current);
                    return Err(WalkError::DeadEnd {
                        partial: words.join(" "),
                        word: word.to_string(),
                    });
                }
            };

            // The successor came from the corpus, so it has at least one
            // occurrence: its own position.
            let successor_text = self.corpus.token(successor).unwrap_or_default();
            let next = *self
                .corpus
                .occurrences(successor_text)
                .choose(rng)
                .unwrap_or(&successor);
            debug!("'{}' -> {:?}", successor_text, next);

            words.push(successor_text.to_string());
            path.push(next);
            current = next;
        }
    }
}
