/// Corpus index — sentences, tokens, and the token → occurrence lookup.

use log::info;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corpus is empty (no sentences to walk)")]
    Empty,
}

/// Coordinate of one token occurrence: sentence (line) and word within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub sentence: usize,
    pub word: usize,
}

impl Position {
    pub fn new(sentence: usize, word: usize) -> Self {
        Self { sentence, word }
    }
}

/// Exact token text → every position carrying that text, in corpus order.
pub type WordIndex = FxHashMap<String, Vec<Position>>;

/// An immutable, positional mirror of a cleaned corpus file.
///
/// Each line is a sentence; each sentence is its line split on single
/// spaces. Tokens keep their punctuation and case, and empty tokens produced
/// by doubled spaces are kept in place.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    sentences: Vec<Vec<String>>,
    index: WordIndex,
}

impl CorpusIndex {
    /// Read a UTF-8 corpus file and index it.
    pub fn load(path: &Path) -> Result<CorpusIndex, CorpusError> {
        let contents = std::fs::read_to_string(path)?;
        let corpus = Self::from_text(&contents)?;
        info!(
            "indexed {}: {} sentences, {} tokens, {} distinct",
            path.display(),
            corpus.len(),
            corpus.token_count(),
            corpus.distinct_count()
        );
        Ok(corpus)
    }

    /// Index in-memory text, one sentence per line.
    pub fn from_text(text: &str) -> Result<CorpusIndex, CorpusError> {
        let sentences: Vec<Vec<String>> = text
            .lines()
            .map(|line| line.split(' ').map(str::to_owned).collect())
            .collect();

        if sentences.is_empty() {
            return Err(CorpusError::Empty);
        }

        let mut index = WordIndex::default();
        for (s, words) in sentences.iter().enumerate() {
            for (w, word) in words.iter().enumerate() {
                index
                    .entry(word.clone())
                    .or_default()
                    .push(Position::new(s, w));
            }
        }

        Ok(CorpusIndex { sentences, index })
    }

    /// Number of sentences. Never zero.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Always false; construction rejects empty corpora.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total token occurrences across all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    /// Number of distinct token strings.
    pub fn distinct_count(&self) -> usize {
        self.index.len()
    }

    pub fn sentences(&self) -> &[Vec<String>] {
        &self.sentences
    }

    pub fn sentence(&self, sentence: usize) -> Option<&[String]> {
        self.sentences.get(sentence).map(Vec::as_slice)
    }

    pub fn word_index(&self) -> &WordIndex {
        &self.index
    }

    /// Token text at a position.
    pub fn token(&self, pos: Position) -> Option<&str> {
        self.sentences
            .get(pos.sentence)
            .and_then(|words| words.get(pos.word))
            .map(String::as_str)
    }

    /// Every position whose token is exactly `word`. Empty for unknown words.
    pub fn occurrences(&self, word: &str) -> &[Position] {
        self.index.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The position right after `pos` within the same sentence, if any.
    pub fn successor(&self, pos: Position) -> Option<Position> {
        let next = Position::new(pos.sentence, pos.word + 1);
        self.token(next).map(|_| next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_and_spaces() {
        let corpus = CorpusIndex::from_text("The cat sat.\nThe dog ran.\n").unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.sentence(0).unwrap(), ["The", "cat", "sat."]);
        assert_eq!(corpus.sentence(1).unwrap(), ["The", "dog", "ran."]);
        assert_eq!(corpus.token_count(), 6);
        assert_eq!(corpus.distinct_count(), 5);
    }

    #[test]
    fn index_positions_resolve_to_their_key() {
        let text = "The cat sat on the mat.\nA cat ran.\nThe end.\n";
        let corpus = CorpusIndex::from_text(text).unwrap();
        for (word, positions) in corpus.word_index() {
            assert!(!positions.is_empty());
            for pos in positions {
                assert_eq!(corpus.token(*pos), Some(word.as_str()));
            }
        }
    }

    #[test]
    fn occurrences_in_corpus_order() {
        let corpus = CorpusIndex::from_text("The cat sat.\nThe dog ran.\nthe The").unwrap();
        assert_eq!(
            corpus.occurrences("The"),
            [Position::new(0, 0), Position::new(1, 0), Position::new(2, 1)]
        );
        assert_eq!(corpus.occurrences("the"), [Position::new(2, 0)]);
    }

    #[test]
    fn keys_are_case_and_punctuation_sensitive() {
        let corpus = CorpusIndex::from_text("Run run. run").unwrap();
        assert_eq!(corpus.occurrences("Run").len(), 1);
        assert_eq!(corpus.occurrences("run.").len(), 1);
        assert_eq!(corpus.occurrences("run").len(), 1);
        assert!(corpus.occurrences("RUN").is_empty());
    }

    #[test]
    fn empty_tokens_are_kept_positionally() {
        let corpus = CorpusIndex::from_text("a  b.").unwrap();
        assert_eq!(corpus.sentence(0).unwrap(), ["a", "", "b."]);
        assert_eq!(corpus.occurrences(""), [Position::new(0, 1)]);
    }

    #[test]
    fn blank_line_is_a_sentence_of_one_empty_token() {
        let corpus = CorpusIndex::from_text("One.\n\nTwo.\n").unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.sentence(1).unwrap(), [""]);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let corpus = CorpusIndex::from_text("Hi there.\r\nBye now.\r\n").unwrap();
        assert_eq!(corpus.sentence(0).unwrap(), ["Hi", "there."]);
        assert_eq!(corpus.sentence(1).unwrap(), ["Bye", "now."]);
    }

    #[test]
    fn no_trimming_beyond_the_split() {
        let corpus = CorpusIndex::from_text(" lead trail. ").unwrap();
        assert_eq!(corpus.sentence(0).unwrap(), ["", "lead", "trail.", ""]);
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(CorpusIndex::from_text(""), Err(CorpusError::Empty)));
    }

    #[test]
    fn successor_stays_within_sentence() {
        let corpus = CorpusIndex::from_text("a b\nc").unwrap();
        assert_eq!(corpus.successor(Position::new(0, 0)), Some(Position::new(0, 1)));
        assert_eq!(corpus.successor(Position::new(0, 1)), None);
        assert_eq!(corpus.successor(Position::new(1, 0)), None);
        assert_eq!(corpus.token(Position::new(5, 0)), None);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = CorpusIndex::load(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(matches!(err, CorpusError::Io(_)));
    }
}
