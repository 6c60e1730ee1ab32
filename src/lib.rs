//! Corpus Walk — sentence generation by random walks over a text corpus.
//!
//! Builds a positional index of a one-sentence-per-line corpus, then
//! generates new sentences by following each word's original successor and
//! re-entering the corpus at a random occurrence of it. Also ships the
//! cleaning and repair passes that prepare raw prose for indexing.

pub mod core;
pub mod schema;

pub use crate::core::corpus::{CorpusError, CorpusIndex, Position};
pub use crate::core::walker::{is_ending_word, Generated, SentenceWalker, WalkError};
pub use crate::schema::settings::Settings;
