//! WASM bindings for corpus-walk — powers the in-browser sentence demo.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use corpus_walk::core::cleaner::clean_text;
use corpus_walk::core::corpus::{CorpusIndex, Position};
use corpus_walk::core::walker::{SentenceWalker, WalkError};
use corpus_walk::schema::settings::{CleanConfig, WalkConfig};

// ---------------------------------------------------------------------------
// Embedded demo corpus — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const FABLES: &str = include_str!("../../corpus_data/fables.cleaned.txt");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(Debug, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum WalkOutput {
    Ok {
        text: String,
        sentences_visited: usize,
        path: Vec<Position>,
    },
    DeadEnd { partial: String, word: String },
    TooLong { partial: String, words: usize },
}

#[derive(serde::Serialize)]
struct CorpusInfo {
    sentences: usize,
    tokens: usize,
    distinct: usize,
}

fn to_output(result: Result<corpus_walk::Generated, WalkError>) -> Result<WalkOutput, JsError> {
    match result {
        Ok(generated) => Ok(WalkOutput::Ok {
            sentences_visited: generated.sentences_visited(),
            text: generated.text(),
            path: generated.path,
        }),
        Err(WalkError::DeadEnd { partial, word }) => Ok(WalkOutput::DeadEnd { partial, word }),
        Err(WalkError::TooLong { partial, words }) => Ok(WalkOutput::TooLong { partial, words }),
        Err(e) => Err(JsError::new(&format!("Walk error: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// WalkDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct WalkDemo {
    corpus: CorpusIndex,
    config: WalkConfig,
    rng: StdRng,
}

#[wasm_bindgen]
impl WalkDemo {
    /// Create a demo over an already cleaned corpus (one sentence per line).
    #[wasm_bindgen(constructor)]
    pub fn new(corpus_text: &str, seed: u64) -> Result<WalkDemo, JsError> {
        let corpus = CorpusIndex::from_text(corpus_text)
            .map_err(|e| JsError::new(&format!("Corpus error: {e}")))?;
        Ok(WalkDemo {
            corpus,
            config: WalkConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Create a demo over the built-in fables corpus.
    pub fn fables(seed: u64) -> Result<WalkDemo, JsError> {
        Self::new(data::FABLES, seed)
    }

    /// Clean raw prose first, then index it.
    pub fn from_raw(raw_text: &str, seed: u64) -> Result<WalkDemo, JsError> {
        Self::new(&clean_text(raw_text, &CleanConfig::default()), seed)
    }

    /// Cap walks at `max_words` words; 0 removes the cap.
    pub fn set_max_words(&mut self, max_words: usize) {
        self.config.max_words = (max_words > 0).then_some(max_words);
    }

    /// Generate one sentence. Returns JSON tagged by `status`:
    /// ```json
    /// { "status": "ok", "text": "The fox ran.", "sentences_visited": 2,
    ///   "path": [{ "sentence": 0, "word": 0 }, { "sentence": 4, "word": 1 }, { "sentence": 4, "word": 2 }] }
    /// { "status": "dead_end", "partial": "The cat sat", "word": "sat" }
    /// ```
    pub fn generate(&mut self) -> Result<String, JsError> {
        let walker = SentenceWalker::with_config(&self.corpus, self.config.clone());
        let output = to_output(walker.generate(&mut self.rng))?;
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Generate `count` sentences. Returns a JSON array of results.
    pub fn generate_many(&mut self, count: usize) -> Result<String, JsError> {
        let walker = SentenceWalker::with_config(&self.corpus, self.config.clone());
        let outputs = (0..count)
            .map(|_| to_output(walker.generate(&mut self.rng)))
            .collect::<Result<Vec<_>, _>>()?;
        serde_json::to_string(&outputs)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON with sentence, token, and distinct-token counts.
    pub fn corpus_info(&self) -> Result<String, JsError> {
        let info = CorpusInfo {
            sentences: self.corpus.len(),
            tokens: self.corpus.token_count(),
            distinct: self.corpus.distinct_count(),
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }
}
