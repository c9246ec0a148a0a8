// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of times an exact word was seen during training.
/// Counts saturate at `u64::MAX` instead of wrapping.
pub type Confidence = u64;

/// A single completion returned by a query.
/// Built fresh for every query, so it never aliases trie internals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    word: String,
    confidence: Confidence,
}

impl Candidate {
    pub fn new(word: impl Into<String>, confidence: Confidence) -> Self {
        Self { word: word.into(), confidence }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}

impl From<(String, Confidence)> for Candidate {
    fn from((word, confidence): (String, Confidence)) -> Self {
        Self { word, confidence }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.word, self.confidence)
    }
}
