use crate::core::{trie::TrieNode, types::Candidate};
use crate::learning::{learn_word, tokenize};
use std::cmp::Reverse;
use tracing::debug;

/// Prefix-based word completion learned from training text.
///
/// Training lower-cases every word, but queries walk the fragment exactly as
/// given. Callers wanting case-insensitive lookup lower-case the fragment first.
#[derive(Debug, Default)]
pub struct AutocompleteProvider {
    root: TrieNode,
}

impl AutocompleteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until at least one word has been trained.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Splits `passage` into words and increments the count of each.
    /// Returns how many words were recorded; a passage without word
    /// characters leaves the trie untouched and returns 0.
    pub fn train(&mut self, passage: &str) -> usize {
        let mut recorded = 0;
        for word in tokenize(passage) {
            learn_word(&mut self.root, &word);
            recorded += 1;
        }
        debug!(words = recorded, "trained passage");
        recorded
    }

    /// Returns every trained word starting with `fragment`, highest confidence
    /// first. Order among equal confidences is not meaningful.
    pub fn get_words(&self, fragment: &str) -> Vec<Candidate> {
        let Some(node) = self.root.find(fragment) else {
            debug!(fragment, "no trained word has this prefix");
            return vec![];
        };

        let mut candidates: Vec<Candidate> = node
            .collect_words(fragment)
            .into_iter()
            .map(Candidate::from)
            .collect();
        candidates.sort_by_key(|c| Reverse(c.confidence()));

        debug!(fragment, candidates = candidates.len(), "completed fragment");
        candidates
    }

    /// Same ranking as `get_words`, cut down to the first `limit` candidates.
    pub fn get_top_words(&self, fragment: &str, limit: usize) -> Vec<Candidate> {
        let mut candidates = self.get_words(fragment);
        candidates.truncate(limit);
        candidates
    }
}
