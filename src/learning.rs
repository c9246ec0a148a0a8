// File: src/learning.rs
use crate::core::trie::TrieNode;
use tracing::trace;

/// ASCII letters, digits and underscore make up words; everything else,
/// non-ASCII letters included, separates them.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a passage into lower-cased words.
/// Runs of separators never produce empty words, including at either end.
pub fn tokenize(passage: &str) -> impl Iterator<Item = String> + '_ {
    passage
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Walks (and extends) the trie along `word` and bumps the count of its last node.
/// O(k) complexity where k is the word length.
pub fn learn_word(root: &mut TrieNode, word: &str) {
    let mut node = root;
    for ch in word.chars() {
        node = node.get_or_create_child(ch);
    }
    node.increment();
    trace!(word, count = node.count(), "learned word");
}
