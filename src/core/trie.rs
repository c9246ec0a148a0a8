// --- File: src/core/trie.rs
use crate::core::types::Confidence;
use std::collections::BTreeMap;
use std::fmt;
use std::mem;

/// A node of the word trie. The path of characters from the root to a node
/// spells a prefix; `count` records how many times that exact prefix was
/// trained as a whole word (0 means it only exists as a prefix).
///
/// Children are kept in a `BTreeMap` so traversal runs in ascending
/// character order and enumeration is deterministic. Nothing here recurses
/// per character, so arbitrarily long words cannot exhaust the stack.
#[derive(Default)]
pub struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    count: Confidence,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> Confidence {
        self.count
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Looks up the child for `ch` without touching the trie.
    pub fn get_child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// Returns the child for `ch`, inserting an empty node first if needed.
    /// Creates at most one node per call.
    pub fn get_or_create_child(&mut self, ch: char) -> &mut TrieNode {
        self.children.entry(ch).or_default()
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Walks `path` one character at a time from this node.
    /// O(k) where k is the number of characters in `path`.
    pub fn find(&self, path: &str) -> Option<&TrieNode> {
        let mut node = self;
        for ch in path.chars() {
            node = node.get_child(ch)?;
        }
        Some(node)
    }

    /// Collects every counted node at or below this one as `(word, count)`,
    /// where `word` is `prefix` followed by the node's path relative to `self`.
    /// Output follows pre-order with ascending child keys.
    pub fn collect_words(&self, prefix: &str) -> Vec<(String, Confidence)> {
        let mut words = Vec::new();
        let mut buf = prefix.to_string();
        // (node, key leading to it, length of `buf` at its parent)
        let mut stack: Vec<(&TrieNode, Option<char>, usize)> = vec![(self, None, buf.len())];

        while let Some((node, key, parent_len)) = stack.pop() {
            buf.truncate(parent_len);
            if let Some(ch) = key {
                buf.push(ch);
            }
            if node.count > 0 {
                words.push((buf.clone(), node.count));
            }
            let len = buf.len();
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|(&ch, child)| (child, Some(ch), len)),
            );
        }
        words
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> = Vec::new();
        pending.extend(mem::take(&mut self.children).into_values());
        while let Some(mut node) = pending.pop() {
            pending.extend(mem::take(&mut node.children).into_values());
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("count", &self.count)
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(root: &mut TrieNode, word: &str) {
        let mut node = root;
        for ch in word.chars() {
            node = node.get_or_create_child(ch);
        }
        node.increment();
    }

    #[test]
    fn get_child_does_not_create() {
        let root = TrieNode::new();
        assert!(root.get_child('a').is_none());
        assert!(root.is_leaf());
    }

    #[test]
    fn get_or_create_child_reuses_existing_node() {
        let mut root = TrieNode::new();
        root.get_or_create_child('a').increment();
        assert_eq!(root.get_or_create_child('a').count(), 1);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn prefixes_exist_without_counts() {
        let mut root = TrieNode::new();
        insert(&mut root, "hello");
        assert_eq!(root.find("hel").map(TrieNode::count), Some(0));
        assert_eq!(root.find("hello").map(TrieNode::count), Some(1));
        assert!(root.find("help").is_none());
    }

    #[test]
    fn collect_words_includes_start_node_and_descendants() {
        let mut root = TrieNode::new();
        for word in ["hell", "hello", "heli", "hell", "world"] {
            insert(&mut root, word);
        }

        let node = root.find("hel").unwrap();
        assert_eq!(
            node.collect_words("hel"),
            vec![
                ("heli".to_string(), 1),
                ("hell".to_string(), 2),
                ("hello".to_string(), 1),
            ]
        );
        assert_eq!(
            root.find("hell").unwrap().collect_words("hell"),
            vec![("hell".to_string(), 2), ("hello".to_string(), 1)]
        );
    }

    #[test]
    fn sibling_paths_do_not_leak_into_each_other() {
        let mut root = TrieNode::new();
        for word in ["ab", "ac", "ébc", "éd"] {
            insert(&mut root, word);
        }
        let words: Vec<String> = root.collect_words("").into_iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["ab", "ac", "ébc", "éd"]);
    }

    #[test]
    fn increment_saturates_at_max() {
        let mut node = TrieNode::new();
        node.count = u64::MAX;
        node.increment();
        assert_eq!(node.count(), u64::MAX);
    }

    #[test]
    fn very_deep_paths_collect_and_drop_without_recursion() {
        let word = "a".repeat(100_000);
        let mut root = TrieNode::new();
        insert(&mut root, &word);
        insert(&mut root, "b");

        let words = root.collect_words("");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], (word, 1));
        assert_eq!(words[1], ("b".to_string(), 1));
        drop(root);
    }

    #[test]
    fn root_is_never_collected_when_untrained() {
        assert!(TrieNode::new().collect_words("").is_empty());
    }
}
