//! Prefix trie over name tokens.
//!
//! Each node stands for one lower-cased character of a token and records the
//! ids of every contact with a token passing through it, so a prefix lookup is
//! a walk of `prefix.len()` steps instead of a scan over all contacts.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    contact_ids: HashSet<String>,
}

/// A character trie mapping name prefixes to contact ids.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    node_count: usize,
}

impl PrefixIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every non-empty prefix of `token` (lower-cased) under `contact_id`.
    ///
    /// An empty token creates no path. Inserting the same pair twice leaves the
    /// index unchanged.
    pub fn insert(&mut self, token: &str, contact_id: &str) {
        let mut node = &mut self.root;
        for ch in token.to_lowercase().chars() {
            node = match node.children.entry(ch) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    self.node_count += 1;
                    entry.insert(TrieNode::default())
                }
            };
            if !node.contact_ids.contains(contact_id) {
                node.contact_ids.insert(contact_id.to_string());
            }
        }
    }

    /// Ids of contacts with a name token starting with `prefix` (case-insensitive).
    ///
    /// A character missing from the trie yields an empty set. The empty prefix
    /// resolves to the root, which never holds ids, so it also yields an empty set.
    pub fn search(&self, prefix: &str) -> &HashSet<String> {
        let mut node = &self.root;
        for ch in prefix.to_lowercase().chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                // root's set is always empty
                None => return &self.root.contact_ids,
            }
        }
        &node.contact_ids
    }

    /// Whether `contact_id` has a name token starting with `prefix`.
    pub fn contains(&self, prefix: &str, contact_id: &str) -> bool {
        self.search(prefix).contains(contact_id)
    }

    /// Number of trie nodes below the root.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}
