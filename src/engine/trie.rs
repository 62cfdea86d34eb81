//! Prefix tree used for exact action-name lookup.
//!
//! Each node keeps its outgoing edges as two parallel vectors: a strictly
//! ascending list of selector `char`s and the child nodes in the same order.
//! Action alphabets are small (lowercase ASCII words, the odd `-` or `_`), so a
//! binary search over a short sorted vector beats a hash map in both memory and
//! lookup time.
//!
//! ```text
//! insert "read", "readlink", "write"
//!
//!   root ─ r ─ e ─ a ─ d* ─ l ─ i ─ n ─ k*
//!        └ w ─ r ─ i ─ t ─ e*
//! ```
//!
//! ## Invariants
//!
//! - `selectors` is strictly ascending and `selectors.len() == children.len()`.
//! - A trie is built once (see `registry.rs`) and never mutated after the
//!   owning `ActionInfo` is published.

/// A node of the action trie.
#[derive(Debug, Clone)]
pub(crate) struct TrieNode<V> {
    value: Option<V>,
    selectors: Vec<char>,
    children: Vec<TrieNode<V>>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        TrieNode { value: None, selectors: Vec::new(), children: Vec::new() }
    }
}

impl<V: Copy> TrieNode<V> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert `key`, replacing the value of an existing identical key.
    pub(crate) fn insert(&mut self, key: &str, value: V) {
        let mut node = self;
        for c in key.chars() {
            let idx = match node.selectors.binary_search(&c) {
                Ok(idx) => idx,
                Err(idx) => {
                    node.selectors.insert(idx, c);
                    node.children.insert(idx, TrieNode::default());
                    idx
                }
            };
            node = &mut node.children[idx];
        }
        node.value = Some(value);
    }

    /// Look up the substring `source[start..end]` without copying it.
    ///
    /// Returns `None` when any character misses, and also when the range names
    /// an interior node (a prefix of some key that is not itself a key).
    ///
    /// `start` and `end` are byte offsets and must lie on char boundaries.
    pub(crate) fn lookup(&self, source: &str, start: usize, end: usize) -> Option<V> {
        let mut node = self;
        for c in source.get(start..end)?.chars() {
            let idx = node.selectors.binary_search(&c).ok()?;
            node = &node.children[idx];
        }
        node.value
    }

    /// Look up a whole key.
    pub(crate) fn get(&self, key: &str) -> Option<V> {
        self.lookup(key, 0, key.len())
    }

    /// Number of nodes in this subtree, including `self`.
    pub(crate) fn node_count(&self) -> usize {
        1 + self.children.iter().map(TrieNode::node_count).sum::<usize>()
    }

    #[cfg(test)]
    fn is_well_formed(&self) -> bool {
        self.selectors.len() == self.children.len()
            && self.selectors.windows(2).all(|w| w[0] < w[1])
            && self.children.iter().all(TrieNode::is_well_formed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrieNode<u8> {
        let mut root = TrieNode::new();
        for (i, key) in ["write", "read", "readlink", "execute", "delete"].iter().enumerate() {
            root.insert(key, i as u8);
        }
        root
    }

    #[test]
    fn finds_every_inserted_key() {
        let root = sample();
        assert_eq!(root.get("write"), Some(0));
        assert_eq!(root.get("read"), Some(1));
        assert_eq!(root.get("readlink"), Some(2));
        assert_eq!(root.get("execute"), Some(3));
        assert_eq!(root.get("delete"), Some(4));
    }

    #[test]
    fn prefix_of_key_is_not_a_match() {
        let root = sample();
        assert_eq!(root.get("rea"), None);
        assert_eq!(root.get("readl"), None);
        assert_eq!(root.get(""), None);
    }

    #[test]
    fn miss_and_overrun_return_none() {
        let root = sample();
        assert_eq!(root.get("bogus"), None);
        assert_eq!(root.get("writes"), None);
        assert_eq!(root.get("Write"), None);
    }

    #[test]
    fn lookup_works_on_a_range_of_a_larger_string() {
        let root = sample();
        let source = "  write, readlink ,x";
        assert_eq!(root.lookup(source, 2, 7), Some(0));
        assert_eq!(root.lookup(source, 9, 17), Some(2));
        assert_eq!(root.lookup(source, 9, 13), Some(1));
        assert_eq!(root.lookup(source, 19, 20), None);
    }

    #[test]
    fn reinserting_a_key_replaces_its_value() {
        let mut root = sample();
        root.insert("read", 9);
        assert_eq!(root.get("read"), Some(9));
        assert_eq!(root.get("readlink"), Some(2));
    }

    #[test]
    fn selectors_stay_sorted_and_parallel() {
        let mut root = sample();
        for key in ["zeta", "alpha", "m", "mu", "ab"] {
            root.insert(key, 7);
        }
        assert!(root.is_well_formed());
        assert_eq!(root.selectors, vec!['a', 'd', 'e', 'm', 'r', 'w', 'z']);
    }

    #[test]
    fn handles_non_ascii_keys() {
        let mut root = TrieNode::new();
        root.insert("lire", 0u8);
        root.insert("écrire", 1u8);
        let source = "lire,écrire";
        assert_eq!(root.lookup(source, 5, source.len()), Some(1));
        // Not a char boundary.
        assert_eq!(root.lookup(source, 6, source.len()), None);
    }

    #[test]
    fn counts_nodes() {
        let mut root = TrieNode::new();
        root.insert("ab", 0u8);
        root.insert("ac", 1u8);
        assert_eq!(root.node_count(), 4);
    }
}
