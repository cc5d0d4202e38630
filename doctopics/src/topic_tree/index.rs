//! Anchor index for internal link resolution

use super::topic::TopicId;
use std::collections::BTreeMap;

/// Mapping from anchor id to the topic whose content holds it
///
/// Built fresh for each build. When two topics carry the same id, the one
/// recorded last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorIndex {
    entries: BTreeMap<String, TopicId>,
}

impl AnchorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `id` to `topic`, returning the topic it previously resolved to
    pub fn insert(&mut self, id: impl Into<String>, topic: TopicId) -> Option<TopicId> {
        self.entries.insert(id.into(), topic)
    }

    /// Topic that holds the anchor `id`
    pub fn get(&self, id: &str) -> Option<TopicId> {
        self.entries.get(id).copied()
    }

    /// Whether the index knows `id`
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of distinct anchor ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by anchor id
    pub fn iter(&self) -> impl Iterator<Item = (&str, TopicId)> {
        self.entries.iter().map(|(id, topic)| (id.as_str(), *topic))
    }

    /// Merge another index into this one; entries of `other` win
    pub fn merge(&mut self, other: AnchorIndex) {
        self.entries.extend(other.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topic_tree::TopicTree;

    #[test]
    fn test_last_write_wins() {
        let mut tree = TopicTree::new("Root");
        let first = tree.create("First");
        let second = tree.create("Second");
        let mut index = AnchorIndex::new();

        assert_eq!(index.insert("sec1", first), None);
        assert_eq!(index.insert("sec1", second), Some(first));
        assert_eq!(index.get("sec1"), Some(second));
        assert_eq!(index.len(), 1);
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_iter_is_sorted_and_merge_overrides() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");
        let b = tree.create("B");

        let mut index = AnchorIndex::new();
        index.insert("zeta", a);
        index.insert("alpha", a);

        let mut other = AnchorIndex::new();
        other.insert("zeta", b);
        index.merge(other);

        let entries: Vec<_> = index.iter().collect();
        assert_eq!(entries, vec![("alpha", a), ("zeta", b)]);
        assert!(index.contains("alpha"));
        assert!(!index.is_empty());
    }
}
