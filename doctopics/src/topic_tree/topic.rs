//! Topic records and the arena that links them into a tree

use super::error::TopicTreeError;
use super::ownership::{OwnedList, OwnerRegistry, OwnershipError};
use crate::source_model::Document;
use std::fmt;
use std::ops::Index;

/// Stable handle of a topic inside its [`TopicTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicId(usize);

impl TopicId {
    /// Position of the topic in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of the topic hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
    image_number: Option<String>,
    heading_level: Option<u32>,
    content: Option<Document>,
    sub_topics: OwnedList<TopicId, TopicId>,
}

impl Topic {
    /// Display name of the topic
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the image that represents the topic in an image list
    pub fn image_number(&self) -> Option<&str> {
        self.image_number.as_deref()
    }

    /// Level of the heading that opened the topic (None for the root and section covers)
    pub fn heading_level(&self) -> Option<u32> {
        self.heading_level
    }

    /// Private content snapshot of the topic
    pub fn content(&self) -> Option<&Document> {
        self.content.as_ref()
    }

    /// Sub-topics in order
    pub fn sub_topics(&self) -> &[TopicId] {
        self.sub_topics.as_slice()
    }
}

/// Parent links, kept apart from the topics so a parent's list and a
/// child's link can be updated together
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ParentLinks(Vec<Option<TopicId>>);

impl OwnerRegistry<TopicId> for ParentLinks {
    type Owner = TopicId;

    fn owner_of(&self, item: TopicId) -> Option<TopicId> {
        self.0.get(item.0).copied().flatten()
    }

    fn set_owner(&mut self, item: TopicId, owner: Option<TopicId>) {
        if let Some(slot) = self.0.get_mut(item.0) {
            *slot = owner;
        }
    }
}

/// Arena of topics rooted at a single root topic
///
/// Parent and sub-topic links are only changed through the tree, which
/// keeps them consistent: a topic is a sub-topic of exactly one parent, or of none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTree {
    topics: Vec<Topic>,
    parents: ParentLinks,
}

impl TopicTree {
    /// Create a tree holding only a root topic
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut tree = Self {
            topics: Vec::new(),
            parents: ParentLinks::default(),
        };
        tree.allocate(root_name.into(), None);
        tree
    }

    /// The root topic
    pub fn root(&self) -> TopicId {
        TopicId(0)
    }

    /// Number of topics in the arena, attached or not
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Look up a topic
    pub fn get(&self, id: TopicId) -> Option<&Topic> {
        self.topics.get(id.0)
    }

    /// Create a detached topic
    pub fn create(&mut self, name: impl Into<String>) -> TopicId {
        self.allocate(name.into(), None)
    }

    /// Create a detached topic opened by a heading of the given level
    pub fn create_heading(&mut self, name: impl Into<String>, level: u32) -> TopicId {
        self.allocate(name.into(), Some(level))
    }

    fn allocate(&mut self, name: String, heading_level: Option<u32>) -> TopicId {
        let id = TopicId(self.topics.len());
        self.topics.push(Topic {
            name,
            image_number: None,
            heading_level,
            content: None,
            sub_topics: OwnedList::new(id),
        });
        self.parents.0.push(None);
        id
    }

    fn topic_mut(&mut self, id: TopicId) -> Result<&mut Topic, TopicTreeError> {
        self.topics
            .get_mut(id.0)
            .ok_or(TopicTreeError::UnknownTopic(id))
    }

    fn check_known(&self, id: TopicId) -> Result<(), TopicTreeError> {
        if id.0 < self.topics.len() {
            Ok(())
        } else {
            Err(TopicTreeError::UnknownTopic(id))
        }
    }

    /// Parent of a topic (None for the root and for detached topics)
    pub fn parent(&self, id: TopicId) -> Option<TopicId> {
        self.parents.owner_of(id)
    }

    /// Sub-topics of a topic, in order
    pub fn children(&self, id: TopicId) -> &[TopicId] {
        self.get(id).map(Topic::sub_topics).unwrap_or(&[])
    }

    /// Whether `ancestor` is `id` or one of its ancestors
    fn is_ancestor_or_self(&self, ancestor: TopicId, id: TopicId) -> bool {
        let mut current = Some(id);
        while let Some(topic) = current {
            if topic == ancestor {
                return true;
            }
            current = self.parent(topic);
        }
        false
    }

    fn check_attachable(&self, parent: TopicId, child: TopicId) -> Result<(), TopicTreeError> {
        self.check_known(parent)?;
        self.check_known(child)?;
        if let Some(owner) = self.parent(child) {
            return Err(TopicTreeError::OwnershipViolation {
                topic: child,
                owner,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TopicTreeError::Cycle {
                topic: child,
                parent,
            });
        }
        Ok(())
    }

    fn map_ownership(
        parent: TopicId,
        child: TopicId,
        error: OwnershipError<TopicId>,
    ) -> TopicTreeError {
        match error {
            OwnershipError::AlreadyOwned { owner } => TopicTreeError::OwnershipViolation {
                topic: child,
                owner,
            },
            OwnershipError::OutOfRange { index, len } => {
                TopicTreeError::IndexOutOfRange { parent, index, len }
            }
        }
    }

    /// Append `child` as the last sub-topic of `parent`
    ///
    /// Fails without changing anything if `child` already has a parent or if
    /// `parent` is `child` or one of its descendants.
    pub fn attach(&mut self, parent: TopicId, child: TopicId) -> Result<(), TopicTreeError> {
        let len = self.children(parent).len();
        self.insert(parent, len, child)
    }

    /// Insert `child` as a sub-topic of `parent` at position `index`
    pub fn insert(
        &mut self,
        parent: TopicId,
        index: usize,
        child: TopicId,
    ) -> Result<(), TopicTreeError> {
        self.check_attachable(parent, child)?;
        let Self { topics, parents } = self;
        topics[parent.0]
            .sub_topics
            .insert(index, child, parents)
            .map_err(|e| Self::map_ownership(parent, child, e))
    }

    /// Remove the sub-topic at `index` from `parent` and return it, detached
    pub fn detach(&mut self, parent: TopicId, index: usize) -> Result<TopicId, TopicTreeError> {
        self.check_known(parent)?;
        let Self { topics, parents } = self;
        topics[parent.0]
            .sub_topics
            .remove(index, parents)
            .map_err(|e| Self::map_ownership(parent, parent, e))
    }

    /// Put `child` in place of the sub-topic at `index` and return the detached one
    pub fn replace(
        &mut self,
        parent: TopicId,
        index: usize,
        child: TopicId,
    ) -> Result<TopicId, TopicTreeError> {
        self.check_attachable(parent, child)?;
        let Self { topics, parents } = self;
        topics[parent.0]
            .sub_topics
            .replace(index, child, parents)
            .map_err(|e| Self::map_ownership(parent, child, e))
    }

    /// Change the display name of a topic
    pub fn rename(&mut self, id: TopicId, name: impl Into<String>) -> Result<(), TopicTreeError> {
        self.topic_mut(id)?.name = name.into();
        Ok(())
    }

    /// Change the image index of a topic
    pub fn set_image_number(
        &mut self,
        id: TopicId,
        image_number: Option<String>,
    ) -> Result<(), TopicTreeError> {
        self.topic_mut(id)?.image_number = image_number;
        Ok(())
    }

    /// Assign the content snapshot of a topic
    pub(crate) fn set_content(
        &mut self,
        id: TopicId,
        content: Document,
    ) -> Result<(), TopicTreeError> {
        self.topic_mut(id)?.content = Some(content);
        Ok(())
    }

    /// Pre-order walk from the root, yielding `(depth, topic)` pairs
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(0, self.root())],
        }
    }

    /// 1-based sub-topic positions leading from the root to `id`
    ///
    /// The root has an empty path; detached topics return None.
    pub fn path_of(&self, id: TopicId) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let position = self.children(parent).iter().position(|c| *c == current)?;
            path.push(position + 1);
            current = parent;
        }
        if current != self.root() {
            return None;
        }
        path.reverse();
        Some(path)
    }
}

impl Index<TopicId> for TopicTree {
    type Output = Topic;

    /// # Panics
    /// Panics if the id was not issued by this tree.
    fn index(&self, id: TopicId) -> &Topic {
        &self.topics[id.0]
    }
}

/// Pre-order iterator over a [`TopicTree`]
pub struct Walk<'a> {
    tree: &'a TopicTree,
    stack: Vec<(usize, TopicId)>,
}

impl Iterator for Walk<'_> {
    type Item = (usize, TopicId);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        self.stack.extend(
            self.tree
                .children(id)
                .iter()
                .rev()
                .map(|child| (depth + 1, *child)),
        );
        Some((depth, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tree: &TopicTree) -> Vec<(usize, String)> {
        tree.walk()
            .map(|(depth, id)| (depth, tree[id].name().to_string()))
            .collect()
    }

    #[test]
    fn test_attach_sets_parent_and_order() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");
        let b = tree.create("B");
        let c = tree.create_heading("C", 2);

        tree.attach(tree.root(), a).unwrap();
        tree.attach(tree.root(), b).unwrap();
        tree.attach(a, c).unwrap();

        assert_eq!(tree.children(tree.root()), &[a, b]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree[c].heading_level(), Some(2));
        assert_eq!(
            names(&tree),
            vec![
                (0, "Root".to_string()),
                (1, "A".to_string()),
                (2, "C".to_string()),
                (1, "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_attach_rejects_second_owner_atomically() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");
        let b = tree.create("B");
        tree.attach(tree.root(), a).unwrap();
        tree.attach(tree.root(), b).unwrap();

        let err = tree.attach(b, a).unwrap_err();
        assert_eq!(
            err,
            TopicTreeError::OwnershipViolation {
                topic: a,
                owner: tree.root()
            }
        );
        assert!(tree.children(b).is_empty());
        assert_eq!(tree.parent(a), Some(tree.root()));
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");
        tree.attach(tree.root(), a).unwrap();

        let root = tree.root();
        assert_eq!(
            tree.attach(a, root),
            Err(TopicTreeError::Cycle {
                topic: root,
                parent: a
            })
        );
        let b = tree.create("B");
        assert!(matches!(
            tree.attach(b, b),
            Err(TopicTreeError::Cycle { .. })
        ));
    }

    #[test]
    fn test_detach_and_reattach() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");
        let b = tree.create("B");
        tree.attach(tree.root(), a).unwrap();
        tree.attach(tree.root(), b).unwrap();

        let detached = tree.detach(tree.root(), 0).unwrap();
        assert_eq!(detached, a);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.children(tree.root()), &[b]);

        tree.attach(b, a).unwrap();
        assert_eq!(tree.parent(a), Some(b));
        assert_eq!(tree.path_of(a), Some(vec![1, 1]));

        assert!(matches!(
            tree.detach(tree.root(), 4),
            Err(TopicTreeError::IndexOutOfRange { index: 4, len: 1, .. })
        ));
    }

    #[test]
    fn test_replace_swaps_owners() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");
        let b = tree.create("B");
        tree.attach(tree.root(), a).unwrap();

        let outgoing = tree.replace(tree.root(), 0, b).unwrap();
        assert_eq!(outgoing, a);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.parent(b), Some(tree.root()));
        assert_eq!(tree.children(tree.root()), &[b]);
    }

    #[test]
    fn test_insert_position() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");
        let b = tree.create("B");
        tree.attach(tree.root(), a).unwrap();
        tree.insert(tree.root(), 0, b).unwrap();

        assert_eq!(tree.children(tree.root()), &[b, a]);
        assert_eq!(tree.path_of(a), Some(vec![2]));
        assert_eq!(tree.path_of(tree.root()), Some(vec![]));
    }

    #[test]
    fn test_rename_and_image_number() {
        let mut tree = TopicTree::new("Root");
        let a = tree.create("A");

        tree.rename(a, "Renamed").unwrap();
        tree.set_image_number(a, Some("7".to_string())).unwrap();
        assert_eq!(tree[a].name(), "Renamed");
        assert_eq!(tree[a].image_number(), Some("7"));

        assert!(tree.get(TopicId(99)).is_none());
        assert_eq!(
            tree.rename(TopicId(99), "x"),
            Err(TopicTreeError::UnknownTopic(TopicId(99)))
        );
        assert_eq!(tree.path_of(a), None);
    }
}
