//! Section items

use super::heading::{classify, Heading};
use crate::markup::Node;

/// One atomic content unit inside a section
///
/// An item can be a paragraph, a heading, a table, an image or any other
/// node the converter emitted. Items are owned by value, so moving one into a
/// section detaches it from wherever it was before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    node: Node,
}

impl Item {
    /// Wrap a markup node
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    /// The wrapped markup node
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Unwrap the markup node
    pub fn into_node(self) -> Node {
        self.node
    }

    /// The heading this item is or contains, if any
    pub fn find_heading(&self) -> Option<Heading> {
        classify(&self.node)
    }

    /// Deep copy of the item, detached from any section
    pub fn clone_item(&self) -> Item {
        self.clone()
    }

    /// Visible text of the item
    pub fn inner_text(&self) -> String {
        self.node.inner_text()
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Self::new(node)
    }
}
