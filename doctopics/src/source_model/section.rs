//! Document sections

use super::item::Item;
use crate::markup::{Element, Node};
use regex::Regex;
use std::sync::OnceLock;

/// Text that renders as nothing: whitespace and `&nbsp;` only
fn empty_text_regex() -> &'static Regex {
    static EMPTY_TEXT: OnceLock<Regex> = OnceLock::new();
    EMPTY_TEXT.get_or_init(|| Regex::new(r"^(?:\s|&nbsp;)*$").expect("valid empty-text pattern"))
}

/// An ordered run of items sharing one structural grouping (one body child)
///
/// The section keeps its own node as a childless shell; the node's children
/// live in `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    shell: Node,
    items: Vec<Item>,
}

impl Section {
    /// Split a body child node into a section shell and its items
    pub fn from_node(node: Node) -> Self {
        match node {
            Node::Element(element) => {
                let Element {
                    name,
                    attrs,
                    children,
                } = element;
                Self {
                    shell: Node::Element(Element {
                        name,
                        attrs,
                        children: Vec::new(),
                    }),
                    items: children.into_iter().map(Item::new).collect(),
                }
            }
            other => Self {
                shell: other,
                items: Vec::new(),
            },
        }
    }

    /// Label of the section (its `class` attribute)
    pub fn name(&self) -> Option<&str> {
        self.shell.attr("class")
    }

    /// The section's own node without its items
    pub fn shell(&self) -> &Node {
        &self.shell
    }

    /// Items in section order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Append an item; the section takes ownership of it
    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Rendered text of the section
    pub fn inner_text(&self) -> String {
        let mut text = self.shell.inner_text();
        for item in &self.items {
            text.push_str(&item.inner_text());
        }
        text
    }

    /// Whether the rendered text is whitespace only (`&nbsp;` counts as whitespace)
    pub fn is_empty(&self) -> bool {
        empty_text_regex().is_match(&self.inner_text())
    }

    /// Copy of the section
    ///
    /// # Parameters
    /// * `include_content` - Deep-clone the items too; otherwise the copy has none
    pub fn clone_section(&self, include_content: bool) -> Section {
        Section {
            shell: self.shell.clone(),
            items: if include_content {
                self.items.iter().map(Item::clone_item).collect()
            } else {
                Vec::new()
            },
        }
    }

    /// Reassemble the section into a single markup node
    pub fn to_node(&self) -> Node {
        match &self.shell {
            Node::Element(shell) => {
                let mut element = shell.shallow_clone();
                element.children = self.items.iter().map(|i| i.node().clone()).collect();
                Node::Element(element)
            }
            other => other.clone(),
        }
    }
}
