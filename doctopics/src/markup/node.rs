//! Owned markup node tree
//!
//! The topic builder never talks to an HTML library directly. Loaders convert
//! whatever they parse into this small owned tree, and the rest of the crate
//! only ever reads, clones, and (in the CLI layer) serializes it.

use std::fmt::Write;

/// Elements that never carry children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written without entity escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// A single node of the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and child nodes
    Element(Element),
    /// A run of character data
    Text(String),
    /// A comment (kept so snapshots stay faithful to the source)
    Comment(String),
}

/// An element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-case tag name (e.g. "div", "h2")
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes and no children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper that appends an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Builder-style helper that appends a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Find the first direct child element with the given tag name
    pub fn child_element(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Copy of this element without its children
    pub fn shallow_clone(&self) -> Element {
        Element {
            name: self.name.clone(),
            attrs: self.attrs.clone(),
            children: Vec::new(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Shorthand for a text node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Tag name if this node is an element
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(&element.name),
            _ => None,
        }
    }

    /// Look up an attribute value; non-elements have none
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(element) => element.attr(name),
            _ => None,
        }
    }

    /// Child nodes; text and comment nodes have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// Concatenated character data of this node and all of its descendants
    ///
    /// Comments do not contribute.
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        self.push_inner_text(&mut text);
        text
    }

    fn push_inner_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Comment(_) => {}
            Node::Element(element) => {
                for child in &element.children {
                    child.push_inner_text(out);
                }
            }
        }
    }

    /// Copy of the node without its children
    ///
    /// Text and comment nodes are copied as they are.
    pub fn shallow_clone(&self) -> Node {
        match self {
            Node::Element(element) => Node::Element(element.shallow_clone()),
            other => other.clone(),
        }
    }

    /// Serialize the node and its subtree as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append the HTML serialization of the node to `out`
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Comment(comment) => {
                let _ = write!(out, "<!--{comment}-->");
            }
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for (key, value) in &element.attrs {
                    let _ = write!(out, " {}=\"{}\"", key, escape_attr(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.name.as_str()) {
                    return;
                }
                let raw_text = RAW_TEXT_ELEMENTS.contains(&element.name.as_str());
                for child in &element.children {
                    match child {
                        Node::Text(text) if raw_text => out.push_str(text),
                        _ => child.write_html(out),
                    }
                }
                let _ = write!(out, "</{}>", element.name);
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
