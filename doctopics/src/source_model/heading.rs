//! Heading classification
//!
//! A heading is an element named `h<N>` where `N` is a positive integer.
//! Anything else that merely looks like one (`h0`, `hx`, `header`) is simply
//! not a heading, so classification never fails.

use crate::markup::Node;
use itertools::Itertools;

/// A heading found on a section item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Outline level (1 = h1, 2 = h2, etc.)
    pub level: u32,
    /// Visible heading text with whitespace runs collapsed to single spaces
    pub text: String,
}

/// Parse the level out of a heading tag name
///
/// # Returns
/// * `Some(level)` - `name` is `h` followed by a positive integer
/// * `None` - any other tag name
pub fn heading_level(name: &str) -> Option<u32> {
    name.strip_prefix('h')
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u32>().ok())
        .filter(|level| *level > 0)
}

/// Find the heading carried by a node
///
/// The node itself is checked first; otherwise its subtree is searched
/// depth-first and the first heading found wins.
pub fn classify(node: &Node) -> Option<Heading> {
    if let Some(level) = node.name().and_then(heading_level) {
        return Some(Heading {
            level,
            text: normalize_text(&node.inner_text()),
        });
    }
    node.children().iter().find_map(classify)
}

/// Collapse every run of whitespace (including `&nbsp;`) into one space
pub fn normalize_text(text: &str) -> String {
    text.replace("&nbsp;", " ").split_whitespace().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h12"), Some(12));
        assert_eq!(heading_level("h0"), None);
        assert_eq!(heading_level("h"), None);
        assert_eq!(heading_level("hr"), None);
        assert_eq!(heading_level("h+1"), None);
        assert_eq!(heading_level("head"), None);
        assert_eq!(heading_level("p"), None);
    }

    #[test]
    fn test_classify_direct_heading() {
        let node: Node = Element::new("h2")
            .with_child(Node::text("  Getting\u{a0}&nbsp; started\n"))
            .into();

        let heading = classify(&node).unwrap();
        assert_eq!(heading.level, 2);
        assert_eq!(heading.text, "Getting started");
    }

    #[test]
    fn test_classify_finds_first_nested_heading() {
        let node: Node = Element::new("div")
            .with_child(Element::new("p").with_child(Node::text("lead")))
            .with_child(
                Element::new("div").with_child(Element::new("h3").with_child(Node::text("Deep"))),
            )
            .with_child(Element::new("h1").with_child(Node::text("Later")))
            .into();

        let heading = classify(&node).unwrap();
        assert_eq!(heading.level, 3);
        assert_eq!(heading.text, "Deep");
    }

    #[test]
    fn test_classify_without_heading() {
        let node: Node = Element::new("p")
            .with_child(Element::new("h0").with_child(Node::text("zero")))
            .into();

        assert!(classify(&node).is_none());
        assert!(classify(&Node::text("h1")).is_none());
    }
}
