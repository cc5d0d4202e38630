//! Named anchor discovery
//!
//! Collects the values of anchor attributes (`name`, `id`, ...) in document
//! order so that the caller can index them.

use crate::markup::{Element, Node};

/// Append the anchor ids carried by `element` itself (not its children)
pub fn element_ids(element: &Element, attributes: &[String], out: &mut Vec<String>) {
    for attribute in attributes {
        if let Some(value) = element.attr(attribute) {
            out.push(value.to_string());
        }
    }
}

/// Append the anchor ids of `node` and all of its descendants, depth-first
pub fn collect_ids(node: &Node, attributes: &[String], out: &mut Vec<String>) {
    if let Node::Element(element) = node {
        element_ids(element, attributes, out);
        for child in &element.children {
            collect_ids(child, attributes, out);
        }
    }
}
