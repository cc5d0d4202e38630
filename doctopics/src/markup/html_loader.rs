//! HTML front end
//!
//! Parses HTML with scraper (html5ever) and copies the result into the owned
//! [`Node`] tree. html5ever always synthesizes `<html>`, `<head>` and `<body>`,
//! so the returned root is the `<html>` element.

use super::node::{Element, Node};
use scraper::{ElementRef, Html};

/// Parse an HTML document and return its `<html>` element
pub fn parse_html(text: &str) -> Element {
    let document = Html::parse_document(text);
    convert_element(document.root_element())
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let mut converted = Element::new(value.name());
    converted.attrs = value
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    for child in element.children() {
        let node = match child.value() {
            scraper::Node::Text(text) => Some(Node::Text(String::from(&**text))),
            scraper::Node::Comment(comment) => Some(Node::Comment(String::from(&**comment))),
            scraper::Node::Element(_) => {
                ElementRef::wrap(child).map(|child| Node::Element(convert_element(child)))
            }
            _ => None,
        };
        if let Some(node) = node {
            converted.children.push(node);
        }
    }

    converted
}
