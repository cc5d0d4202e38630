//! Source documents
//!
//! A [`Document`] is an HTML page split into the parts the topic builder
//! cares about: the `<head>` (kept verbatim, holds the title), the `<body>`
//! shell, and one [`Section`] per body child.

use super::anchors::{collect_ids, element_ids};
use super::error::SourceModelError;
use super::section::Section;
use crate::markup::{parse_html, parse_markdown, Element, Node};

/// A parsed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `<html>` element without children
    html: Element,
    /// `<head>` element, complete
    head: Element,
    /// `<body>` element without children
    body: Element,
    /// One section per body child, in document order
    sections: Vec<Section>,
}

impl Document {
    /// Build a document from an `<html>` element
    ///
    /// # Returns
    /// * `Ok(Document)` - The page split into head, body shell and sections
    /// * `Err(SourceModelError::InvalidArgument)` - The root is not `<html>` or has no `<head>`
    ///
    /// A missing `<body>` yields a document without sections.
    pub fn from_html_element(html: Element) -> Result<Self, SourceModelError> {
        if html.name != "html" {
            return Err(SourceModelError::InvalidArgument(format!(
                "document root must be <html>, found <{}>",
                html.name
            )));
        }

        let shell = html.shallow_clone();
        let mut head = None;
        let mut body = None;
        for child in html.children {
            match child {
                Node::Element(element) if element.name == "head" && head.is_none() => {
                    head = Some(element)
                }
                Node::Element(element) if element.name == "body" && body.is_none() => {
                    body = Some(element)
                }
                _ => {}
            }
        }

        let head = head.ok_or_else(|| {
            SourceModelError::InvalidArgument("document has no <head> element".to_string())
        })?;
        let body = body.unwrap_or_else(|| Element::new("body"));
        let body_shell = body.shallow_clone();
        let sections = body.children.into_iter().map(Section::from_node).collect();

        Ok(Self {
            html: shell,
            head,
            body: body_shell,
            sections,
        })
    }

    /// Parse an HTML page
    pub fn parse_html(text: &str) -> Result<Self, SourceModelError> {
        Self::from_html_element(parse_html(text))
    }

    /// Render and parse a Markdown page
    ///
    /// # Parameters
    /// * `title` - Page title
    /// * `content` - Raw markdown content
    /// * `split_on_rules` - Start a new section at each thematic break
    pub fn parse_markdown(
        title: &str,
        content: &str,
        split_on_rules: bool,
    ) -> Result<Self, SourceModelError> {
        Self::from_html_element(parse_markdown(title, content, split_on_rules))
    }

    /// Title text from `<head><title>`, if the page has one
    pub fn title(&self) -> Option<String> {
        self.head
            .child_element("title")
            .map(|title| Node::Element(title.clone()).inner_text())
    }

    /// Replace the page title
    ///
    /// A blank value removes the `<title>` element. Otherwise the existing
    /// element is replaced in place, or a new one is appended to the head.
    pub fn set_title(&mut self, value: &str) {
        let position = self
            .head
            .children
            .iter()
            .position(|child| child.name() == Some("title"));

        if value.trim().is_empty() {
            if let Some(index) = position {
                self.head.children.remove(index);
            }
            return;
        }

        let title: Node = Element::new("title").with_child(Node::text(value)).into();
        match position {
            Some(index) => self.head.children[index] = title,
            None => self.head.children.push(title),
        }
    }

    /// The `<head>` element
    pub fn head(&self) -> &Element {
        &self.head
    }

    /// Sections in document order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Append a section; the document takes ownership of it
    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Copy of the page
    ///
    /// The head is always deep-cloned. Sections are copied only when
    /// `include_content` is true, which gives an empty placeholder page otherwise.
    pub fn clone_document(&self, include_content: bool) -> Document {
        Document {
            html: self.html.clone(),
            head: self.head.clone(),
            body: self.body.clone(),
            sections: if include_content {
                self.sections
                    .iter()
                    .map(|section| section.clone_section(true))
                    .collect()
            } else {
                Vec::new()
            },
        }
    }

    /// Every anchor id in the body, depth-first in document order
    ///
    /// # Parameters
    /// * `attributes` - Attribute names that carry anchor ids (e.g. `name`, `id`)
    pub fn collect_anchor_ids(&self, attributes: &[String]) -> Vec<String> {
        let mut ids = Vec::new();
        element_ids(&self.body, attributes, &mut ids);
        for section in &self.sections {
            collect_ids(section.shell(), attributes, &mut ids);
            for item in section.items() {
                collect_ids(item.node(), attributes, &mut ids);
            }
        }
        ids
    }

    /// Reassemble the page into a single `<html>` element
    pub fn to_html_element(&self) -> Element {
        let mut body = self.body.clone();
        body.children = self.sections.iter().map(Section::to_node).collect();

        let mut html = self.html.clone();
        html.children = vec![Node::Element(self.head.clone()), Node::Element(body)];
        html
    }

    /// Serialize the page as HTML
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n{}",
            Node::Element(self.to_html_element()).to_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::parse_html(
            "<html><head><meta charset=\"utf-8\"><title>Manual</title></head>\
             <body lang=\"EN-US\"><div class=\"WordSection1\"><h1><a name=\"intro\"></a>Intro</h1>\
             <p id=\"p1\">Hello</p></div></body></html>",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_splits_sections() {
        let doc = sample();

        assert_eq!(doc.title().as_deref(), Some("Manual"));
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].name(), Some("WordSection1"));
        assert_eq!(doc.sections()[0].items().len(), 2);
    }

    #[test]
    fn test_from_html_element_rejects_bad_roots() {
        let err = Document::from_html_element(Element::new("div")).unwrap_err();
        assert!(matches!(err, SourceModelError::InvalidArgument(_)));

        let err = Document::from_html_element(Element::new("html")).unwrap_err();
        assert!(matches!(err, SourceModelError::InvalidArgument(_)));

        let doc =
            Document::from_html_element(Element::new("html").with_child(Element::new("head")))
                .unwrap();
        assert!(doc.sections().is_empty());
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_set_title_replaces_appends_and_removes() {
        let mut doc = sample();

        doc.set_title("Intro");
        assert_eq!(doc.title().as_deref(), Some("Intro"));
        // The title keeps its position after <meta>
        assert_eq!(doc.head().children[1].name(), Some("title"));

        doc.set_title("   ");
        assert_eq!(doc.title(), None);

        doc.set_title("Back");
        assert_eq!(doc.title().as_deref(), Some("Back"));
    }

    #[test]
    fn test_clone_document_with_and_without_content() {
        let doc = sample();

        let empty = doc.clone_document(false);
        assert!(empty.sections().is_empty());
        assert_eq!(empty.head(), doc.head());

        let full = doc.clone_document(true);
        assert_eq!(full, doc);
    }

    #[test]
    fn test_collect_anchor_ids() {
        let doc = sample();
        let attributes = vec!["name".to_string(), "id".to_string()];

        assert_eq!(doc.collect_anchor_ids(&attributes), vec!["intro", "p1"]);
        assert_eq!(doc.collect_anchor_ids(&["id".to_string()]), vec!["p1"]);
    }

    #[test]
    fn test_to_html_keeps_structure() {
        let html = sample().to_html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Manual</title>"));
        assert!(html.contains("<body lang=\"EN-US\"><div class=\"WordSection1\">"));
        assert!(html.contains("<p id=\"p1\">Hello</p>"));
    }
}
