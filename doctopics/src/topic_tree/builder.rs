//! Outline builder
//!
//! Walks a document section by section and turns its headings into a topic
//! hierarchy. A stack of open frames tracks the current outline position:
//!
//! * the root topic sits below the stack and is never popped;
//! * every section first pushes a cover frame at [`SECTION_COVER_LEVEL`] to
//!   catch the content that precedes its first heading;
//! * a heading closes the open topic, pops every frame at the same or a
//!   deeper level, and opens a new frame at its own level.
//!
//! Closing a frame gives its topic a private snapshot of the buffered items,
//! attaches it under the frame below, and records its anchors. A cover whose
//! snapshot has no visible text is dropped instead.

use super::error::TopicTreeError;
use super::index::AnchorIndex;
use super::topic::{Topic, TopicId, TopicTree};
use crate::build_config::BuildConfig;
use crate::source_model::{Document, Heading, Item, Section};

/// Level of a section cover frame; deeper than any real heading
pub const SECTION_COVER_LEVEL: u32 = u32::MAX;

/// Result of a build: the topic tree and the anchors found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicOutline {
    /// Topic hierarchy rooted at a topic named after the document title
    pub tree: TopicTree,
    /// Anchor id to topic mapping for internal link resolution
    pub index: AnchorIndex,
}

impl TopicOutline {
    /// Topic holding the anchor `id`
    pub fn resolve(&self, id: &str) -> Option<&Topic> {
        self.index.get(id).and_then(|topic| self.tree.get(topic))
    }
}

/// Builds topic trees from documents
pub struct TopicTreeBuilder<'a> {
    config: &'a BuildConfig,
}

impl<'a> TopicTreeBuilder<'a> {
    /// Create a builder using the given configuration
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    /// Build the topic tree of a document
    ///
    /// # Parameters
    /// * `document` - Source page; it is only read, every topic gets cloned content
    ///
    /// # Returns
    /// * `Ok(TopicOutline)` - The tree and its anchor index
    /// * `Err(TopicTreeError)` - A topic could not be attached; no partial tree is returned
    pub fn build(&self, document: &Document) -> Result<TopicOutline, TopicTreeError> {
        let title = document.title().unwrap_or_default();
        log::debug!(
            "Building topic tree for '{}' ({} sections)",
            title,
            document.sections().len()
        );

        let mut pass = BuildPass {
            config: self.config,
            document,
            tree: TopicTree::new(title),
            index: AnchorIndex::new(),
            frames: Vec::new(),
        };
        for section in document.sections() {
            pass.process_section(section)?;
        }

        log::debug!(
            "Built {} topics with {} anchors",
            pass.tree.walk().count(),
            pass.index.len()
        );
        Ok(TopicOutline {
            tree: pass.tree,
            index: pass.index,
        })
    }
}

/// An open position in the outline
struct Frame {
    level: u32,
    name: String,
    cover: bool,
    /// Set once the frame has been closed and its topic placed in the tree
    topic: Option<TopicId>,
}

impl Frame {
    fn cover(name: &str) -> Self {
        Self {
            level: SECTION_COVER_LEVEL,
            name: name.to_string(),
            cover: true,
            topic: None,
        }
    }

    fn heading(heading: Heading) -> Self {
        Self {
            level: heading.level,
            name: heading.text,
            cover: false,
            topic: None,
        }
    }
}

/// State of one build invocation
struct BuildPass<'a> {
    config: &'a BuildConfig,
    document: &'a Document,
    tree: TopicTree,
    index: AnchorIndex,
    /// Open frames above the root
    frames: Vec<Frame>,
}

impl<'a> BuildPass<'a> {
    fn process_section(&mut self, section: &'a Section) -> Result<(), TopicTreeError> {
        let cover_name = section.name().unwrap_or(&self.config.cover_name);
        self.frames.push(Frame::cover(cover_name));

        let mut buffer: Vec<&'a Item> = Vec::with_capacity(section.items().len());
        for item in section.items() {
            if let Some(heading) = item.find_heading() {
                self.close(section, &mut buffer)?;
                while self
                    .frames
                    .last()
                    .is_some_and(|frame| frame.level >= heading.level)
                {
                    self.frames.pop();
                }
                log::trace!("Opening topic '{}' at level {}", heading.text, heading.level);
                self.frames.push(Frame::heading(heading));
            }
            buffer.push(item);
        }
        self.close(section, &mut buffer)?;

        // Back to the root for the next section
        self.frames.clear();
        Ok(())
    }

    /// Finalize the frame on top of the stack with the buffered items
    fn close(&mut self, section: &Section, buffer: &mut Vec<&'a Item>) -> Result<(), TopicTreeError> {
        let mut snapshot_section = section.clone_section(false);
        for item in buffer.drain(..) {
            snapshot_section.push_item(item.clone_item());
        }

        let Some(mut frame) = self.frames.pop() else {
            return Ok(());
        };

        if frame.cover && snapshot_section.is_empty() {
            log::debug!("Skipping empty cover topic '{}'", frame.name);
            return Ok(());
        }

        let mut content = self.document.clone_document(false);
        content.push_section(snapshot_section);
        content.set_title(&frame.name);
        let anchors = content.collect_anchor_ids(&self.config.anchor_attributes);

        let topic = if frame.cover {
            self.tree.create(frame.name.clone())
        } else {
            self.tree.create_heading(frame.name.clone(), frame.level)
        };
        // Frames below the top have all been closed, so their topics are placed
        let below = self.frames.last();
        debug_assert!(
            below.map_or(true, |frame| frame.topic.is_some()),
            "open frame '{}' below '{}' has no placed topic",
            below.map(|frame| frame.name.as_str()).unwrap_or_default(),
            frame.name
        );
        let parent = below
            .and_then(|frame| frame.topic)
            .unwrap_or_else(|| self.tree.root());

        self.tree.set_content(topic, content)?;
        self.tree.attach(parent, topic)?;
        log::trace!("Closed topic '{}' under {}", frame.name, parent);

        frame.topic = Some(topic);
        self.frames.push(frame);

        for anchor in anchors {
            if let Some(previous) = self.index.insert(anchor.clone(), topic) {
                if previous != topic {
                    log::debug!("Anchor '{}' moved from topic {} to {}", anchor, previous, topic);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{Element, Node};

    fn heading(level: u32, text: &str) -> Node {
        Element::new(format!("h{level}"))
            .with_child(Node::text(text))
            .into()
    }

    fn para(text: &str) -> Node {
        Element::new("p").with_child(Node::text(text)).into()
    }

    fn document(title: &str, sections: Vec<Node>) -> Document {
        let mut body = Element::new("body");
        body.children = sections;
        let html = Element::new("html")
            .with_child(Element::new("head").with_child(Element::new("title").with_child(Node::text(title))))
            .with_child(body);
        Document::from_html_element(html).unwrap()
    }

    fn section(class: Option<&str>, items: Vec<Node>) -> Node {
        let mut div = Element::new("div");
        if let Some(class) = class {
            div = div.with_attr("class", class);
        }
        div.children = items;
        div.into()
    }

    fn build(doc: &Document) -> TopicOutline {
        TopicTreeBuilder::new(&BuildConfig::default()).build(doc).unwrap()
    }

    fn outline(result: &TopicOutline) -> Vec<(usize, String)> {
        result
            .tree
            .walk()
            .map(|(depth, id)| (depth, result.tree[id].name().to_string()))
            .collect()
    }

    fn item_texts(result: &TopicOutline, id: TopicId) -> Vec<String> {
        result.tree[id]
            .content()
            .map(|doc| {
                doc.sections()[0]
                    .items()
                    .iter()
                    .map(Item::inner_text)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_nested_headings() {
        let doc = document(
            "Manual",
            vec![section(
                None,
                vec![
                    heading(1, "Intro"),
                    para("Hello"),
                    heading(2, "Details"),
                    para("World"),
                ],
            )],
        );

        let result = build(&doc);
        assert_eq!(
            outline(&result),
            vec![
                (0, "Manual".to_string()),
                (1, "Intro".to_string()),
                (2, "Details".to_string()),
            ]
        );

        let intro = result.tree.children(result.tree.root())[0];
        let details = result.tree.children(intro)[0];
        assert_eq!(item_texts(&result, intro), vec!["Intro", "Hello"]);
        assert_eq!(item_texts(&result, details), vec!["Details", "World"]);
        assert_eq!(result.tree[details].heading_level(), Some(2));
        assert_eq!(
            result.tree[details].content().unwrap().title().as_deref(),
            Some("Details")
        );
    }

    #[test]
    fn test_same_level_headings_are_siblings_and_outdent_closes_all() {
        let doc = document(
            "Book",
            vec![section(
                None,
                vec![
                    heading(1, "A"),
                    heading(2, "A.1"),
                    heading(3, "A.1.1"),
                    heading(2, "A.2"),
                    heading(1, "B"),
                ],
            )],
        );

        assert_eq!(
            outline(&build(&doc)),
            vec![
                (0, "Book".to_string()),
                (1, "A".to_string()),
                (2, "A.1".to_string()),
                (3, "A.1.1".to_string()),
                (2, "A.2".to_string()),
                (1, "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_skipped_levels_nest_under_nearest_shallower() {
        let doc = document(
            "Book",
            vec![section(None, vec![heading(3, "Deep"), heading(1, "Top"), heading(4, "Deeper")])],
        );

        assert_eq!(
            outline(&build(&doc)),
            vec![
                (0, "Book".to_string()),
                (1, "Deep".to_string()),
                (1, "Top".to_string()),
                (2, "Deeper".to_string()),
            ]
        );
    }

    #[test]
    fn test_cover_holds_leading_content() {
        let doc = document(
            "Manual",
            vec![section(
                Some("WordSection1"),
                vec![para("Preface"), heading(1, "Intro")],
            )],
        );

        let result = build(&doc);
        assert_eq!(
            outline(&result),
            vec![
                (0, "Manual".to_string()),
                (1, "WordSection1".to_string()),
                (1, "Intro".to_string()),
            ]
        );
        let cover = result.tree.children(result.tree.root())[0];
        assert_eq!(item_texts(&result, cover), vec!["Preface"]);
        assert_eq!(result.tree[cover].heading_level(), None);
    }

    #[test]
    fn test_empty_cover_is_elided() {
        let doc = document(
            "Manual",
            vec![
                Node::text("\n"),
                section(None, vec![para(" \u{a0} "), heading(1, "Intro")]),
                section(None, vec![para("&nbsp;")]),
            ],
        );

        let result = build(&doc);
        assert_eq!(
            outline(&result),
            vec![(0, "Manual".to_string()), (1, "Intro".to_string())]
        );
        // Elided covers never reach the arena
        assert_eq!(result.tree.topic_count(), 2);
    }

    #[test]
    fn test_deep_chain_attaches_each_topic_to_the_frame_below() {
        let doc = document(
            "Book",
            vec![section(
                Some("Front"),
                vec![
                    para("lead"),
                    heading(1, "L1"),
                    heading(2, "L2"),
                    heading(3, "L3"),
                    heading(4, "L4"),
                    heading(5, "L5"),
                    heading(6, "L6"),
                    heading(2, "Back"),
                ],
            )],
        );

        let result = build(&doc);
        let tree = &result.tree;
        let mut expected_parent = tree.root();
        for (_, id) in tree.walk().skip(2).take(6) {
            assert_eq!(tree.parent(id), Some(expected_parent));
            expected_parent = id;
        }
        let l1 = tree.children(tree.root())[1];
        let back = *tree.children(l1).last().unwrap();
        assert_eq!(tree[back].name(), "Back");
        assert_eq!(tree.path_of(back), Some(vec![2, 2]));
    }

    #[test]
    fn test_sections_restart_at_root() {
        let doc = document(
            "Manual",
            vec![
                section(None, vec![heading(1, "One"), heading(2, "One.A")]),
                section(None, vec![heading(2, "Two.A")]),
            ],
        );

        assert_eq!(
            outline(&build(&doc)),
            vec![
                (0, "Manual".to_string()),
                (1, "One".to_string()),
                (2, "One.A".to_string()),
                (1, "Two.A".to_string()),
            ]
        );
    }

    #[test]
    fn test_custom_cover_name_and_anchor_attributes() {
        let config = BuildConfig {
            cover_name: "Front".to_string(),
            anchor_attributes: vec!["id".to_string()],
            ..BuildConfig::default()
        };
        let anchored: Node = Element::new("p")
            .with_attr("id", "p1")
            .with_attr("name", "ignored")
            .with_child(Node::text("text"))
            .into();
        let doc = document("Manual", vec![section(None, vec![anchored])]);

        let result = TopicTreeBuilder::new(&config).build(&doc).unwrap();
        let cover = result.tree.children(result.tree.root())[0];
        assert_eq!(result.tree[cover].name(), "Front");
        assert_eq!(result.index.get("p1"), Some(cover));
        assert!(!result.index.contains("ignored"));
        assert_eq!(result.resolve("p1").map(Topic::name), Some("Front"));
    }

    #[test]
    fn test_duplicate_anchor_resolves_to_later_topic() {
        let anchored = |text: &str| -> Node {
            Element::new("p")
                .with_attr("id", "sec1")
                .with_child(Node::text(text))
                .into()
        };
        let doc = document(
            "Manual",
            vec![section(
                None,
                vec![heading(1, "First"), anchored("a"), heading(1, "Second"), anchored("b")],
            )],
        );

        let result = build(&doc);
        assert_eq!(result.index.len(), 1);
        assert_eq!(result.resolve("sec1").map(Topic::name), Some("Second"));
    }

    #[test]
    fn test_source_document_is_untouched() {
        let doc = document("Manual", vec![section(None, vec![heading(1, "Intro"), para("x")])]);
        let before = doc.clone();

        let _ = build(&doc);
        assert_eq!(doc, before);
    }
}
