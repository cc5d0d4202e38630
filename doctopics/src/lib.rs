//! doctopics - split pages into topic trees
//!
//! A page (HTML, or Markdown rendered to HTML) is walked section by section
//! and cut along its headings into a hierarchy of topics. Every topic holds a
//! private copy of the content under its heading, and an anchor index maps the
//! ids found in that content back to the topic.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod build_config;
pub mod markup;
pub mod pipeline;
pub mod source_model;
pub mod topic_tree;

pub use build_config::{BuildConfig, BuildConfigError, CONFIG_FILE_NAME};
pub use source_model::Document;
pub use topic_tree::{AnchorIndex, Topic, TopicId, TopicOutline, TopicTree, TopicTreeBuilder};
