//! Topic tree construction
//!
//! Turns a loaded [`Document`](crate::source_model::Document) into a hierarchy
//! of topics, one per heading, each holding a private copy of the content
//! under that heading.

// Submodules
mod builder;
mod error;
mod index;
mod ownership;
mod topic;

// Re-export public types
pub use builder::{TopicOutline, TopicTreeBuilder, SECTION_COVER_LEVEL};
pub use error::TopicTreeError;
pub use index::AnchorIndex;
pub use ownership::{OwnedList, OwnerRegistry, OwnershipError};
pub use topic::{Topic, TopicId, TopicTree, Walk};
