//! Source model for the loading stage
//!
//! This module defines the page structures the topic builder consumes:
//! documents, their sections and items, heading classification and anchor
//! discovery.

// Submodules
mod anchors;
mod document;
mod error;
mod heading;
mod item;
mod section;

// Re-export public types
pub use anchors::collect_ids;
pub use document::Document;
pub use error::SourceModelError;
pub use heading::{classify, heading_level, normalize_text, Heading};
pub use item::Item;
pub use section::Section;
