//! Markup tree and the front ends that produce it
//!
//! Everything downstream works on the owned [`Node`] tree; the loaders here
//! are the only places that know about scraper or pulldown-cmark.

mod html_loader;
mod markdown_loader;
mod node;

pub use html_loader::parse_html;
pub use markdown_loader::parse_markdown;
pub use node::{Element, Node};
