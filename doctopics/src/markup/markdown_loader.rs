//! Markdown front end
//!
//! Markdown has no section markup of its own, so the rendered body is grouped
//! into `<div class="SectionN">` blocks. With rule splitting enabled every
//! thematic break (`---`) starts a new section and the break itself is dropped.

use super::html_loader::parse_html;
use super::node::Element;
use pulldown_cmark::{html, Event, Options, Parser};

/// Render Markdown into an `<html>` element with the given title
///
/// # Parameters
/// * `title` - Text placed in `<head><title>`
/// * `content` - Raw markdown content
/// * `split_on_rules` - Start a new section at each thematic break
///
/// # Returns
/// * `Element` - The `<html>` element of the rendered document
pub fn parse_markdown(title: &str, content: &str, split_on_rules: bool) -> Element {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let mut chunks: Vec<Vec<Event<'_>>> = vec![Vec::new()];
    for event in Parser::new_ext(content, options) {
        match event {
            Event::Rule if split_on_rules => chunks.push(Vec::new()),
            event => {
                if let Some(chunk) = chunks.last_mut() {
                    chunk.push(event);
                }
            }
        }
    }

    let mut page = String::from("<html><head><title>");
    page.push_str(&escape(title));
    page.push_str("</title></head><body>");
    for (number, chunk) in chunks.into_iter().filter(|c| !c.is_empty()).enumerate() {
        page.push_str(&format!("<div class=\"Section{}\">", number + 1));
        html::push_html(&mut page, chunk.into_iter());
        page.push_str("</div>");
    }
    page.push_str("</body></html>");

    log::debug!("Rendered markdown document '{}' ({} bytes)", title, page.len());
    parse_html(&page)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
