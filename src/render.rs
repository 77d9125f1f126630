//! Markdown to HTML rendering.
//!
//! A pure function boundary: markdown text in, HTML out. Heading anchor ids
//! are added afterwards by [`crate::links::anchors`], which keeps the
//! renderer interchangeable.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Render markdown to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, Parser::new_ext(markdown, options));
    html
}
