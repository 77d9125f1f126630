//! Breadcrumbs and per-page heading links.
//!
//! Both produce `(label, href)` pairs for the page template: the breadcrumb
//! chain locating a page in the directory hierarchy, and the anchor lists of
//! a page's own headings grouped by level.

use serde::Serialize;

use crate::links::index::HeadingIndex;
use crate::links::resolver::resolve;

/// A labelled link for template rendering. An empty `href` renders as plain
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPair {
    pub label: String,
    pub href: String,
}

/// Derive the breadcrumb chain for a page from its path segments.
///
/// Each segment is resolved independently against the prefix path up to it;
/// a prefix with no corresponding document yields an empty `href` (a plain
/// text crumb), never an error.
pub fn build_breadcrumbs(
    base_url: &str,
    page_name: &str,
    index: &HeadingIndex,
    suffix: &str,
) -> Vec<LinkPair> {
    let mut prefix: Vec<&str> = Vec::new();

    page_name
        .split('/')
        .map(|segment| {
            prefix.push(segment);
            let link = resolve(
                &format!("{segment}|{}", prefix.join("/")),
                base_url,
                index,
                suffix,
            );
            LinkPair {
                label: link.text,
                href: link.href,
            }
        })
        .collect()
}

/// Anchor links for every heading of `level` on `page_name`, in source order.
pub fn page_heading_links(
    base_url: &str,
    page_name: &str,
    level: usize,
    index: &HeadingIndex,
    suffix: &str,
) -> Vec<LinkPair> {
    index
        .page_headings(page_name)
        .iter()
        .filter(|heading| heading.level == level)
        .map(|heading| LinkPair {
            label: heading.text.clone(),
            href: format!("{base_url}/{page_name}{suffix}#{}", heading.id),
        })
        .collect()
}
