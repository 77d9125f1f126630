//! HTML heading anchor injection.
//!
//! Runs after markdown rendering: every `<hN>...</hN>` element gains an `id`
//! attribute derived from its body text with [`heading_id`], so rewritten
//! links and breadcrumb anchors have something to point at.
//!
//! Opening tags are paired with the first closing tag of the *same* level by
//! an explicit scan (the regex engine has no back-references). An opening tag
//! with no same-level close is left untouched, and a mismatched closing level
//! never terminates an element.

use std::sync::OnceLock;

use regex::Regex;

use crate::links::index::heading_id;

fn open_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<h([1-6])( ?[^<>]*)>").unwrap())
}

/// Add an `id` attribute to every well-paired HTML heading element.
pub fn inject_heading_ids(html: &str) -> String {
    let pattern = open_tag_pattern();
    let mut out = String::with_capacity(html.len() + 64);
    let mut pos = 0;

    while let Some(caps) = pattern.captures(&html[pos..]) {
        let open = caps.get(0).unwrap();
        let (start, end) = (pos + open.start(), pos + open.end());
        let level = &caps[1];
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let close = format!("</h{level}>");

        out.push_str(&html[pos..start]);
        match html[end..].find(&close) {
            Some(rel) => {
                let body = &html[end..end + rel];
                out.push_str(&format!(
                    "<h{level}{attrs} id=\"{}\">{body}{close}",
                    heading_id(body)
                ));
                pos = end + rel + close.len();
            }
            None => {
                // Unpaired opening tag: emit as-is and keep scanning.
                out.push_str(&html[start..end]);
                pos = end;
            }
        }
    }

    out.push_str(&html[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injects_id_into_plain_heading() {
        let html = inject_heading_ids("<h1>Intro</h1>");
        assert_eq!(html, r#"<h1 id="Intro">Intro</h1>"#);
    }

    #[test]
    fn test_id_is_percent_encoded() {
        let html = inject_heading_ids("<h2>Getting Started</h2>");
        assert_eq!(html, r#"<h2 id="Getting%20Started">Getting Started</h2>"#);
    }

    #[test]
    fn test_existing_attributes_are_kept() {
        let html = inject_heading_ids(r#"<h3 class="wide">Setup</h3>"#);
        assert_eq!(html, r#"<h3 class="wide" id="Setup">Setup</h3>"#);
    }

    #[test]
    fn test_multiple_headings() {
        let html = inject_heading_ids("<h1>A</h1><p>x</p><h2>B</h2>");
        assert_eq!(html, r#"<h1 id="A">A</h1><p>x</p><h2 id="B">B</h2>"#);
    }

    #[test]
    fn test_body_spanning_lines() {
        let html = inject_heading_ids("<h2>Two\nLines</h2>");
        assert_eq!(html, "<h2 id=\"Two%0ALines\">Two\nLines</h2>");
    }

    #[test]
    fn test_mismatched_close_does_not_terminate() {
        // </h3> must not close the <h2>; the real </h2> further on does.
        let html = inject_heading_ids("<h2>A</h3>B</h2>");
        assert_eq!(html, r#"<h2 id="A%3C%2Fh3%3EB">A</h3>B</h2>"#);
    }

    #[test]
    fn test_unpaired_open_tag_left_alone() {
        let html = inject_heading_ids("<h2>dangling");
        assert_eq!(html, "<h2>dangling");
    }

    #[test]
    fn test_non_heading_tags_untouched() {
        let html = "<header>x</header><hr>";
        assert_eq!(inject_heading_ids(html), html);
    }
}
