//! Link token parsing and resolution.
//!
//! The site's custom link syntax references pages and headings by name
//! instead of by path. A token has up to three parts, `label|path#id`, and is
//! resolved against the [`HeadingIndex`]:
//!
//! - `target`: link to the page `target` (exact or suffix path match),
//!   displayed as `target`.
//! - `target#id`: look the heading text `id` up in the global by-text view
//!   and link to wherever it lives, displayed as `target`.
//! - `target#`: same, with `target` itself as the heading text.
//! - `label|path` and `label|path#id`: link to page `path` (checking that
//!   `id` exists on it), displayed as `label`.
//!
//! Resolution never fails hard: an unparseable or unresolvable token yields
//! `ok = false` with the best-effort display text preserved.

use std::sync::OnceLock;

use regex::Regex;

use crate::links::index::HeadingIndex;

/// A parsed link token. Parts not present in the source are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkToken {
    pub label: String,
    pub path: String,
    pub id: String,
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^((?:[^#|]+\|)?)([^#|]+)((?:#[^#|]*)?)$").unwrap())
}

impl LinkToken {
    /// Split a raw token into label, path, and id parts.
    ///
    /// Content that does not fit the three-part shape parses to an all-empty
    /// token rather than an error; the caller treats that as unresolved.
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = token_pattern().captures(raw) else {
            return Self::default();
        };

        let label_part = caps.get(1).map_or("", |m| m.as_str());
        let target = caps.get(2).map_or("", |m| m.as_str());
        let id_part = caps.get(3).map_or("", |m| m.as_str());

        let mut token = Self::default();
        match id_part.len() {
            // `target`: the target doubles as label and page path.
            0 => {
                token.label = target.to_string();
                token.path = target.to_string();
            }
            // `target#`: the target doubles as label and heading text.
            1 => {
                token.label = target.to_string();
                token.id = target.to_string();
            }
            // `target#id`: id lookup unless an explicit label makes the
            // target a page path.
            _ => {
                token.id = id_part[1..].to_string();
                if label_part.is_empty() {
                    token.label = target.to_string();
                } else {
                    token.path = target.to_string();
                }
            }
        }
        if !label_part.is_empty() {
            token.label = label_part[..label_part.len() - 1].to_string();
        }
        token
    }
}

/// Outcome of resolving one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Display text; on failure this is the best-effort label so the original
    /// content is never dropped from output.
    pub text: String,
    /// Full link target; empty when `ok` is false.
    pub href: String,
    pub ok: bool,
}

impl ResolvedLink {
    fn unresolved(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: String::new(),
            ok: false,
        }
    }
}

/// Find the page a (possibly partial) path refers to.
///
/// Exact matches win; otherwise the first page name *ending* with `path`, in
/// document-supply order, is taken. Ambiguous suffixes are resolved by that
/// order, not reported.
fn find_page<'a>(path: &str, index: &'a HeadingIndex) -> Option<&'a str> {
    index
        .page_names()
        .find(|name| *name == path)
        .or_else(|| index.page_names().find(|name| name.ends_with(path)))
}

/// Resolve a raw token against the heading index.
///
/// `suffix` is appended to page names in generated hrefs (`".html"` for
/// static output, empty for the live preview server).
pub fn resolve(raw: &str, base_url: &str, index: &HeadingIndex, suffix: &str) -> ResolvedLink {
    let token = LinkToken::parse(raw);

    // Structurally invalid: keep the raw content as display text.
    if token.label.is_empty() {
        return ResolvedLink::unresolved(raw);
    }

    let path = if token.path.is_empty() {
        // Implicit form: the id is heading text, looked up globally.
        let Some(heading) = index.heading_for_text(&token.id) else {
            return ResolvedLink::unresolved(token.label);
        };
        format!("{}{}#{}", heading.page_name, suffix, heading.id)
    } else {
        let Some(page_name) = find_page(&token.path, index) else {
            return ResolvedLink::unresolved(token.label);
        };
        let mut path = format!("{page_name}{suffix}");
        if !token.id.is_empty() {
            if !index.page_has_anchor(page_name, &token.id) {
                return ResolvedLink::unresolved(token.label);
            }
            path.push('#');
            path.push_str(&token.id);
        }
        path
    };

    ResolvedLink {
        text: token.label,
        href: format!("{base_url}/{path}"),
        ok: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> HeadingIndex {
        HeadingIndex::build(vec![
            ("page1", "# def\n# ghi\n# jkl\n# mno\n# pqr\n# stu\n"),
            ("sub/page2", "# zyx\n# wvu\n# def\n"),
        ])
    }

    #[test]
    fn test_parse_target_only() {
        let token = LinkToken::parse("sub/page2");
        assert_eq!(token.label, "sub/page2");
        assert_eq!(token.path, "sub/page2");
        assert_eq!(token.id, "");
    }

    #[test]
    fn test_parse_bare_hash() {
        let token = LinkToken::parse("jkl#");
        assert_eq!(token.label, "jkl");
        assert_eq!(token.path, "");
        assert_eq!(token.id, "jkl");
    }

    #[test]
    fn test_parse_target_and_id_without_label() {
        let token = LinkToken::parse("see this#ghi");
        assert_eq!(token.label, "see this");
        assert_eq!(token.path, "");
        assert_eq!(token.id, "ghi");
    }

    #[test]
    fn test_parse_full_form() {
        let token = LinkToken::parse("docs|sub/page2#wvu");
        assert_eq!(token.label, "docs");
        assert_eq!(token.path, "sub/page2");
        assert_eq!(token.id, "wvu");
    }

    #[test]
    fn test_parse_label_and_path() {
        let token = LinkToken::parse("docs|sub/page2");
        assert_eq!(token.label, "docs");
        assert_eq!(token.path, "sub/page2");
        assert_eq!(token.id, "");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert_eq!(LinkToken::parse(""), LinkToken::default());
        assert_eq!(LinkToken::parse("a|b|c"), LinkToken::default());
        assert_eq!(LinkToken::parse("a#b#c"), LinkToken::default());
        assert_eq!(LinkToken::parse("|path"), LinkToken::default());
    }

    #[test]
    fn test_resolve_implicit_id() {
        let link = resolve("jkl#", "https://base", &sample_index(), "");
        assert_eq!(link.text, "jkl");
        assert_eq!(link.href, "https://base/page1#jkl");
        assert!(link.ok);
    }

    #[test]
    fn test_resolve_implicit_id_uses_last_writer() {
        // "def" exists on both pages; sub/page2 was indexed last.
        let link = resolve("def#", "https://base", &sample_index(), ".html");
        assert_eq!(link.href, "https://base/sub/page2.html#def");
        assert!(link.ok);
    }

    #[test]
    fn test_resolve_implicit_id_miss() {
        let link = resolve("nothing#absent", "https://base", &sample_index(), "");
        assert_eq!(link.text, "nothing");
        assert_eq!(link.href, "");
        assert!(!link.ok);
    }

    #[test]
    fn test_resolve_exact_page() {
        let link = resolve("docs|sub/page2", "https://base", &sample_index(), ".html");
        assert_eq!(link.text, "docs");
        assert_eq!(link.href, "https://base/sub/page2.html");
        assert!(link.ok);
    }

    #[test]
    fn test_resolve_suffix_page() {
        let link = resolve("docs|page2", "https://base", &sample_index(), "");
        assert_eq!(link.href, "https://base/sub/page2");
        assert!(link.ok);
    }

    #[test]
    fn test_resolve_exact_beats_suffix() {
        let index = HeadingIndex::build(vec![("nested/page1", "# a\n"), ("page1", "# b\n")]);
        let link = resolve("p|page1", "https://base", &index, "");
        assert_eq!(link.href, "https://base/page1");
    }

    #[test]
    fn test_resolve_ambiguous_suffix_takes_first_in_order() {
        let index = HeadingIndex::build(vec![("a/guide", "# a\n"), ("b/guide", "# b\n")]);
        let link = resolve("g|guide", "https://base", &index, "");
        assert_eq!(link.href, "https://base/a/guide");
    }

    #[test]
    fn test_resolve_full_round_trip() {
        let link = resolve("docs|sub/page2#wvu", "https://base", &sample_index(), ".html");
        assert_eq!(link.text, "docs");
        assert_eq!(link.href, "https://base/sub/page2.html#wvu");
        assert!(link.ok);
    }

    #[test]
    fn test_resolve_missing_page() {
        let link = resolve("docs|no/such/page", "https://base", &sample_index(), "");
        assert_eq!(link.text, "docs");
        assert!(!link.ok);
    }

    #[test]
    fn test_resolve_missing_anchor_on_page() {
        let link = resolve("docs|sub/page2#jkl", "https://base", &sample_index(), "");
        assert_eq!(link.text, "docs");
        assert_eq!(link.href, "");
        assert!(!link.ok);
    }

    #[test]
    fn test_resolve_malformed_token_keeps_raw_text() {
        let link = resolve("a|b|c", "https://base", &sample_index(), "");
        assert_eq!(link.text, "a|b|c");
        assert!(!link.ok);
    }

    #[test]
    fn test_suffix_match_is_literal_not_regex() {
        let index = HeadingIndex::build(vec![("notes/v1.0", "# a\n")]);
        // A regex would let `.` match any character; ends_with must not.
        let link = resolve("v|v1x0", "https://base", &index, "");
        assert!(!link.ok);
        let link = resolve("v|v1.0", "https://base", &index, "");
        assert_eq!(link.href, "https://base/notes/v1.0");
    }
}
