//! Document-wide link rewriting.
//!
//! Scans a document for `[{...}]` tokens, replacing each resolvable one with
//! a standard markdown link and stripping the others down to their display
//! text. Failures are collected, never thrown: one pass yields both the
//! rewritten document and the full list of broken references.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::links::index::HeadingIndex;
use crate::links::resolver::resolve;

fn token_syntax() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[\{(.*?)\}\]").unwrap())
}

/// Result of rewriting one document.
#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    /// The document with every token replaced.
    pub text: String,
    /// Raw content of every token that failed to resolve, in first-occurrence
    /// order.
    pub unresolved: Vec<String>,
}

impl RewriteOutcome {
    /// Comma-joined diagnostic listing all broken references.
    pub fn report(&self) -> String {
        self.unresolved.join(",")
    }
}

/// Replace every `[{...}]` token in `content`.
///
/// Resolvable tokens become `[text](href)`; unresolvable ones are stripped to
/// their bare display text so nothing silently disappears from the page.
pub fn rewrite_links(
    base_url: &str,
    content: &str,
    index: &HeadingIndex,
    suffix: &str,
) -> RewriteOutcome {
    let mut unresolved = Vec::new();

    let text = token_syntax()
        .replace_all(content, |caps: &Captures| {
            let raw = &caps[1];
            let link = resolve(raw, base_url, index, suffix);
            if link.ok {
                format!("[{}]({})", link.text, link.href)
            } else {
                unresolved.push(raw.to_string());
                link.text
            }
        })
        .into_owned();

    RewriteOutcome { text, unresolved }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> HeadingIndex {
        HeadingIndex::build(vec![
            ("page1", "# def\n# jkl\n"),
            ("sub/page2", "# zyx\n# def\n"),
        ])
    }

    #[test]
    fn test_rewrites_resolvable_token() {
        let outcome = rewrite_links("https://base", "see [{jkl#}] here", &sample_index(), "");
        assert_eq!(outcome.text, "see [jkl](https://base/page1#jkl) here");
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn test_strips_unresolvable_token() {
        let outcome = rewrite_links("https://base", "see [{gone|missing}]", &sample_index(), "");
        assert_eq!(outcome.text, "see gone");
        assert_eq!(outcome.unresolved, vec!["gone|missing"]);
    }

    #[test]
    fn test_mixed_tokens() {
        let outcome = rewrite_links(
            "https://base",
            "[{docs|sub/page2}] and [{gone|missing}]",
            &sample_index(),
            ".html",
        );
        assert_eq!(
            outcome.text,
            "[docs](https://base/sub/page2.html) and gone"
        );
        assert_eq!(outcome.unresolved, vec!["gone|missing"]);
        assert_eq!(outcome.report(), "gone|missing");
    }

    #[test]
    fn test_report_preserves_first_occurrence_order() {
        let outcome = rewrite_links(
            "https://base",
            "[{b|nope}] [{docs|page1}] [{a|nada}]",
            &sample_index(),
            "",
        );
        assert_eq!(outcome.report(), "b|nope,a|nada");
    }

    #[test]
    fn test_malformed_token_keeps_raw_inner_content() {
        let outcome = rewrite_links("https://base", "x [{a|b|c}] y", &sample_index(), "");
        assert_eq!(outcome.text, "x a|b|c y");
        assert_eq!(outcome.unresolved, vec!["a|b|c"]);
    }

    #[test]
    fn test_plain_text_untouched() {
        let content = "no tokens, just [a normal link](https://example.com)";
        let outcome = rewrite_links("https://base", content, &sample_index(), "");
        assert_eq!(outcome.text, content);
        assert!(outcome.unresolved.is_empty());
    }
}
