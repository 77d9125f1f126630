//! Heading extraction and the cross-document heading index.
//!
//! Every ATX heading in every document is collected into one index with two
//! views: by heading text (global, last-write-wins) and by owning page
//! (order-preserving). The index is built once per build and is read-only
//! afterwards.

use std::sync::OnceLock;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;

/// Bytes escaped when deriving a URL-fragment id from heading text: space plus
/// the URL-reserved and HTML-attribute-sensitive characters.
const ID_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode heading text into a URL-fragment id.
///
/// Used by both the extractor and the HTML anchor injector, so ids derived
/// from the same text always line up.
pub fn heading_id(text: &str) -> String {
    utf8_percent_encode(text, ID_ESCAPE).to_string()
}

/// One extracted markdown heading occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Displayed heading text, trimmed.
    pub text: String,
    /// Logical name of the owning page.
    pub page_name: String,
    /// Percent-encoded copy of `text`, usable as a URL fragment.
    pub id: String,
    /// ATX level, 1–6.
    pub level: usize,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^(#{1,6}) +(.+)$").unwrap())
}

/// Extract every ATX-style heading from one document's text, in source order.
///
/// A heading line is 1–6 `#` markers followed by at least one space and
/// nonempty text. Malformed lines (7+ markers, no space) are ignored. Setext
/// headings are not recognized.
pub fn extract_headings(content: &str, page_name: &str) -> Vec<Heading> {
    heading_pattern()
        .captures_iter(content)
        .map(|caps| {
            let text = caps[2].trim().to_string();
            Heading {
                id: heading_id(&text),
                text,
                page_name: page_name.to_string(),
                level: caps[1].len(),
            }
        })
        .collect()
}

/// Global heading index over all documents of one build.
#[derive(Debug, Default, Clone)]
pub struct HeadingIndex {
    by_text: IndexMap<String, Heading>,
    by_page: IndexMap<String, Vec<Heading>>,
}

impl HeadingIndex {
    /// Build the index from an ordered sequence of `(page name, content)`.
    ///
    /// When the same heading text occurs more than once, within a page or
    /// across pages, the occurrence from the *last* document in the supplied
    /// order wins in the by-text view. Callers wanting reproducible output
    /// must supply a fixed order; [`crate::source::DocumentTree`] does.
    pub fn build<I, N, C>(documents: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut index = Self::default();
        for (page_name, content) in documents {
            let page_name = page_name.as_ref();
            for heading in extract_headings(content.as_ref(), page_name) {
                index
                    .by_text
                    .insert(heading.text.clone(), heading.clone());
                index
                    .by_page
                    .entry(page_name.to_string())
                    .or_default()
                    .push(heading);
            }
        }
        index
    }

    /// Look up the (last-write-wins) heading for an exact text.
    pub fn heading_for_text(&self, text: &str) -> Option<&Heading> {
        self.by_text.get(text)
    }

    /// All headings of one page, in source order. Empty for unknown pages.
    pub fn page_headings(&self, page_name: &str) -> &[Heading] {
        self.by_page
            .get(page_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Page names in document-supply order.
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.by_page.keys().map(String::as_str)
    }

    /// Whether `page_name` has a heading whose id equals `id`.
    pub fn page_has_anchor(&self, page_name: &str, id: &str) -> bool {
        self.page_headings(page_name).iter().any(|h| h.id == id)
    }
}
