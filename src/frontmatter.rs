//! Front matter metadata parsing.
//!
//! A document may open with a `---` delimited YAML block carrying its title
//! and overview. The block is split off before markdown processing; a
//! document without one yields default (empty) metadata.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, SiteError};

/// Metadata fields read from a document's front matter.
///
/// `page_name` is not part of the front matter itself; the build pipeline
/// fills it in from the document's path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub overview: String,

    #[serde(skip)]
    pub page_name: String,
}

fn front_matter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\A---(.*?)---").unwrap())
}

/// Split a document into its metadata and markdown body.
///
/// The body is the document with the front matter block removed. A document
/// without front matter passes through unchanged with default metadata.
///
/// # Errors
///
/// Returns an error if a front matter block is present but is not valid YAML
/// for [`Metadata`]. This aborts the build; a malformed document is never
/// silently published.
pub fn parse(page_name: &str, content: &str) -> Result<(Metadata, String)> {
    let pattern = front_matter_pattern();

    let mut metadata = match pattern.captures(content) {
        Some(caps) => {
            // An empty block deserializes as YAML null, hence the Option.
            let parsed: Option<Metadata> =
                serde_yaml::from_str(caps.get(1).map_or("", |m| m.as_str())).map_err(|e| {
                    SiteError::FrontMatter {
                        page: page_name.to_string(),
                        source: e,
                    }
                })?;
            parsed.unwrap_or_default()
        }
        None => Metadata::default(),
    };
    metadata.page_name = page_name.to_string();

    let body = pattern.replace(content, "").into_owned();
    Ok((metadata, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_front_matter() {
        let content = "---\ntitle: Getting Started\noverview: First steps.\n---\n# Intro\n";
        let (meta, body) = parse("guide/start", content).unwrap();

        assert_eq!(meta.title, "Getting Started");
        assert_eq!(meta.overview, "First steps.");
        assert_eq!(meta.page_name, "guide/start");
        assert_eq!(body, "\n# Intro\n");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let content = "# Just a heading\n";
        let (meta, body) = parse("plain", content).unwrap();

        assert_eq!(meta.title, "");
        assert_eq!(meta.overview, "");
        assert_eq!(body, content);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let content = "---\ntitle: T\nauthor: somebody\n---\nbody";
        let (meta, body) = parse("p", content).unwrap();
        assert_eq!(meta.title, "T");
        assert_eq!(body, "\nbody");
    }

    #[test]
    fn test_empty_front_matter_block() {
        let (meta, body) = parse("p", "---\n---\nbody").unwrap();
        assert_eq!(meta.title, "");
        assert_eq!(body, "\nbody");
    }

    #[test]
    fn test_malformed_front_matter_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let err = parse("broken", content).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_delimiters_must_open_the_document() {
        let content = "intro text\n---\ntitle: T\n---\n";
        let (meta, body) = parse("p", content).unwrap();
        assert_eq!(meta.title, "");
        assert_eq!(body, content);
    }
}
