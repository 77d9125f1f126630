//! # mdsite
//!
//! A static site generator library that converts a tree of markdown
//! documents into a cross-linked HTML site.
//!
//! The heart of the crate is the cross-document heading index and link
//! resolution engine in [`links`]: every heading of every document is indexed
//! globally, and the custom `[{label|path#id}]` link syntax is resolved
//! against that index, with deterministic handling of duplicate headings,
//! partial path suffixes, and missing targets.
//!
//! ## Example
//!
//! ```rust
//! use mdsite::links::{HeadingIndex, resolve, rewrite_links};
//!
//! let index = HeadingIndex::build(vec![
//!     ("guide/install", "# Requirements\n## Download\n"),
//!     ("guide/usage", "# Quick Start\n"),
//! ]);
//!
//! // Link by heading text, wherever it lives:
//! let link = resolve("Quick Start#", "https://docs.example.com", &index, ".html");
//! assert_eq!(link.href, "https://docs.example.com/guide/usage.html#Quick%20Start");
//!
//! // Or rewrite a whole document:
//! let outcome = rewrite_links(
//!     "https://docs.example.com",
//!     "See [{setup|install#Download}] first.",
//!     &index,
//!     ".html",
//! );
//! assert!(outcome.unresolved.is_empty());
//! ```

/// Site configuration: an explicit per-build config object.
pub mod config;

/// Crate error type and result alias.
pub mod error;

/// Front matter metadata parsing.
pub mod frontmatter;

/// Cross-document heading index, link resolution, breadcrumbs, and HTML
/// anchor injection.
pub mod links;

/// Markdown to HTML rendering.
pub mod render;

/// Preview servers for local inspection.
pub mod server;

/// Build pipeline from markdown tree to HTML tree.
pub mod site;

/// Document tree traversal.
pub mod source;

// Re-export commonly used types for convenience
pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use links::{Heading, HeadingIndex, ResolvedLink, RewriteOutcome};
pub use site::Site;
