//! Cross-document heading index and link resolution.
//!
//! The engine at the center of the build: every document's headings feed one
//! global [`HeadingIndex`], and the `[{label|path#id}]` token syntax is
//! resolved against it: by the rewriter for inline links, by the breadcrumb
//! builder for the navigation chain, and (after rendering) by the anchor
//! injector that gives every HTML heading an addressable id.
//!
//! Index construction completes before any resolution starts; afterwards the
//! index is read-only, so resolving documents concurrently is safe.

pub mod anchors;
pub mod breadcrumbs;
pub mod index;
pub mod resolver;
pub mod rewrite;

pub use anchors::inject_heading_ids;
pub use breadcrumbs::{LinkPair, build_breadcrumbs, page_heading_links};
pub use index::{Heading, HeadingIndex, extract_headings, heading_id};
pub use resolver::{LinkToken, ResolvedLink, resolve};
pub use rewrite::{RewriteOutcome, rewrite_links};
