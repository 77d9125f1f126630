//! Document tree traversal.
//!
//! Walks a base directory for files with matching extensions, producing an
//! ordered list of document paths. The order is fixed (lexicographic by file
//! name) so every downstream consumer, most importantly the heading index's
//! last-write-wins semantics, sees a reproducible sequence.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SiteError};

/// An ordered set of document paths under one base directory.
///
/// Built by [`DocumentTree::scan`]; also used for asset trees by passing the
/// relevant extensions.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    base_dir: PathBuf,
    paths: Vec<PathBuf>,
}

/// One loaded document: its logical page name plus raw content.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Relative path with the extension stripped, `/`-separated.
    pub page_name: String,
    pub content: String,
}

impl DocumentTree {
    /// Walk `base_dir` collecting files whose extension is in `extensions`
    /// (given without the leading dot). Directories listed in `skip_dirs` are
    /// not descended into.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory in the tree cannot be read.
    pub fn scan(base_dir: &Path, skip_dirs: &[PathBuf], extensions: &[&str]) -> Result<Self> {
        let mut paths = Vec::new();
        let walker = WalkDir::new(base_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !skip_dirs.iter().any(|skip| entry.path() == skip));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                SiteError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext));
            if matches {
                paths.push(entry.path().to_path_buf());
            }
        }

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            paths,
        })
    }

    /// All matched file paths, in scan order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Derive a document's logical page name: its path relative to the base
    /// directory, extension stripped, `/`-separated.
    pub fn page_name(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.base_dir).unwrap_or(path);
        let rel = rel.with_extension("");
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The relative directory a file lives in, used to mirror the tree under
    /// the output directory.
    pub fn page_dir(&self, path: &Path) -> PathBuf {
        let rel = path.strip_prefix(&self.base_dir).unwrap_or(path);
        rel.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    /// Read every document in scan order.
    ///
    /// # Errors
    ///
    /// Fails fast on the first unreadable file; no partial result is
    /// returned.
    pub fn read_documents(&self) -> Result<Vec<SourceDocument>> {
        self.paths
            .iter()
            .map(|path| {
                let content =
                    fs::read_to_string(path).map_err(|e| SiteError::io(path.clone(), e))?;
                Ok(SourceDocument {
                    page_name: self.page_name(path),
                    content,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_filters_extensions_and_skip_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        touch(&base.join("index.md"), "# Index");
        touch(&base.join("notes.txt"), "not markdown");
        touch(&base.join("sub/page2.md"), "# Sub");
        touch(&base.join("layout/_header.md"), "# Header");

        let tree =
            DocumentTree::scan(base, std::slice::from_ref(&base.join("layout")), &["md"]).unwrap();
        let names: Vec<_> = tree.paths().iter().map(|p| tree.page_name(p)).collect();

        assert_eq!(names, vec!["index", "sub/page2"]);
    }

    #[test]
    fn test_scan_order_is_lexicographic() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        touch(&base.join("zeta.md"), "");
        touch(&base.join("alpha.md"), "");
        touch(&base.join("mid.md"), "");

        let tree = DocumentTree::scan(base, &[], &["md"]).unwrap();
        let names: Vec<_> = tree.paths().iter().map(|p| tree.page_name(p)).collect();

        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_page_dir() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        touch(&base.join("a/b/page.md"), "");

        let tree = DocumentTree::scan(base, &[], &["md"]).unwrap();
        assert_eq!(tree.page_dir(&tree.paths()[0]), PathBuf::from("a/b"));
    }

    #[test]
    fn test_read_documents_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        touch(&base.join("a.md"), "alpha");
        touch(&base.join("b.md"), "beta");

        let tree = DocumentTree::scan(base, &[], &["md"]).unwrap();
        let docs = tree.read_documents().unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].page_name, "a");
        assert_eq!(docs[0].content, "alpha");
        assert_eq!(docs[1].page_name, "b");
    }
}
