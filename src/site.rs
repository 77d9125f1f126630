//! Site assembly: from a markdown tree to a finished HTML tree.
//!
//! [`Site::prepare`] does everything that happens once per build: scan the
//! document tree, read every document, build the heading index, render the
//! layout partials, and register the page template. After that the site is
//! read-only: pages can be rendered in any order (or in parallel) against it.

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use log::{info, warn};
use serde_json::json;

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::frontmatter::{self, Metadata};
use crate::links::{
    HeadingIndex, build_breadcrumbs, inject_heading_ids, page_heading_links, rewrite_links,
};
use crate::render;
use crate::source::DocumentTree;

/// File extensions copied by the asset pipeline.
const ASSET_EXTENSIONS: &[&str] = &["css", "js"];

/// Layout partials rendered once and shared by every page.
const LAYOUT_PARTIALS: &[&str] = &["header", "sidebar", "footer"];

/// One prepared site build.
pub struct Site {
    config: SiteConfig,
    /// Suffix appended to page names in generated links: `".html"` for
    /// static output, empty for the live preview server.
    suffix: String,
    tree: DocumentTree,
    index: HeadingIndex,
    /// Rendered HTML for each layout partial, in [`LAYOUT_PARTIALS`] order.
    layout: Vec<(String, String)>,
    templates: Handlebars<'static>,
}

impl Site {
    /// Scan the markdown tree, build the heading index, render layout
    /// partials, and register the page template.
    ///
    /// # Errors
    ///
    /// Fails fast on any unreadable document or partial, and on template
    /// registration problems. No partial site is produced.
    pub fn prepare(config: SiteConfig, suffix: &str) -> Result<Self> {
        let layout_dir = config.layout_dir();
        let tree = DocumentTree::scan(&config.md_dir, std::slice::from_ref(&layout_dir), &["md"])?;

        let documents = tree.read_documents()?;
        let index = HeadingIndex::build(
            documents
                .iter()
                .map(|doc| (doc.page_name.as_str(), doc.content.as_str())),
        );
        info!(
            "indexed {} documents, {} pages with headings",
            documents.len(),
            index.page_names().count()
        );

        let mut layout = Vec::with_capacity(LAYOUT_PARTIALS.len());
        for name in LAYOUT_PARTIALS {
            let path = layout_dir.join(format!("_{name}.md"));
            let raw = fs::read_to_string(&path).map_err(|e| SiteError::io(&path, e))?;
            let outcome = rewrite_links(&config.base_url, &raw, &index, suffix);
            if !outcome.unresolved.is_empty() {
                warn!("unresolved links in layout _{name}.md: {}", outcome.report());
            }
            layout.push((name.to_string(), render::to_html(&outcome.text)));
        }

        let mut templates = Handlebars::new();
        let template_path = config.template_dir.join(&config.template_name);
        templates
            .register_template_file(&config.template_name, &template_path)
            .map_err(|e| SiteError::Template(Box::new(e)))?;

        Ok(Self {
            config,
            suffix: suffix.to_string(),
            tree,
            index,
            layout,
            templates,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn index(&self) -> &HeadingIndex {
        &self.index
    }

    /// Logical names of every page, in build order.
    pub fn page_names(&self) -> Vec<String> {
        self.tree
            .paths()
            .iter()
            .map(|path| self.tree.page_name(path))
            .collect()
    }

    /// Every document path, in build order.
    pub fn paths(&self) -> &[std::path::PathBuf] {
        self.tree.paths()
    }

    /// The logical page name for a document path.
    pub fn page_name(&self, path: &Path) -> String {
        self.tree.page_name(path)
    }

    /// Render one document into a finished HTML page.
    ///
    /// Pipeline per document: front matter split, inline link rewrite (broken
    /// references logged, never fatal), markdown render, heading anchor
    /// injection, then the page template.
    pub fn render_page(&self, path: &Path) -> Result<(Metadata, String)> {
        let page_name = self.tree.page_name(path);
        let content = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        let (metadata, body) = frontmatter::parse(&page_name, &content)?;

        let outcome = rewrite_links(&self.config.base_url, &body, &self.index, &self.suffix);
        if !outcome.unresolved.is_empty() {
            warn!("unresolved links in {page_name}: {}", outcome.report());
        }

        let html = inject_heading_ids(&render::to_html(&outcome.text));
        let page = self.templates.render(
            &self.config.template_name,
            &self.template_data(&metadata, &html),
        )?;
        Ok((metadata, page))
    }

    fn template_data(&self, metadata: &Metadata, content: &str) -> serde_json::Value {
        let base_url = &self.config.base_url;
        let mut data = json!({
            "title": metadata.title,
            "overview": metadata.overview,
            "content": content,
            "base_url": base_url,
            "assets_path": format!("{base_url}/{}", self.assets_url_path()),
            "breadcrumbs": build_breadcrumbs(base_url, &metadata.page_name, &self.index, &self.suffix),
        });
        for (name, html) in &self.layout {
            data[name.as_str()] = json!(html);
        }
        for level in 1..=6 {
            data[format!("idlinks{level}")] = json!(page_heading_links(
                base_url,
                &metadata.page_name,
                level,
                &self.index,
                &self.suffix,
            ));
        }
        data
    }

    /// Write the whole site: recreate the output directory, copy assets, and
    /// render every page to `<output>/<page name>.html`.
    pub fn build(&self) -> Result<()> {
        let output_dir = &self.config.output_dir;
        if output_dir.exists() {
            fs::remove_dir_all(output_dir).map_err(|e| SiteError::io(output_dir, e))?;
        }
        fs::create_dir_all(output_dir).map_err(|e| SiteError::io(output_dir, e))?;

        self.copy_assets()?;

        for path in self.tree.paths() {
            let (metadata, page) = self.render_page(path)?;
            let dest = output_dir.join(format!("{}.html", metadata.page_name));
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
            }
            fs::write(&dest, page).map_err(|e| SiteError::io(&dest, e))?;
            info!("wrote {}", dest.display());
        }
        Ok(())
    }

    /// The path assets live under, relative to both the output directory and
    /// the site URL root.
    fn assets_subdir(&self) -> std::path::PathBuf {
        let dir = &self.config.assets_dir;
        if dir.is_relative() {
            dir.clone()
        } else {
            dir.file_name().map(Into::into).unwrap_or_default()
        }
    }

    /// `assets_subdir` as a `/`-separated URL path.
    pub(crate) fn assets_url_path(&self) -> String {
        self.assets_subdir()
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Copy every asset file into `<output>/<assets>/`, preserving the
    /// relative directory structure.
    fn copy_assets(&self) -> Result<()> {
        let assets = DocumentTree::scan(&self.config.assets_dir, &[], ASSET_EXTENSIONS)?;
        let dest_root = self.config.output_dir.join(self.assets_subdir());

        for path in assets.paths() {
            let Some(file_name) = path.file_name() else {
                continue;
            };
            let dest = dest_root.join(assets.page_dir(path)).join(file_name);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
            }
            fs::copy(path, &dest).map_err(|e| SiteError::io(&dest, e))?;
        }
        Ok(())
    }
}
