use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdsite")]
#[command(version)]
#[command(about = "A markdown static site generator with cross-document auto-linking")]
#[command(
    long_about = "mdsite - Converts a tree of markdown documents into a cross-linked static HTML site.\n\n\
    Headings across all documents are indexed globally, and the [{label|path#id}]\n\
    link syntax is resolved against that index. Breadcrumbs and heading anchors\n\
    are generated automatically.\n\n\
    Examples:\n  \
    mdsite                        # Build the site into the output directory\n  \
    mdsite build                  # Same, explicitly\n  \
    mdsite preview                # Render in memory and serve on :8080\n  \
    mdsite preview --static       # Build to disk, then serve the output tree"
)]
pub struct Cli {
    /// Path to the site config file (TOML)
    ///
    /// Missing file falls back to defaults: markdown under ./md, assets under
    /// ./assets, template under ./template, output to ./output.
    #[arg(short = 'c', long = "config", default_value = "site.toml")]
    pub config: PathBuf,

    /// Override the configured base URL for generated links
    ///
    /// Useful for previewing a site whose config carries a production URL.
    /// Example: --base-url http://127.0.0.1:8080
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Build the static site (the default when no subcommand is given)
    ///
    /// Recreates the output directory, copies assets, and writes one
    /// <page name>.html per document. Links carry the .html suffix.
    Build,

    /// Serve a preview of the site over HTTP
    ///
    /// Without --static, pages are rendered in memory with extensionless
    /// links and served directly. With --static, the site is built to the
    /// output directory first and that tree is served as-is.
    Preview {
        /// Build to disk first, then serve the output directory
        #[arg(long = "static")]
        static_output: bool,

        /// Address to listen on
        #[arg(long = "addr", default_value = "127.0.0.1:8080")]
        addr: String,
    },
}
