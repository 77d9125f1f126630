//! Crate-wide error type.
//!
//! The build pipeline distinguishes fatal errors (unreadable documents,
//! malformed front matter, template problems) from the non-fatal resolution
//! failures handled inside the `links` module. Only the fatal cases surface
//! through `SiteError`; unresolved links are reported as diagnostics and never
//! abort a build.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A document, asset, or config file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document's YAML front matter did not parse.
    #[error("invalid front matter in {page}: {source}")]
    FrontMatter {
        page: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The site config file did not parse.
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The page template failed to register.
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// The page template failed to render.
    #[error("template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// The preview server could not bind or serve.
    #[error("preview server error: {0}")]
    Server(#[from] std::io::Error),
}

impl SiteError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SiteError>;
