//! Site configuration.
//!
//! All build state lives in an explicit [`SiteConfig`] passed into each build
//! invocation, so multiple sites can be built in one process without shared
//! mutable state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// Configuration for one site build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// URL prefix prepended to every generated link (e.g. `https://docs.example.com`
    /// or an empty string for root-relative links).
    #[serde(default)]
    pub base_url: String,

    /// Directory containing the markdown document tree.
    #[serde(default = "default_md_dir")]
    pub md_dir: PathBuf,

    /// Directory containing static assets (`.css`/`.js`), also used as the
    /// URL path they are served under.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Directory containing the Handlebars page template.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Name of the page template file inside `template_dir`.
    #[serde(default = "default_template_name")]
    pub template_name: String,

    /// Directory the generated site is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_md_dir() -> PathBuf {
    PathBuf::from("md")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("template")
}

fn default_template_name() -> String {
    "index.html".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            md_dir: default_md_dir(),
            assets_dir: default_assets_dir(),
            template_dir: default_template_dir(),
            template_name: default_template_name(),
            output_dir: default_output_dir(),
        }
    }
}

impl SiteConfig {
    /// Load config from a TOML file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        toml::from_str(&contents).map_err(|e| SiteError::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load config from a TOML file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The layout-partials directory (`<md_dir>/layout`), excluded from page
    /// traversal.
    pub fn layout_dir(&self) -> PathBuf {
        self.md_dir.join("layout")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.md_dir, PathBuf::from("md"));
        assert_eq!(config.template_name, "index.html");
        assert_eq!(config.base_url, "");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            base_url = "https://docs.example.com"
            md_dir = "docs"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://docs.example.com");
        assert_eq!(config.md_dir, PathBuf::from("docs"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_load_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, "base_url = [not toml").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }

    #[test]
    fn test_layout_dir() {
        let config = SiteConfig {
            md_dir: PathBuf::from("docs"),
            ..Default::default()
        };
        assert_eq!(config.layout_dir(), PathBuf::from("docs/layout"));
    }
}
