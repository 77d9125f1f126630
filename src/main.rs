//! # mdsite
//!
//! A markdown static site generator with cross-document auto-linking.
//!
//! ## Usage
//!
//! Build the site described by `site.toml` in the current directory:
//! ```sh
//! mdsite
//! ```
//!
//! Preview it live (extensionless links, no files written):
//! ```sh
//! mdsite preview --base-url http://127.0.0.1:8080
//! ```
//!
//! Build to disk and serve the result:
//! ```sh
//! mdsite preview --static
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command};
use color_eyre::Result;
use mdsite::{Site, SiteConfig, server};

/// Links in static output carry the page file extension; the live preview
/// serves extensionless routes.
const STATIC_SUFFIX: &str = ".html";
const LIVE_SUFFIX: &str = "";

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let mut config = SiteConfig::load_or_default(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    match args.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site = Site::prepare(config, STATIC_SUFFIX)?;
            site.build()?;
            println!(
                "built {} pages into {}",
                site.page_names().len(),
                site.config().output_dir.display()
            );
        }
        Command::Preview {
            static_output: true,
            addr,
        } => {
            let site = Site::prepare(config, STATIC_SUFFIX)?;
            site.build()?;
            let output_dir = site.config().output_dir.clone();
            tokio::runtime::Runtime::new()?
                .block_on(server::run_preview_static(&output_dir, &addr))?;
        }
        Command::Preview {
            static_output: false,
            addr,
        } => {
            let site = Site::prepare(config, LIVE_SUFFIX)?;
            tokio::runtime::Runtime::new()?.block_on(server::run_preview(&site, &addr))?;
        }
    }

    Ok(())
}
