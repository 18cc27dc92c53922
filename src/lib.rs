//! folio: a personal portfolio and blog site
//!
//! Blog posts and projects come from a remote content API. Post bodies mix
//! editor-produced HTML with Markdown, so they are normalized into plain
//! Markdown before rendering (see [`content::normalize`]). Pages are
//! rendered with embedded Tera templates, either on request by the
//! built-in server or ahead of time into a static public directory.

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create from an already loaded configuration
    pub fn with_config(base_dir: std::path::PathBuf, config: config::SiteConfig) -> Self {
        let public_dir = base_dir.join(&config.public_dir);
        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Content API client for this site
    pub fn api(&self) -> Result<api::ContentApi> {
        Ok(api::ContentApi::new(&self.config.api)?)
    }

    /// Fetch content and write the static site
    pub async fn generate(&self) -> Result<usize> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<usize> {
        commands::clean::run(self)
    }
}
