//! autoflow-site: the AutoFlow marketing site
//!
//! Serves the landing page plus the Blog and Templates collections. Both
//! collections are loaded from a JSON resource on every page load and
//! rendered server-side with Tera templates.

pub mod analytics;
pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod helpers;
pub mod router;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use analytics::{EventSink, NoopSink, TracingSink};
use content::ContentLoader;

/// The site application
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public directory: static files and local content resources
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Content loader for the configured origin
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::from_config(&self.config.content, &self.public_dir)
    }

    /// Event sink honoring `analytics.log_events`
    pub fn event_sink(&self) -> Arc<dyn EventSink> {
        if self.config.analytics.log_events {
            Arc::new(TracingSink)
        } else {
            Arc::new(NoopSink)
        }
    }
}
