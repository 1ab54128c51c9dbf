//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "AutoFlow".to_string(),
            description: "Intelligent n8n and AI automation for business processes, finance operations and marketing campaigns.".to_string(),
            author: "AutoFlow".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            content: ContentConfig::default(),
            contact: ContactConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }
}

/// Where the JSON content resources come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// HTTP origin the resources are fetched from. When unset they are
    /// read from `public_dir`.
    pub origin: Option<String>,
    pub blog_path: String,
    pub templates_path: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            origin: None,
            blog_path: "/blogPosts.json".to_string(),
            templates_path: "/templatesPost.json".to_string(),
        }
    }
}

/// Contact form configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub webhook_url: Option<String>,
}

/// Analytics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// gtag measurement id; no snippet is rendered when empty
    pub measurement_id: Option<String>,
    /// Log server-side events through tracing
    pub log_events: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            measurement_id: None,
            log_events: true,
        }
    }
}
