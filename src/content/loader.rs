//! Content loader - fetches a collection resource and turns it into entries

use std::path::Path;
use std::sync::Arc;

use super::normalize::{find_entry, normalize_entries, parse_resource, sort_by_recency, EntryMap};
use super::{Collection, ContentEntry, ContentSource, DirSource, HttpSource, LoadError};
use crate::config::ContentConfig;

/// Loads collections through a [`ContentSource`].
///
/// Every call fetches the resource again; nothing is cached between loads.
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    config: ContentConfig,
}

impl ContentLoader {
    /// Create a loader over an explicit source
    pub fn new(source: Arc<dyn ContentSource>, config: ContentConfig) -> Self {
        Self { source, config }
    }

    /// Fetch from `config.origin` when set, from `public_dir` otherwise
    pub fn from_config(config: &ContentConfig, public_dir: &Path) -> Self {
        let source: Arc<dyn ContentSource> = match &config.origin {
            Some(origin) if !origin.is_empty() => {
                tracing::debug!("Loading content from {}", origin);
                Arc::new(HttpSource::new(origin))
            }
            _ => {
                tracing::debug!("Loading content from {:?}", public_dir);
                Arc::new(DirSource::new(public_dir))
            }
        };
        Self::new(source, config.clone())
    }

    /// Fetch and unwrap the slug mapping of a collection
    async fn fetch_mapping(&self, collection: Collection) -> Result<EntryMap, LoadError> {
        let path = collection.resource_path(&self.config);
        let fetched = self.source.fetch(path).await?;

        if !fetched.is_success() {
            return Err(LoadError::Fetch {
                status: fetched.status,
            });
        }

        parse_resource(&fetched.body)
    }

    /// Load a collection as a list, newest first
    pub async fn try_load_list(&self, collection: Collection) -> Result<Vec<ContentEntry>, LoadError> {
        let map = self.fetch_mapping(collection).await?;
        let mut entries = normalize_entries(map);
        sort_by_recency(&mut entries);
        Ok(entries)
    }

    /// Load a collection as a list; failures are logged and yield no entries
    pub async fn load_list(&self, collection: Collection) -> Vec<ContentEntry> {
        match self.try_load_list(collection).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error loading {}: {}", collection, e);
                Vec::new()
            }
        }
    }

    /// Load a single entry by slug.
    ///
    /// An empty slug is reported as not found without fetching anything.
    pub async fn load_entry(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<ContentEntry, LoadError> {
        if slug.is_empty() {
            return Err(LoadError::NotFound {
                slug: String::new(),
            });
        }

        let map = self.fetch_mapping(collection).await?;
        find_entry(map, slug)
    }
}
