//! Content sources - where the JSON resources are fetched from

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use super::LoadError;

/// A fetched resource: status code and raw body
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub body: String,
}

impl Fetched {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can answer a GET for a resource path
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch `path` (e.g. `/blogPosts.json`).
    ///
    /// Non-success statuses are returned as values; only failures to reach
    /// the resource at all are errors.
    async fn fetch(&self, path: &str) -> Result<Fetched, LoadError>;
}

/// Fetches resources from an HTTP origin
pub struct HttpSource {
    client: reqwest::Client,
    origin: String,
}

impl HttpSource {
    pub fn new(origin: &str) -> Self {
        Self::with_client(reqwest::Client::new(), origin)
    }

    pub fn with_client(client: reqwest::Client, origin: &str) -> Self {
        Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Fetched, LoadError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Transport(format!("{}: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Transport(format!("{}: {}", url, e)))?;

        Ok(Fetched { status, body })
    }
}

/// Reads resources from a local directory, answering like a static file server
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a resource path into the root, refusing to leave it
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || relative.as_os_str().is_empty() {
            None
        } else {
            Some(self.root.join(relative))
        }
    }
}

#[async_trait]
impl ContentSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Fetched, LoadError> {
        let Some(file) = self.resolve(path) else {
            return Ok(Fetched::status(404));
        };

        match tokio::fs::read_to_string(&file).await {
            Ok(body) => Ok(Fetched::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Fetched::status(404)),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", file, e);
                Ok(Fetched::status(500))
            }
        }
    }
}
