//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CAFE_API_URL | http://localhost:3003 | Backend base URL |
//! | CAFE_TIMEOUT_SECS | 30 | Request timeout |
//! | CAFE_STORAGE_PATH | (unset: in-memory) | Local store file |
//! | CAFE_PAGE_SIZE | 8 | Menu page size |

use crate::storage::{KeyValueStore, LocalStore, StorageError};
use shared::catalog::{CatalogQuery, DEFAULT_PAGE_SIZE};
use std::path::PathBuf;
use std::sync::Arc;

/// Client configuration for connecting to the cafe backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3003")
    pub base_url: String,

    /// Bearer token for authenticated calls
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Local key/value store file; `None` keeps state in memory only
    pub storage_path: Option<PathBuf>,

    /// Items per menu page
    pub page_size: usize,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            storage_path: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("CAFE_API_URL").unwrap_or_else(|_| "http://localhost:3003".into()),
        );
        config.timeout = std::env::var("CAFE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.timeout);
        config.storage_path = std::env::var("CAFE_STORAGE_PATH")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        config.page_size = std::env::var("CAFE_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(config.page_size);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist local state to this file
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Set the menu page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fresh menu query paged at the configured size
    pub fn catalog_query(&self) -> CatalogQuery {
        CatalogQuery::new().with_page_size(self.page_size)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }

    /// Open the local store: a redb file at `storage_path`, else in memory
    pub fn open_store(&self) -> crate::ClientResult<Arc<dyn KeyValueStore>> {
        let store = match &self.storage_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(StorageError::from)?;
                }
                tracing::info!(path = %path.display(), "Opening local store");
                LocalStore::open(path)?
            }
            None => LocalStore::open_in_memory()?,
        };
        Ok(Arc::new(store))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3003")
    }
}
