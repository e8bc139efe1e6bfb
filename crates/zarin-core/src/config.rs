// ── Runtime store configuration ──
//
// Describes *where* the storefront API lives and how views page it.
// Never touches disk: the front end builds a `StoreConfig` (usually via
// zarin-config) and hands it in.

use std::time::Duration;

use url::Url;
use zarin_api::TransportConfig;

/// API base address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Catalog page size for the home, search, and admin listings.
pub const DEFAULT_CATALOG_LIMIT: u32 = 12;

/// Configuration for talking to one storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// API base address (e.g. `http://localhost:8000/api`).
    pub api_url: Url,
    /// `limit` query parameter for product listings.
    pub catalog_limit: u32,
    /// Request timeout. `None` keeps the transport default (no timeout).
    pub timeout: Option<Duration>,
}

impl StoreConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            timeout: None,
        }
    }

    /// Transport settings for the HTTP client.
    pub fn transport(&self) -> TransportConfig {
        let transport = TransportConfig::default().with_cookie_jar();
        match self.timeout {
            Some(timeout) => transport.with_timeout(timeout),
            None => transport,
        }
    }
}
