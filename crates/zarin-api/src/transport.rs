// Shared transport configuration for building the reqwest::Client.
//
// Holds the cookie jar that carries the server-issued session cookie, and
// the optional request timeout. The storefront API relies on the
// transport's default behaviour unless a timeout is configured.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

const USER_AGENT: &str = concat!("zarin/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    /// Session cookie jar. Created on demand by [`ShopClient::new`](crate::ShopClient::new).
    pub cookie_jar: Option<Arc<Jar>>,
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder.build().map_err(crate::error::Error::Transport)
    }

    /// Create a config with a fresh cookie jar (for session auth).
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
