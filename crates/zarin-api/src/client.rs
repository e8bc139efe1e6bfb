// Storefront HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, cookie-carried sessions,
// and uniform status/body handling. Endpoint groups (auth, catalog, cart)
// are implemented as inherent methods in separate files so this module
// stays focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

const BODY_PREVIEW_CHARS: usize = 200;

/// Error bodies commonly look like `{"message": "..."}` or `{"detail": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(alias = "detail", alias = "error")]
    message: Option<String>,
}

/// HTTP client for the storefront API.
///
/// Every path is resolved against one base URL (e.g.
/// `http://localhost:8000/api`). The session lives in a server-issued
/// cookie; the client stores it in its jar and sends it on every request.
#[derive(Debug)]
pub struct ShopClient {
    http: reqwest::Client,
    base_url: Url,
    cookie_jar: Option<Arc<Jar>>,
}

impl ShopClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically since the session is cookie-based.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The `Cookie` header value currently held for the API origin, if any.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an API path (`"products"`, `"/cart/count"`) against the base URL.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Append `segments` to the base URL, each percent-encoded as exactly one
    /// path segment. `.` and `..` cannot be expressed that way and are rejected.
    pub(crate) fn api_url_segments(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty();
            for segment in segments {
                if matches!(*segment, "." | "..") {
                    return Err(Error::InvalidId {
                        id: (*segment).to_owned(),
                    });
                }
                path.push(segment);
            }
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a path and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        self.get_url(self.api_url(path)?, query).await
    }

    /// GET a path built from individually escaped segments.
    pub(crate) async fn get_segments<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, Error> {
        self.get_url(self.api_url_segments(segments)?, &[]).await
    }

    async fn get_url<T: DeserializeOwned>(
        &self,
        mut url: Url,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }

    /// POST a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_json(resp).await
    }

    /// POST and discard the response body. Only the status matters.
    pub(crate) async fn post_empty(
        &self,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<(), Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);

        let mut builder = self.http.post(url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::check_status(resp).await.map(drop)
    }

    /// Map non-2xx statuses to errors, passing successful responses through.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| preview(&body));

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: if message.is_empty() {
                    "not authenticated".into()
                } else {
                    message
                },
            });
        }

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// First few hundred characters of a body, cut on a char boundary.
fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
