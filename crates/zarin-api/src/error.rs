use thiserror::Error;

/// Top-level error type for the `zarin-api` crate.
///
/// Covers every failure mode of the storefront HTTP API: authentication,
/// transport, non-2xx responses, and payload decoding. `zarin-core` maps
/// these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Rejected credentials or missing/expired session (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An id that cannot be sent as a single path segment (`.` or `..`).
    #[error("Invalid id: {id:?}")]
    InvalidId { id: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Any other non-success status, with a preview of the response body.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means there is no valid session.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` for connection-level failures (server unreachable, timeout).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } | Self::InvalidId { .. } => true,
            _ => false,
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_not_found() {
        let err = Error::Api {
            status: 404,
            message: "missing".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_auth_expired());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn classifies_auth() {
        let err = Error::Authentication {
            message: "nope".into(),
        };
        assert!(err.is_auth_expired());
        assert!(!err.is_transient());
        assert_eq!(err.status(), Some(401));
    }
}
