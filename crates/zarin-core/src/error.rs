// ── Core error types ──
//
// User-facing errors from zarin-core. Consumers never see reqwest errors
// or JSON parse failures directly; the `From<zarin_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the store at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// A mutating action was triggered while the previous one is in flight.
    #[error("{operation} already in progress")]
    Busy { operation: &'static str },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<zarin_api::Error> for CoreError {
    fn from(err: zarin_api::Error) -> Self {
        match err {
            zarin_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            zarin_api::Error::Transport(ref e) => {
                if e.is_timeout() || e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        identifier: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            zarin_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            zarin_api::Error::InvalidId { id } => CoreError::NotFound { identifier: id },
            zarin_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                identifier: message,
            },
            zarin_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            zarin_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
