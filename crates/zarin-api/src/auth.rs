// Session authentication endpoints
//
// The server issues a session cookie on login/register and clears it on
// logout; the client's cookie jar carries it for every later request.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ShopClient;
use crate::error::Error;
use crate::models::{AuthResponse, User};

/// Email/password pair for `POST /auth/login`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Sign-up payload for `POST /auth/register`.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl ShopClient {
    /// Identity of the current session (`GET /auth/me`).
    ///
    /// Fails with [`Error::Authentication`] when there is no session.
    pub async fn me(&self) -> Result<User, Error> {
        self.get("auth/me", &[]).await
    }

    /// Sign in. The returned payload is passed through whole.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, Error> {
        debug!(email = %credentials.email, "logging in");
        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });
        self.post("auth/login", &body).await
    }

    /// Create an account and sign in.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, Error> {
        debug!(email = %registration.email, "registering");
        let body = json!({
            "name": registration.name,
            "email": registration.email,
            "password": registration.password.expose_secret(),
        });
        self.post("auth/register", &body).await
    }

    /// End the server-side session.
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        self.post_empty("auth/logout", None::<&()>).await
    }
}
