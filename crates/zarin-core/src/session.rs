// ── Session store ──
//
// Single source of truth for the signed-in user. State lives in a
// `watch` channel; every mutation is one `send_*` call so subscribers
// never observe a half-applied update.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use zarin_api::{AuthResponse, Credentials, Registration, ShopClient, User};

use crate::error::CoreError;

/// Snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// The signed-in user, absent when logged out.
    pub user: Option<Arc<User>>,
    /// `true` until the startup probe resolves.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Cloneable handle to the shared session.
///
/// Reads go through [`snapshot`](Self::snapshot) and friends; writes only
/// through the async operations below.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: Arc<ShopClient>,
    state: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(client: Arc<ShopClient>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(SessionInner { client, state }),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<Arc<User>> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.state.borrow().is_logged_in()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Probe `GET /auth/me` and settle the loading flag.
    ///
    /// Any failure, 401 included, leaves the user absent. The user and
    /// `loading = false` are published together.
    pub async fn initialize(&self) {
        let user = match self.inner.client.me().await {
            Ok(user) => {
                info!(user = %user.display_name(), "session restored");
                Some(Arc::new(user))
            }
            Err(e) if e.is_auth_expired() => {
                debug!("no active session");
                None
            }
            Err(e) => {
                warn!(error = %e, "session probe failed");
                None
            }
        };

        self.inner.state.send_replace(SessionState {
            user,
            loading: false,
        });
    }

    /// Sign in. On success the returned user becomes the session user and
    /// the full response payload is handed back. On failure state is untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, CoreError> {
        let response = self.inner.client.login(credentials).await?;
        info!(user = %response.user.display_name(), "logged in");
        self.set_user(&response.user);
        Ok(response)
    }

    /// Create an account. Same contract as [`login`](Self::login).
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, CoreError> {
        let response = self.inner.client.register(registration).await?;
        info!(user = %response.user.display_name(), "registered");
        self.set_user(&response.user);
        Ok(response)
    }

    /// End the session. The user is cleared even when the request fails.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.client.logout().await {
            warn!(error = %e, "logout request failed, clearing session anyway");
        }
        self.inner.state.send_modify(|s| s.user = None);
        info!("logged out");
    }

    fn set_user(&self, user: &User) {
        let user = Arc::new(user.clone());
        self.inner.state.send_modify(|s| s.user = Some(user));
    }
}
