// ── Storefront facade ──
//
// Owns the HTTP client, session, router, and the application-level data
// every screen shares (navigation tree, cart badge). Views are mounted
// per route through `mount` and own their own requests.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zarin_api::{Category, ItemId, ShopClient};

use crate::config::StoreConfig;
use crate::error::CoreError;
use crate::route::Route;
use crate::router::Router;
use crate::session::{Session, SessionState};
use crate::view::Loadable;
use crate::views::{
    AdminView, AuthForm, AuthKind, CartView, CategoryView, HomeView, ProductView, SearchView,
};

// ── ActiveView ───────────────────────────────────────────────────

/// The view mounted for the current route.
pub enum ActiveView {
    Home(HomeView),
    Category(CategoryView),
    Product(ProductView),
    Cart(CartView),
    Login(AuthForm),
    Register(AuthForm),
    Admin(AdminView),
    Search(SearchView),
    NotFound(String),
}

// ── Storefront ───────────────────────────────────────────────────

/// Entry point for front ends. Cheaply cloneable.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StoreConfig,
    client: Arc<ShopClient>,
    session: Session,
    router: Router,
    navigation: watch::Sender<Loadable<Vec<Category>>>,
    cart_badge: watch::Sender<Option<u32>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Storefront {
    /// Build the HTTP client for `config`. Does not issue any request;
    /// call [`start()`](Self::start) for the startup fetches.
    pub fn new(config: StoreConfig) -> Result<Self, CoreError> {
        let client = ShopClient::new(config.api_url.clone(), &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Build around an existing client.
    pub fn with_client(config: StoreConfig, client: ShopClient) -> Self {
        let client = Arc::new(client);
        let session = Session::new(Arc::clone(&client));
        let (navigation, _) = watch::channel(Loadable::Loading);
        let (cart_badge, _) = watch::channel(None);

        Self {
            inner: Arc::new(StorefrontInner {
                config,
                client,
                session,
                router: Router::default(),
                navigation,
                cart_badge,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &Arc<ShopClient> {
        &self.inner.client
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    pub fn navigation(&self) -> watch::Receiver<Loadable<Vec<Category>>> {
        self.inner.navigation.subscribe()
    }

    /// Cart item count for the header badge. `None` until known, or after
    /// a failed refresh.
    pub fn cart_badge(&self) -> watch::Receiver<Option<u32>> {
        self.inner.cart_badge.subscribe()
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Kick off the startup work without waiting for any of it: the
    /// session probe, the navigation tree, and the cart badge (refreshed
    /// again whenever the signed-in identity changes).
    pub async fn start(&self) {
        info!(api = %self.inner.config.api_url, "starting storefront");
        let mut handles = self.inner.task_handles.lock().await;

        let session = self.inner.session.clone();
        let cancel = self.inner.cancel.clone();
        handles.push(tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                () = session.initialize() => {}
            }
        }));

        let store = self.clone();
        let cancel = self.inner.cancel.clone();
        handles.push(tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                () = store.load_navigation() => {}
            }
        }));

        let store = self.clone();
        let cancel = self.inner.cancel.clone();
        handles.push(tokio::spawn(async move {
            cart_badge_task(store, cancel).await;
        }));
    }

    /// Cancel background work and wait for it to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("storefront stopped");
    }

    async fn load_navigation(&self) {
        let next = match self.inner.client.navigation_categories().await {
            Ok(tree) => {
                debug!(roots = tree.len(), "navigation loaded");
                Loadable::Loaded(tree)
            }
            Err(e) => {
                warn!(error = %e, "navigation fetch failed");
                Loadable::Errored
            }
        };
        self.inner.navigation.send_replace(next);
    }

    /// Re-read `GET /cart/count` into the badge.
    pub async fn refresh_cart_badge(&self) {
        let count = match self.inner.client.cart_count().await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(error = %e, "cart count fetch failed");
                None
            }
        };
        self.inner.cart_badge.send_replace(count);
    }

    /// Sign out through the session. The cart badge task sees the identity
    /// change and re-reads the count on its own.
    pub async fn logout(&self) {
        self.inner.session.logout().await;
    }

    // ── Views ────────────────────────────────────────────────────

    /// Mount the view for `route`, issuing its mount requests.
    pub fn mount(&self, route: &Route) -> ActiveView {
        let client = Arc::clone(&self.inner.client);
        let limit = self.inner.config.catalog_limit;
        debug!(route = route.name(), "mount");

        match route {
            Route::Home => ActiveView::Home(HomeView::mount(client, limit)),
            Route::Category { id } => ActiveView::Category(CategoryView::mount(client, id.clone())),
            Route::Product { id } => ActiveView::Product(ProductView::mount(client, id.clone())),
            Route::Cart => ActiveView::Cart(CartView::mount(client)),
            Route::Login => ActiveView::Login(AuthForm::new(AuthKind::Login)),
            Route::Register => ActiveView::Register(AuthForm::new(AuthKind::Register)),
            Route::Admin { section } => {
                let user = self.inner.session.user();
                ActiveView::Admin(AdminView::mount(
                    client,
                    user.as_deref(),
                    section.clone(),
                    limit,
                ))
            }
            Route::Search { query } => {
                ActiveView::Search(SearchView::mount(client, query.clone(), limit))
            }
            Route::NotFound { path } => ActiveView::NotFound(path.clone()),
        }
    }

    /// Bring `view` in line with `route`.
    ///
    /// A category view moving to another category keeps its instance and
    /// only re-fetches when the id differs. Everything else is re-mounted.
    pub fn update(&self, view: &mut ActiveView, route: &Route) {
        if let (ActiveView::Category(current), Route::Category { id }) = (&mut *view, route) {
            current.set_category(id.clone());
            return;
        }
        *view = self.mount(route);
    }
}

/// Badge refresh loop: once at startup, then on every identity change.
async fn cart_badge_task(store: Storefront, cancel: CancellationToken) {
    let mut session_rx = store.inner.session.subscribe();
    let mut identity = identity_of(&session_rx.borrow_and_update());

    tokio::select! {
        biased;
        () = cancel.cancelled() => return,
        () = store.refresh_cart_badge() => {}
    }

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = session_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = identity_of(&session_rx.borrow_and_update());
                if next == identity {
                    continue;
                }
                debug!(?next, "session identity changed, refreshing cart badge");
                identity = next;
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    () = store.refresh_cart_badge() => {}
                }
            }
        }
    }
}

fn identity_of(state: &SessionState) -> Option<ItemId> {
    state.user.as_ref().map(|u| u.id.clone())
}
