//! Client-side state for the Zarin storefront, between `zarin-api` and a
//! front end.
//!
//! - **[`Storefront`]**: facade owning the HTTP client, the session, the
//!   router, and the shared navigation tree and cart badge.
//!   [`start()`](Storefront::start) fires the startup requests;
//!   [`mount()`](Storefront::mount) builds the view for a route.
//!
//! - **[`Session`]**: the signed-in user, published through a `watch`
//!   channel. Mutations are single assignments.
//!
//! - **[`Route`] / [`Router`]**: path table and navigation history
//!   (`navigate`, `redirect`, `back`).
//!
//! - **Views** ([`views`]): fetch-then-render models built on
//!   [`Fetch`], each request cancellable and tied to the view's lifetime.
//!
//! - **Formatting** ([`format`]): Persian-locale price and weight strings.

pub mod config;
pub mod error;
pub mod format;
pub mod route;
pub mod router;
pub mod session;
pub mod storefront;
pub mod view;
pub mod views;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_API_URL, DEFAULT_CATALOG_LIMIT, StoreConfig};
pub use error::CoreError;
pub use format::{format_price, format_weight};
pub use route::Route;
pub use router::{History, Router};
pub use session::{Session, SessionState};
pub use storefront::{ActiveView, Storefront};
pub use view::{Fetch, Loadable};

// Wire types, re-exported so front ends need not depend on zarin-api.
pub use zarin_api::{
    AuthResponse, CartContents, CartItem, Category, Credentials, ItemId, Product, Registration,
    User,
};
