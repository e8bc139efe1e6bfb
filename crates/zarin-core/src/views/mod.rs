//! View models, one per route.
//!
//! Each view owns the [`Fetch`](crate::view::Fetch) handles for its read
//! requests and exposes the state the front end renders. Dropping a view
//! cancels whatever it still has in flight.

mod admin;
mod auth;
mod cart;
mod catalog;

pub use admin::AdminView;
pub use auth::{AuthForm, AuthKind, FormField};
pub use cart::{CartView, cart_total};
pub use catalog::{CategoryView, HomeView, ProductView, SearchView};
