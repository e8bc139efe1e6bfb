//! Async client for the Zarin storefront HTTP API.
//!
//! [`ShopClient`] speaks JSON to a single base URL and keeps the
//! server-issued session cookie in its jar. Endpoint groups:
//!
//! - **auth**: `me`, `login`, `register`, `logout`
//! - **catalog**: navigation tree, categories, product listings, product detail
//! - **cart**: contents, badge count, add item

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::{Credentials, Registration};
pub use client::ShopClient;
pub use error::Error;
pub use models::{
    AddToCart, AuthResponse, CartContents, CartCount, CartItem, Category, ItemId, Product, User,
};
pub use transport::TransportConfig;
