// Catalog endpoints: categories and products.

use crate::client::ShopClient;
use crate::error::Error;
use crate::models::{Category, ItemId, Product};

impl ShopClient {
    /// Category tree for site navigation (`GET /categories/navigation`).
    pub async fn navigation_categories(&self) -> Result<Vec<Category>, Error> {
        self.get("categories/navigation", &[]).await
    }

    /// Flat category list (`GET /categories`).
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.get("categories", &[]).await
    }

    /// Products in one category (`GET /categories/{id}/products`).
    pub async fn category_products(&self, category: &ItemId) -> Result<Vec<Product>, Error> {
        let id = category.to_string();
        self.get_segments(&["categories", &id, "products"]).await
    }

    /// Product listing capped at `limit` (`GET /products?limit=N`).
    pub async fn products(&self, limit: u32) -> Result<Vec<Product>, Error> {
        self.get("products", &[("limit", limit.to_string())]).await
    }

    /// A single product (`GET /products/{id}`).
    pub async fn product(&self, id: &ItemId) -> Result<Product, Error> {
        let id = id.to_string();
        self.get_segments(&["products", &id]).await
    }
}
