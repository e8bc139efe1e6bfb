// Cart endpoints.

use crate::client::ShopClient;
use crate::error::Error;
use crate::models::{AddToCart, CartContents, CartCount, ItemId};

impl ShopClient {
    /// Contents of the session's cart (`GET /cart`).
    pub async fn cart(&self) -> Result<CartContents, Error> {
        self.get("cart", &[]).await
    }

    /// Number of items in the cart, for the header badge (`GET /cart/count`).
    pub async fn cart_count(&self) -> Result<u32, Error> {
        let count: CartCount = self.get("cart/count", &[]).await?;
        Ok(count.count)
    }

    /// Add `qty` units of a product (`POST /cart/add`).
    ///
    /// The response body is ignored.
    pub async fn add_to_cart(&self, product_id: &ItemId, qty: u32) -> Result<(), Error> {
        let body = AddToCart {
            product_id: product_id.clone(),
            qty,
        };
        self.post_empty("cart/add", Some(&body)).await
    }
}
