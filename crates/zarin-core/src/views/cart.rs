// Cart view.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use zarin_api::{CartContents, ShopClient};

use crate::view::{Fetch, Loadable};

/// Contents of the session's cart as returned by the server.
pub struct CartView {
    cart: Fetch<CartContents>,
}

impl CartView {
    pub fn mount(client: Arc<ShopClient>) -> Self {
        let mut cart = Fetch::new("cart");
        cart.start(async move { client.cart().await });
        Self { cart }
    }

    pub fn cart(&self) -> Loadable<CartContents> {
        self.cart.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Loadable<CartContents>> {
        self.cart.subscribe()
    }
}

/// Sum of line totals, or `None` when any line has no price.
pub fn cart_total(cart: &CartContents) -> Option<Decimal> {
    cart.items
        .iter()
        .map(zarin_api::CartItem::total)
        .try_fold(Decimal::ZERO, |acc, line| line.map(|l| acc + l))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn total_sums_lines() {
        let cart: CartContents = serde_json::from_value(json!({
            "items": [
                { "id": 1, "product": { "id": 1, "title": "a", "price": 100 }, "qty": 2 },
                { "id": 2, "product": { "id": 2, "title": "b" }, "qty": 1, "line_total": 50 }
            ]
        }))
        .unwrap();
        assert_eq!(cart_total(&cart), Some(Decimal::from(250)));
    }

    #[test]
    fn total_unknown_when_a_line_is_unpriced() {
        let cart: CartContents = serde_json::from_value(json!({
            "items": [{ "id": 1, "product": { "id": 1, "title": "a" }, "qty": 1 }]
        }))
        .unwrap();
        assert_eq!(cart_total(&cart), None);
    }
}
