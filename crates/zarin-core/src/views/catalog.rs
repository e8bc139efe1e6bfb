// Catalog views: home listing, category listing, product detail, search.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use zarin_api::{ItemId, Product, ShopClient};

use crate::error::CoreError;
use crate::view::{Fetch, Loadable};

// ── Home ─────────────────────────────────────────────────────────────

/// Landing page: the first `limit` products.
pub struct HomeView {
    products: Fetch<Vec<Product>>,
}

impl HomeView {
    pub fn mount(client: Arc<ShopClient>, limit: u32) -> Self {
        let mut products = Fetch::new("home");
        products.start(async move { client.products(limit).await });
        Self { products }
    }

    pub fn products(&self) -> Loadable<Vec<Product>> {
        self.products.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Loadable<Vec<Product>>> {
        self.products.subscribe()
    }
}

// ── Category ─────────────────────────────────────────────────────────

/// Products of one category. Re-fetches only when the id changes.
pub struct CategoryView {
    client: Arc<ShopClient>,
    category: Option<ItemId>,
    products: Fetch<Vec<Product>>,
}

impl CategoryView {
    pub fn mount(client: Arc<ShopClient>, id: ItemId) -> Self {
        let mut view = Self {
            client,
            category: None,
            products: Fetch::new("category"),
        };
        view.set_category(id);
        view
    }

    /// Point the view at another category. Returns `false` (and issues no
    /// request) when `id` is already the current one.
    pub fn set_category(&mut self, id: ItemId) -> bool {
        if self.category.as_ref() == Some(&id) {
            return false;
        }
        debug!(category = %id, "loading category");
        let client = Arc::clone(&self.client);
        let request_id = id.clone();
        self.products
            .start(async move { client.category_products(&request_id).await });
        self.category = Some(id);
        true
    }

    pub fn category(&self) -> Option<&ItemId> {
        self.category.as_ref()
    }

    pub fn products(&self) -> Loadable<Vec<Product>> {
        self.products.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Loadable<Vec<Product>>> {
        self.products.subscribe()
    }
}

// ── Product ──────────────────────────────────────────────────────────

/// Product detail with an add-to-cart action.
pub struct ProductView {
    client: Arc<ShopClient>,
    id: ItemId,
    product: Fetch<Product>,
    adding: Arc<watch::Sender<bool>>,
}

impl ProductView {
    pub fn mount(client: Arc<ShopClient>, id: ItemId) -> Self {
        let mut product = Fetch::new("product");
        let request_client = Arc::clone(&client);
        let request_id = id.clone();
        product.start(async move { request_client.product(&request_id).await });

        let (adding, _) = watch::channel(false);
        Self {
            client,
            id,
            product,
            adding: Arc::new(adding),
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn product(&self) -> Loadable<Product> {
        self.product.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Loadable<Product>> {
        self.product.subscribe()
    }

    /// `true` while an add-to-cart request is in flight.
    pub fn is_adding(&self) -> bool {
        *self.adding.borrow()
    }

    pub fn subscribe_adding(&self) -> watch::Receiver<bool> {
        self.adding.subscribe()
    }

    /// Add `qty` of this product to the cart.
    ///
    /// The in-flight flag is claimed synchronously: while a previous call
    /// is still running this returns [`CoreError::Busy`] without sending
    /// anything. The flag clears when the returned future completes or is
    /// dropped. The cart badge is not refreshed.
    pub fn add_to_cart(
        &self,
        qty: u32,
    ) -> impl Future<Output = Result<(), CoreError>> + Send + use<> {
        let guard = InFlight::claim(&self.adding);
        let client = Arc::clone(&self.client);
        let id = self.id.clone();

        async move {
            let Some(_guard) = guard else {
                return Err(CoreError::Busy {
                    operation: "add to cart",
                });
            };
            client.add_to_cart(&id, qty).await?;
            info!(product = %id, qty, "added to cart");
            Ok(())
        }
    }
}

/// Holds an in-flight flag high until dropped.
pub(crate) struct InFlight {
    flag: Arc<watch::Sender<bool>>,
}

impl InFlight {
    /// Set the flag, or return `None` if it is already set.
    pub(crate) fn claim(flag: &Arc<watch::Sender<bool>>) -> Option<Self> {
        let claimed = flag.send_if_modified(|busy| {
            if *busy {
                return false;
            }
            *busy = true;
            true
        });
        claimed.then(|| Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

// ── Search ───────────────────────────────────────────────────────────

/// Catalog page filtered by title, case-insensitively.
pub struct SearchView {
    query: String,
    results: Fetch<Vec<Product>>,
}

impl SearchView {
    pub fn mount(client: Arc<ShopClient>, query: String, limit: u32) -> Self {
        let mut results = Fetch::new("search");
        let needle = query.trim().to_lowercase();
        results.start(async move {
            let products = client.products(limit).await?;
            Ok::<_, zarin_api::Error>(filter_by_title(products, &needle))
        });
        Self { query, results }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> Loadable<Vec<Product>> {
        self.results.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Loadable<Vec<Product>>> {
        self.results.subscribe()
    }
}

fn filter_by_title(products: Vec<Product>, needle: &str) -> Vec<Product> {
    if needle.is_empty() {
        return products;
    }
    products
        .into_iter()
        .filter(|p| p.title.to_lowercase().contains(needle))
        .collect()
}
