// Admin landing page.

use std::sync::Arc;

use tracing::debug;
use zarin_api::{Category, Product, ShopClient, User};

use crate::view::{Fetch, Loadable};

/// Admin overview: categories and a product page.
///
/// Gated on the current user's admin flag at mount time. Without it the
/// view is denied and no request is issued.
pub struct AdminView {
    section: Option<String>,
    access: Access,
}

enum Access {
    Denied,
    Granted {
        categories: Fetch<Vec<Category>>,
        products: Fetch<Vec<Product>>,
    },
}

impl AdminView {
    pub fn mount(
        client: Arc<ShopClient>,
        user: Option<&User>,
        section: Option<String>,
        limit: u32,
    ) -> Self {
        if !user.is_some_and(|u| u.is_admin) {
            debug!("admin view denied");
            return Self {
                section,
                access: Access::Denied,
            };
        }

        let mut categories = Fetch::new("admin_categories");
        let mut products = Fetch::new("admin_products");
        let c = Arc::clone(&client);
        categories.start(async move { c.categories().await });
        products.start(async move { client.products(limit).await });

        Self {
            section,
            access: Access::Granted {
                categories,
                products,
            },
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self.access, Access::Denied)
    }

    /// Sub-path below `/admin`, if any.
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn categories(&self) -> Loadable<Vec<Category>> {
        match &self.access {
            Access::Granted { categories, .. } => categories.snapshot(),
            Access::Denied => Loadable::Errored,
        }
    }

    pub fn products(&self) -> Loadable<Vec<Product>> {
        match &self.access {
            Access::Granted { products, .. } => products.snapshot(),
            Access::Denied => Loadable::Errored,
        }
    }

    /// Whether any admin request is still outstanding.
    pub fn is_loading(&self) -> bool {
        match &self.access {
            Access::Granted {
                categories,
                products,
            } => categories.is_loading() || products.is_loading(),
            Access::Denied => false,
        }
    }
}
