// Wire types for the storefront API.
//
// Plain records with no behaviour beyond display helpers. Field aliases
// accept the camelCase spellings some API deployments emit.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ── ItemId ──────────────────────────────────────────────────────────

/// Identifier of any storefront entity.
///
/// The API emits numeric ids, but some endpoints return them as strings.
/// Both forms round-trip verbatim into URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(u64),
    Text(String),
}

impl ItemId {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        s.parse::<u64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Numeric)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        match s.parse::<u64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Text(s),
        }
    }
}

// ── User ────────────────────────────────────────────────────────────

/// An authenticated storefront account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: ItemId,
    /// Display name.
    #[serde(default, alias = "full_name", alias = "fullName")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "isAdmin")]
    pub is_admin: bool,
}

impl User {
    /// Name to show in the UI, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Response of `POST /auth/login` and `POST /auth/register`.
///
/// Only `user` is interpreted; every other field (tokens, messages) is
/// preserved for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Catalog ─────────────────────────────────────────────────────────

/// A catalog category. Navigation categories nest one level of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub children: Vec<Category>,
}

impl Category {
    /// Depth-first walk yielding `(depth, category)` pairs.
    pub fn flatten(&self) -> Vec<(usize, &Category)> {
        let mut out = Vec::new();
        walk(self, 0, &mut out);
        out
    }
}

fn walk<'a>(category: &'a Category, depth: usize, out: &mut Vec<(usize, &'a Category)>) {
    out.push((depth, category));
    for child in &category.children {
        walk(child, depth + 1, out);
    }
}

/// A sellable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ItemId,
    #[serde(alias = "name")]
    pub title: String,
    /// Image reference (URL or storage key).
    #[serde(default, alias = "image_url", alias = "imageUrl")]
    pub image: Option<String>,
    /// Weight in grams.
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

// ── Cart ────────────────────────────────────────────────────────────

/// One line of the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub product: Product,
    #[serde(alias = "quantity")]
    pub qty: u32,
    #[serde(default, alias = "total", alias = "lineTotal")]
    pub line_total: Option<Decimal>,
}

impl CartItem {
    /// Server-computed line total, or unit price × quantity when absent.
    pub fn total(&self) -> Option<Decimal> {
        self.line_total
            .or_else(|| self.product.price.map(|p| p * Decimal::from(self.qty)))
    }
}

/// Body of `GET /cart`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartContents {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Body of `GET /cart/count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCount {
    pub count: u32,
}

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCart {
    pub product_id: ItemId,
    pub qty: u32,
}
