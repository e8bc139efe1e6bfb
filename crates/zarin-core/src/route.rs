// ── Route table ──
//
// Maps URL-style paths to screens and back. Parsing is total: anything
// unrecognised becomes `Route::NotFound` carrying the original path.

use std::fmt;
use std::str::FromStr;

use strum::IntoStaticStr;
use url::form_urlencoded;
use zarin_api::ItemId;

/// A location in the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    /// `/`
    #[default]
    Home,
    /// `/category/:id`
    Category { id: ItemId },
    /// `/product/:id`
    Product { id: ItemId },
    /// `/cart`
    Cart,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/admin` and everything below it. The sub-path is kept verbatim.
    Admin { section: Option<String> },
    /// `/search?q=…`
    Search { query: String },
    /// Any path the table does not know.
    NotFound { path: String },
}

impl Route {
    /// Parse a path such as `/category/11/` or `/search?q=gold%20ring`.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (input, None),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["category", id] => Self::Category {
                id: ItemId::from(*id),
            },
            ["product", id] => Self::Product {
                id: ItemId::from(*id),
            },
            ["cart"] => Self::Cart,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["admin"] => Self::Admin { section: None },
            ["admin", rest @ ..] => Self::Admin {
                section: Some(rest.join("/")),
            },
            ["search"] => Self::Search {
                query: query.and_then(search_term).unwrap_or_default(),
            },
            _ => Self::NotFound {
                path: input.to_owned(),
            },
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Category { id } => format!("/category/{id}"),
            Self::Product { id } => format!("/product/{id}"),
            Self::Cart => "/cart".into(),
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Admin { section: None } => "/admin".into(),
            Self::Admin {
                section: Some(section),
            } => format!("/admin/{section}"),
            Self::Search { query } => {
                let encoded: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", query)
                    .finish();
                format!("/search?{encoded}")
            }
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

fn search_term(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "q")
        .map(|(_, v)| v.into_owned())
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
