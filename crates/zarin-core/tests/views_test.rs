#![allow(clippy::unwrap_used)]
// Fetch-then-render views against a mock storefront API.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::watch;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zarin_api::{ShopClient, TransportConfig};
use zarin_core::views::{AdminView, AuthForm, AuthKind, CategoryView, HomeView, ProductView};
use zarin_core::{CoreError, ItemId, Loadable, Route, Router, Session, User};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<ShopClient>) {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ShopClient::new(base, &TransportConfig::default()).unwrap();
    (server, Arc::new(client))
}

async fn settled<T: Clone>(mut rx: watch::Receiver<Loadable<T>>) -> Loadable<T> {
    rx.wait_for(|s| !s.is_loading()).await.unwrap().clone()
}

fn products_json(titles: &[&str]) -> serde_json::Value {
    let items: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "id": i + 1, "title": t, "price": 1000 }))
        .collect();
    json!(items)
}

fn user(is_admin: bool) -> User {
    User {
        id: ItemId::from(1),
        name: "Sara".into(),
        email: "sara@example.com".into(),
        is_admin,
    }
}

// ── Home ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_home_fetches_catalog_page() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["Ring", "Coin"])))
        .expect(1)
        .mount(&server)
        .await;

    let view = HomeView::mount(client, 12);
    let state = settled(view.subscribe()).await;

    assert_eq!(state.items().len(), 2);
    assert_eq!(state.items()[0].title, "Ring");
}

#[tokio::test]
async fn test_read_failure_renders_as_empty() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let view = HomeView::mount(client, 12);
    let state = settled(view.subscribe()).await;

    assert_eq!(state, Loadable::Errored);
    assert!(state.items().is_empty());
}

// ── Category ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_category_fetches_once_per_id() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/11/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["Wedding band"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories/12/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["Signet", "Plain"])))
        .expect(1)
        .mount(&server)
        .await;

    let Route::Category { id } = Route::parse("/category/11/") else {
        panic!("expected a category route");
    };
    let mut view = CategoryView::mount(Arc::clone(&client), id);
    assert_eq!(settled(view.subscribe()).await.items().len(), 1);

    assert!(!view.set_category(ItemId::from(11)));
    assert!(view.set_category(ItemId::from(12)));
    assert_eq!(settled(view.subscribe()).await.items().len(), 2);
    assert_eq!(view.category(), Some(&ItemId::from(12)));
}

// ── Product ─────────────────────────────────────────────────────────

async fn mount_product(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/products/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 42, "title": "Bangle", "price": 2_500_000, "weight": 4.2 })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_product_detail_loads() {
    let (server, client) = setup().await;
    mount_product(&server).await;

    let view = ProductView::mount(client, ItemId::from(42));
    assert!(view.product().is_loading());

    let state = settled(view.subscribe()).await;
    assert_eq!(state.loaded().unwrap().title, "Bangle");
}

#[tokio::test]
async fn test_add_to_cart_in_flight_flag_blocks_second_trigger() {
    let (server, client) = setup().await;
    mount_product(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .and(body_json(json!({ "product_id": 42, "qty": 1 })))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let view = ProductView::mount(client, ItemId::from(42));
    assert!(!view.is_adding());

    let first = tokio::spawn(view.add_to_cart(1));
    assert!(view.is_adding());

    let second = view.add_to_cart(1).await;
    assert!(matches!(second, Err(CoreError::Busy { .. })));

    first.await.unwrap().unwrap();
    assert!(!view.is_adding());
}

#[tokio::test]
async fn test_add_to_cart_failure_clears_flag() {
    let (server, client) = setup().await;
    mount_product(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/cart/add"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let view = ProductView::mount(client, ItemId::from(42));
    let result = view.add_to_cart(1).await;

    assert!(result.is_err());
    assert!(!view.is_adding());
}

// ── Admin ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_admin_denied_without_admin_user() {
    let (server, client) = setup().await;

    let anonymous = AdminView::mount(Arc::clone(&client), None, None, 12);
    let customer = AdminView::mount(client, Some(&user(false)), None, 12);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(anonymous.is_denied());
    assert!(customer.is_denied());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_loads_categories_and_products() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "Rings" }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["Ring"])))
        .expect(1)
        .mount(&server)
        .await;

    let view = AdminView::mount(client, Some(&user(true)), Some("products".into()), 12);
    assert!(!view.is_denied());
    assert_eq!(view.section(), Some("products"));

    while view.is_loading() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(view.categories().items()[0].name, "Rings");
    assert_eq!(view.products().items().len(), 1);
}

// ── Auth forms ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_redirects_home() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "sara@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 1, "name": "Sara", "email": "sara@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new(client);
    let router = Router::default();
    router.navigate(Route::Login);

    let mut form = AuthForm::new(AuthKind::Login);
    form.input().push_str("sara@example.com");
    form.focus_next();
    form.input().push_str("pw");

    form.submit(&session, &router).await.unwrap();

    assert_eq!(router.current(), Route::Home);
    assert!(session.is_logged_in());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_login_failure_stays_on_form() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Session::new(client);
    let router = Router::default();
    router.navigate(Route::Login);

    let form = AuthForm::new(AuthKind::Login);
    let result = form.submit(&session, &router).await;

    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
    assert_eq!(router.current(), Route::Login);
    assert!(!session.is_logged_in());
    assert!(!form.is_submitting());
}
