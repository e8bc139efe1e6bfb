#![allow(clippy::unwrap_used)]
// Storefront startup and route mounting against a mock storefront API.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zarin_core::{ActiveView, Credentials, Loadable, Route, StoreConfig, Storefront};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Storefront) {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let store = Storefront::new(StoreConfig::new(base)).unwrap();
    (server, store)
}

async fn mount_startup(server: &MockServer, me_status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(me_status).set_body_json(json!({
            "id": 5, "name": "Sara", "email": "sara@example.com", "is_admin": false
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Rings", "children": [{ "id": 11, "name": "Wedding" }] }
        ])))
        .mount(server)
        .await;
}

// ── Startup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_loads_session_navigation_and_badge() {
    let (server, store) = setup().await;
    mount_startup(&server, 401).await;
    Mock::given(method("GET"))
        .and(path("/api/cart/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 2 })))
        .mount(&server)
        .await;

    store.start().await;

    let mut session = store.session().subscribe();
    session.wait_for(|s| !s.loading).await.unwrap();
    assert!(!store.session().is_logged_in());

    let mut nav = store.navigation();
    let tree = nav.wait_for(|n| !n.is_loading()).await.unwrap().clone();
    assert_eq!(tree.items()[0].children[0].name, "Wedding");

    let mut badge = store.cart_badge();
    assert_eq!(*badge.wait_for(Option::is_some).await.unwrap(), Some(2));

    store.shutdown().await;
}

#[tokio::test]
async fn test_navigation_failure_is_errored() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/navigation"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    store.start().await;

    let mut nav = store.navigation();
    let state = nav.wait_for(|n| !n.is_loading()).await.unwrap().clone();
    assert_eq!(state, Loadable::Errored);
    store.shutdown().await;
}

#[tokio::test]
async fn test_badge_refreshes_when_identity_changes() {
    let (server, store) = setup().await;
    mount_startup(&server, 401).await;
    Mock::given(method("GET"))
        .and(path("/api/cart/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 4 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 5, "name": "Sara", "email": "sara@example.com" }
        })))
        .mount(&server)
        .await;

    store.start().await;
    let mut badge = store.cart_badge();
    assert_eq!(*badge.wait_for(|c| *c == Some(0)).await.unwrap(), Some(0));
    let mut session = store.session().subscribe();
    session.wait_for(|s| !s.loading).await.unwrap();

    store
        .session()
        .login(&Credentials::new("sara@example.com", "pw"))
        .await
        .unwrap();

    let seen = tokio::time::timeout(Duration::from_secs(5), badge.wait_for(|c| *c == Some(4)))
        .await
        .unwrap()
        .unwrap()
        .to_owned();
    assert_eq!(seen, Some(4));
    store.shutdown().await;
}

#[tokio::test]
async fn test_logout_clears_user_and_badge_follows() {
    let (server, store) = setup().await;
    mount_startup(&server, 200).await;
    Mock::given(method("GET"))
        .and(path("/api/cart/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 3 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store.start().await;
    let mut session = store.session().subscribe();
    session.wait_for(|s| !s.loading).await.unwrap();
    assert!(store.session().is_logged_in());
    let mut badge = store.cart_badge();
    assert_eq!(*badge.wait_for(|c| *c == Some(3)).await.unwrap(), Some(3));

    store.logout().await;
    assert!(!store.session().is_logged_in());

    let seen = tokio::time::timeout(Duration::from_secs(5), badge.wait_for(|c| *c == Some(0)))
        .await
        .unwrap()
        .unwrap()
        .to_owned();
    assert_eq!(seen, Some(0));
    store.shutdown().await;
}

// ── Mounting ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mount_picks_view_per_route() {
    let (_server, store) = setup().await;

    assert!(matches!(store.mount(&Route::Login), ActiveView::Login(_)));
    assert!(matches!(store.mount(&Route::Register), ActiveView::Register(_)));
    assert!(matches!(
        store.mount(&Route::parse("/nowhere")),
        ActiveView::NotFound(p) if p == "/nowhere"
    ));
    // No session: admin is denied up front.
    let ActiveView::Admin(admin) = store.mount(&Route::parse("/admin")) else {
        panic!("expected admin view");
    };
    assert!(admin.is_denied());
}

#[tokio::test]
async fn test_update_same_category_issues_no_request() {
    let (server, store) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/11/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let route = Route::parse("/category/11");
    let mut view = store.mount(&route);
    store.update(&mut view, &Route::parse("/category/11/"));

    let ActiveView::Category(category) = &view else {
        panic!("expected category view");
    };
    let mut rx = category.subscribe();
    rx.wait_for(|s| !s.is_loading()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
}
