//! Cart store behavior through the HTTP surface.

use axum::http::StatusCode;
use maas_pickles_integration_tests::TestApp;

fn count_badge(count: u64) -> String {
    format!(">{count}</span>")
}

#[tokio::test]
async fn fragment_add_returns_panel_and_trigger() {
    let mut app = TestApp::new();
    let response = app
        .post_fragment("/cart/add", &[("id", "lime-pickle"), ("return_to", "/menu")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains("id=\"cart-panel\""));
    assert!(response.body.contains("Nimbu Ka Achar"));
    assert!(response.body.contains("₹199"));
}

#[tokio::test]
async fn plain_add_redirects_back_with_notification() {
    let mut app = TestApp::new();
    let response = app
        .post_form(
            "/cart/add",
            &[("id", "chili-pickle"), ("quantity", "3"), ("return_to", "/menu")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/menu"));

    let page = app.get("/menu").await;
    assert!(page.body.contains("Added to cart"));
    assert!(page.body.contains(&count_badge(3)));
}

#[tokio::test]
async fn adding_twice_merges_the_line() {
    let mut app = TestApp::new();
    app.post_fragment("/cart/add", &[("id", "mango-pickle")]).await;
    app.post_fragment("/cart/add", &[("id", "mango-pickle"), ("quantity", "2")])
        .await;

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(&count_badge(3)));

    let page = app.get("/cart").await;
    assert_eq!(page.body.matches("class=\"cart-line\"").count(), 1);
    assert!(page.body.contains("₹747"));
}

#[tokio::test]
async fn update_to_zero_removes_the_line() {
    let mut app = TestApp::new();
    app.post_fragment("/cart/add", &[("id", "lime-pickle")]).await;
    app.post_fragment("/cart/add", &[("id", "garlic-pickle")]).await;

    let response = app
        .post_fragment("/cart/update", &[("id", "lime-pickle"), ("quantity", "0")])
        .await;
    assert!(!response.body.contains("Nimbu Ka Achar"));
    assert!(response.body.contains("Lehsun Ka Achar"));

    let response = app
        .post_fragment("/cart/update", &[("id", "garlic-pickle"), ("quantity", "-4")])
        .await;
    assert!(response.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn update_sets_quantity() {
    let mut app = TestApp::new();
    app.post_fragment("/cart/add", &[("id", "chicken-pickle")]).await;
    app.post_fragment("/cart/update", &[("id", "chicken-pickle"), ("quantity", "4")])
        .await;

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(&count_badge(4)));
}

#[tokio::test]
async fn remove_and_clear() {
    let mut app = TestApp::new();
    app.post_fragment("/cart/add", &[("id", "lime-pickle")]).await;
    app.post_fragment("/cart/add", &[("id", "mixed-pickle")]).await;

    let response = app
        .post_fragment("/cart/remove", &[("id", "lime-pickle")])
        .await;
    assert!(!response.body.contains("Nimbu Ka Achar"));

    // Removing something that isn't there is a no-op.
    let response = app
        .post_fragment("/cart/remove", &[("id", "lime-pickle")])
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.post_fragment("/cart/clear", &[]).await;
    assert!(response.body.contains("Your cart is empty"));
    assert!(app.get("/cart/count").await.body.contains(&count_badge(0)));
}

#[tokio::test]
async fn toggle_flips_panel_visibility() {
    let mut app = TestApp::new();

    let response = app.post_fragment("/cart/toggle", &[]).await;
    assert!(response.body.contains("cart-panel is-open"));

    let response = app.post_fragment("/cart/toggle", &[]).await;
    assert!(!response.body.contains("is-open"));

    let response = app.post_fragment("/cart/open", &[]).await;
    assert!(response.body.contains("is-open"));

    let response = app.post_fragment("/cart/close", &[]).await;
    assert!(!response.body.contains("is-open"));
}

#[tokio::test]
async fn cart_page_opens_the_panel() {
    let mut app = TestApp::new();
    let page = app.get("/cart").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("cart-panel is-open"));
}

#[tokio::test]
async fn unknown_product_is_rejected() {
    let mut app = TestApp::new();
    let response = app
        .post_fragment("/cart/add", &[("id", "pineapple-pickle")])
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn zero_quantity_add_is_rejected() {
    let mut app = TestApp::new();
    let response = app
        .post_fragment("/cart/add", &[("id", "lime-pickle"), ("quantity", "0")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn offsite_return_goes_to_cart() {
    let mut app = TestApp::new();
    let response = app
        .post_form(
            "/cart/add",
            &[("id", "lime-pickle"), ("return_to", "https://evil.example/")],
        )
        .await;
    assert_eq!(response.location(), Some("/cart"));
}

#[tokio::test]
async fn header_breaking_return_goes_to_cart() {
    let mut app = TestApp::new();
    let response = app
        .post_form(
            "/cart/add",
            &[("id", "lime-pickle"), ("return_to", "/menu\nX-Evil: 1")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
    assert!(response.header("x-evil").is_none());
}

#[tokio::test]
async fn carts_are_per_session() {
    let mut first = TestApp::new();
    first.post_fragment("/cart/add", &[("id", "lime-pickle")]).await;

    let mut second = TestApp::new();
    assert!(second.get("/cart/count").await.body.contains(&count_badge(0)));
    assert!(first.get("/cart/count").await.body.contains(&count_badge(1)));
}
