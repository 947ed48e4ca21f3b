//! Catalog pages, health checks, and security headers.

use axum::http::StatusCode;
use maas_pickles_integration_tests::TestApp;

#[tokio::test]
async fn health_is_ok() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn home_lists_featured_pickles_and_categories() {
    let mut app = TestApp::new();
    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Aam Ka Achar"));
    assert!(response.body.contains("/menu?category=non-veg"));
    assert!(response.body.contains("id=\"cart-panel\""));
}

#[tokio::test]
async fn menu_filters_by_category() {
    let mut app = TestApp::new();
    let response = app.get("/menu?category=non-veg").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Murgh Ka Achar"));
    assert!(!response.body.contains("Nimbu Ka Achar"));
}

#[tokio::test]
async fn unknown_category_shows_everything() {
    let mut app = TestApp::new();
    let response = app.get("/menu?category=pickled-onions").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Murgh Ka Achar"));
    assert!(response.body.contains("Nimbu Ka Achar"));
}

#[tokio::test]
async fn product_page_has_add_form() {
    let mut app = TestApp::new();
    let response = app.get("/menu/lime-pickle").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Nimbu Ka Achar"));
    assert!(response.body.contains("action=\"/cart/add\""));
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let mut app = TestApp::new();
    let response = app.get("/menu/pineapple-pickle").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_path_renders_not_found_page() {
    let mut app = TestApp::new();
    let response = app.get("/no/such/page").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("404"));
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let mut app = TestApp::new();
    let response = app.get("/").await;

    let csp = response
        .header("content-security-policy")
        .unwrap_or_default();
    assert!(csp.contains("script-src 'self' 'nonce-"));
    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn account_pages_require_sign_in() {
    let mut app = TestApp::new();

    let response = app.get("/account").await;
    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some("/auth/login"));

    let response = app.get("/orders").await;
    assert_eq!(response.location(), Some("/auth/login"));
}

#[tokio::test]
async fn login_page_renders() {
    let mut app = TestApp::new();
    let response = app.get("/auth/login").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("action=\"/auth/login\""));
}

#[tokio::test]
async fn contact_enquiry_redirects_to_whatsapp() {
    let mut app = TestApp::new();

    let page = app.get("/contact").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("+91 90595 82419"));

    let response = app
        .post_form(
            "/contact",
            &[
                ("name", "Sita"),
                ("phone", "9000000000"),
                ("message", "20 jars for a wedding"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(
        response
            .location()
            .is_some_and(|url| url.starts_with("https://web.whatsapp.com/send?phone=919059582419&text="))
    );
}

#[tokio::test]
async fn enquiry_keeps_pending_notifications() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", &[("id", "lime-pickle"), ("return_to", "/contact")])
        .await;

    let response = app
        .post_form(
            "/contact",
            &[("name", "Sita"), ("phone", "9000000000"), ("message", "10 jars")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let page = app.get("/menu").await;
    assert!(page.body.contains("Added to cart"));
}

#[tokio::test]
async fn incomplete_enquiry_is_rejected() {
    let mut app = TestApp::new();
    let response = app
        .post_form("/contact", &[("name", "Sita"), ("phone", ""), ("message", "hi")])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("value=\"Sita\""));
}
