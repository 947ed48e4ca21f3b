//! WhatsApp checkout handoff.

use axum::http::StatusCode;
use maas_pickles_integration_tests::TestApp;

const DETAILS: [(&str, &str); 4] = [
    ("name", "Ravi Kumar"),
    ("phone", "+91 98765 43210"),
    ("address", "12 MG Road, Guntur"),
    ("notes", "Less oil please"),
];

#[tokio::test]
async fn empty_cart_checkout_goes_to_menu() {
    let mut app = TestApp::new();

    let response = app.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/menu"));

    let menu = app.get("/menu").await;
    assert!(menu.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn empty_cart_submit_goes_to_menu() {
    let mut app = TestApp::new();
    let response = app.post_form("/checkout", &DETAILS).await;
    assert_eq!(response.location(), Some("/menu"));
}

#[tokio::test]
async fn preview_shows_the_composed_message() {
    let mut app = TestApp::new();
    app.post_fragment("/cart/add", &[("id", "lime-pickle"), ("quantity", "2")])
        .await;

    let page = app
        .get("/checkout?name=Ravi&phone=9000000000&address=Guntur&notes=Extra+spicy")
        .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Name: Ravi"));
    assert!(page.body.contains("Nimbu Ka Achar (250g) × 2 = ₹398"));
    assert!(page.body.contains("*Total: ₹398*"));
    assert!(page.body.contains("Extra spicy"));
}

#[tokio::test]
async fn sent_page_reports_copy_and_popup_failures() {
    let mut app = TestApp::new();
    app.post_fragment("/cart/add", &[("id", "lime-pickle")]).await;
    app.post_form("/checkout", &DETAILS).await;

    let sent = app.get("/checkout/sent").await;
    assert_eq!(sent.status, StatusCode::OK);
    assert!(sent.body.contains(r#"<div id="copy-failed" class="toast toast-error" hidden>"#));
    assert!(sent.body.contains("Couldn't copy"));
    assert!(sent.body.contains(r#"<div id="popup-blocked" class="toast toast-error" hidden>"#));
    assert!(sent.body.contains("show('copy-failed')"));
    assert!(sent.body.contains("show('popup-blocked')"));
}

#[tokio::test]
async fn submit_hands_off_and_clears_the_cart() {
    let mut app = TestApp::new();
    app.post_fragment("/cart/add", &[("id", "lime-pickle"), ("quantity", "2")])
        .await;
    app.post_fragment("/cart/add", &[("id", "chicken-pickle")]).await;

    let response = app.post_form("/checkout", &DETAILS).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/checkout/sent"));

    let sent = app.get("/checkout/sent").await;
    assert_eq!(sent.status, StatusCode::OK);
    assert!(sent.body.contains("https://web.whatsapp.com/send?phone=919059582419"));
    assert!(sent.body.contains("Ravi Kumar"));
    assert!(sent.body.contains("*Total: ₹747*"));
    // The browser reports the copy; nothing is announced before it runs.
    assert!(!sent.body.contains(r#"<div class="toasts" role="status">"#));
    assert!(sent.body.contains(r#"<div id="copy-ok" class="toast toast-success" hidden>"#));

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">0</span>"));

    // The confirmation is shown once.
    let again = app.get("/checkout/sent").await;
    assert_eq!(again.location(), Some("/menu"));
}

#[tokio::test]
async fn mobile_browsers_get_the_app_link() {
    let mut app = TestApp::new().on_mobile();
    app.post_fragment("/cart/add", &[("id", "mango-pickle")]).await;

    app.post_form("/checkout", &DETAILS).await;
    let sent = app.get("/checkout/sent").await;

    assert!(sent.body.contains("https://wa.me/919059582419?text="));
}

#[tokio::test]
async fn sent_page_without_handoff_redirects() {
    let mut app = TestApp::new();
    let response = app.get("/checkout/sent").await;
    assert_eq!(response.location(), Some("/menu"));
}
