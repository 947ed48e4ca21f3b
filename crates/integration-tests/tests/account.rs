//! Registration, profile, and order history against a real database.
//!
//! Run with `TEST_DATABASE_URL` set and `--include-ignored`.

use axum::http::StatusCode;
use maas_pickles_integration_tests::TestApp;
use uuid::Uuid;

fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn register_edit_profile_and_prefill_checkout() {
    let Some(mut app) = TestApp::with_database().await else {
        return;
    };
    let email = unique_email();

    let response = app
        .post_form(
            "/auth/register",
            &[
                ("email", email.as_str()),
                ("password", "mango-season"),
                ("password_confirm", "mango-season"),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/account"));

    let account = app.get("/account").await;
    assert_eq!(account.status, StatusCode::OK);
    assert!(account.body.contains(&email));
    assert!(account.body.contains("Account created"));

    let response = app
        .post_form(
            "/account",
            &[
                ("display_name", "Lakshmi"),
                ("phone", "+91 90000 11111"),
                ("address", "4 Temple Street, Tenali"),
            ],
        )
        .await;
    assert_eq!(response.location(), Some("/account"));

    let account = app.get("/account").await;
    assert!(account.body.contains("Profile updated"));
    assert!(account.body.contains("value=\"Lakshmi\""));

    app.post_fragment("/cart/add", &[("id", "garlic-pickle")]).await;
    let checkout = app.get("/checkout").await;
    assert!(checkout.body.contains("value=\"Lakshmi\""));
    assert!(checkout.body.contains("4 Temple Street, Tenali"));

    let orders = app.get("/orders").await;
    assert_eq!(orders.status, StatusCode::OK);
    assert!(orders.body.contains("No orders yet"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn sign_out_keeps_the_cart_and_login_checks_password() {
    let Some(mut app) = TestApp::with_database().await else {
        return;
    };
    let email = unique_email();

    app.post_form(
        "/auth/register",
        &[
            ("email", email.as_str()),
            ("password", "lime-and-salt"),
            ("password_confirm", "lime-and-salt"),
        ],
    )
    .await;
    app.post_fragment("/cart/add", &[("id", "lime-pickle")]).await;

    let response = app.post_form("/auth/logout", &[]).await;
    assert_eq!(response.location(), Some("/"));
    assert!(app.get("/cart/count").await.body.contains(">1</span>"));
    assert_eq!(app.get("/account").await.location(), Some("/auth/login"));

    let response = app
        .post_form("/auth/login", &[("email", email.as_str()), ("password", "wrong-password")])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post_form("/auth/login", &[("email", email.as_str()), ("password", "lime-and-salt")])
        .await;
    assert_eq!(response.location(), Some("/account"));
    assert!(app.get("/cart/count").await.body.contains(">1</span>"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (TEST_DATABASE_URL)"]
async fn duplicate_registration_conflicts() {
    let Some(mut app) = TestApp::with_database().await else {
        return;
    };
    let email = unique_email();
    let form = [
        ("email", email.as_str()),
        ("password", "chili-crunch"),
        ("password_confirm", "chili-crunch"),
    ];

    app.post_form("/auth/register", &form).await;
    app.post_form("/auth/logout", &[]).await;

    let response = app.post_form("/auth/register", &form).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}
