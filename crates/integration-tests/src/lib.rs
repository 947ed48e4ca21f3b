//! Integration tests for Maa's Pickles.
//!
//! The storefront router is driven in-process with `tower::ServiceExt`, so
//! most tests need no server and no database. Tests that do need
//! `PostgreSQL` are `#[ignore]`d and read `TEST_DATABASE_URL`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p maas-pickles-integration-tests
//!
//! # Including the database-backed tests
//! TEST_DATABASE_URL=postgres://localhost/maas_pickles_test \
//!     cargo test -p maas-pickles-integration-tests -- --include-ignored
//! ```

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use secrecy::SecretString;
use sqlx::PgPool;
use tower::ServiceExt;

use maas_pickles_storefront::config::{DEFAULT_HANDOFF_DESTINATION, StorefrontConfig};
use maas_pickles_storefront::db::create_lazy_pool;
use maas_pickles_storefront::routes;
use maas_pickles_storefront::state::AppState;

/// URL used when a test never touches the database.
const UNUSED_DATABASE_URL: &str = "postgres://localhost:5432/maas_pickles_unused";

/// Desktop browser user agent.
pub const DESKTOP_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Android phone user agent.
pub const MOBILE_UA: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Mobile Safari/537.36";

fn test_config(database_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from(database_url.to_string()),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        handoff_destination: DEFAULT_HANDOFF_DESTINATION.to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A response with its body read into a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// A response header as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// The storefront app plus one browser's session cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
    user_agent: &'static str,
}

impl TestApp {
    /// App whose pool never connects. Enough for catalog, cart, and checkout.
    ///
    /// # Panics
    ///
    /// Panics if the pool URL cannot be parsed.
    #[must_use]
    pub fn new() -> Self {
        let config = test_config(UNUSED_DATABASE_URL);
        let pool = create_lazy_pool(&config.database_url).expect("lazy pool");
        Self::from_parts(config, pool)
    }

    /// App backed by `TEST_DATABASE_URL`, with migrations applied.
    ///
    /// Returns `None` when the variable is unset.
    ///
    /// # Panics
    ///
    /// Panics if the database is unreachable or a migration fails.
    pub async fn with_database() -> Option<Self> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let config = test_config(&url);
        let pool = PgPool::connect(&url).await.expect("connect to test database");
        sqlx::migrate!("../storefront/migrations")
            .run(&pool)
            .await
            .expect("run migrations");
        Some(Self::from_parts(config, pool))
    }

    fn from_parts(config: StorefrontConfig, pool: PgPool) -> Self {
        Self {
            router: routes::app(AppState::new(config, pool)),
            cookie: None,
            user_agent: DESKTOP_UA,
        }
    }

    /// Browse as a phone from now on.
    #[must_use]
    pub const fn on_mobile(mut self) -> Self {
        self.user_agent = MOBILE_UA;
        self
    }

    /// GET a page.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(path, "GET", None, false).await
    }

    /// POST a form as a plain browser submission.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(path, "POST", Some(encode(fields)), false).await
    }

    /// POST a form the way the cart script does, asking for a fragment.
    pub async fn post_fragment(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(path, "POST", Some(encode(fields)), true).await
    }

    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    async fn send(
        &mut self,
        path: &str,
        method: &str,
        form: Option<String>,
        fragment: bool,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::USER_AGENT, self.user_agent)
            .header("x-real-ip", "203.0.113.7");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if fragment {
            builder = builder.header("hx-request", "true");
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form)
            }
            None => Body::empty(),
        };

        let request = builder.body(body).expect("build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}
