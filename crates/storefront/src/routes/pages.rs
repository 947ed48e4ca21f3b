//! Not-found page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use super::layout::Layout;

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

/// The not-found page with a 404 status.
pub fn not_found_page(layout: Layout) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate { layout })
}

/// Router fallback for unknown paths.
pub async fn not_found(uri: Uri, layout: Layout) -> impl IntoResponse {
    tracing::warn!(path = %uri.path(), "Route not found");
    not_found_page(layout)
}
