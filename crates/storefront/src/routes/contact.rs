//! Contact page and bulk-order enquiries.
//!
//! Enquiries go to the shop the same way orders do: the form is turned into a
//! WhatsApp message and the browser is redirected to the chat.

use std::fmt::Write as _;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use maas_pickles_core::{ClientPlatform, build_handoff_url};

use super::layout::Layout;
use crate::state::AppState;

/// Enquiry form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: ContactForm,
    pub error: Option<String>,
    /// The shop's number as configured, for display.
    pub shop_phone: String,
}

/// Render an enquiry as a WhatsApp message.
fn compose_enquiry(form: &ContactForm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📦 *Bulk Order Enquiry - Maa's Pickles*");
    let _ = writeln!(out);
    let _ = writeln!(out, "Name: {}", form.name.trim());
    let _ = writeln!(out, "Phone: {}", form.phone.trim());
    let _ = writeln!(out);
    out.push_str(form.message.trim());
    out
}

/// Display the contact page.
pub async fn show(State(state): State<AppState>, layout: Layout) -> impl IntoResponse {
    ContactTemplate {
        layout,
        form: ContactForm::default(),
        error: None,
        shop_phone: state.config().handoff_destination.clone(),
    }
}

/// Send an enquiry to the shop on WhatsApp.
///
/// Name, phone, and message are all required.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    layout: Layout,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Response {
    if [&form.name, &form.phone, &form.message]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return (
            StatusCode::BAD_REQUEST,
            ContactTemplate {
                layout,
                form,
                error: Some("Please fill in your name, phone, and message.".to_string()),
                shop_phone: state.config().handoff_destination.clone(),
            },
        )
            .into_response();
    }

    let platform = ClientPlatform::detect(
        headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok()),
    );
    let url = build_handoff_url(
        &state.config().handoff_destination,
        &compose_enquiry(&form),
        platform,
    );

    tracing::info!(?platform, "Enquiry handed off to WhatsApp");
    layout.keep_notifications(&session).await;
    Redirect::to(&url).into_response()
}
