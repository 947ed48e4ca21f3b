//! Checkout route handlers.
//!
//! `GET /checkout` shows the details form with a preview of the exact message
//! that will be sent. `POST /checkout` runs the handoff and redirects to
//! `/checkout/sent`, which opens WhatsApp and shows the message for copying.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header::USER_AGENT},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use maas_pickles_core::{ClientPlatform, OrderDraft, compose_order_message};

use super::layout::Layout;
use crate::db::ProfileRepository;
use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::models::ProfileUpdate;
use crate::services::cart::SessionCart;
use crate::services::checkout::{
    Checkout, CheckoutError, SessionClipboard, SessionLauncher, SessionNotifier, take_handoff,
};
use crate::services::notifications::{self, Notification};
use crate::state::AppState;

/// Checkout form data. Every field may be missing on the first render.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

impl DraftForm {
    fn is_blank(&self) -> bool {
        [&self.name, &self.phone, &self.address, &self.email, &self.notes]
            .iter()
            .all(|field| field.trim().is_empty())
    }
}

impl From<&DraftForm> for OrderDraft {
    fn from(form: &DraftForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
            email: ProfileUpdate::normalized(&form.email).map(String::from),
            notes: ProfileUpdate::normalized(&form.notes).map(String::from),
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub form: DraftForm,
    pub preview: String,
}

/// Handoff confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/sent.html")]
pub struct SentTemplate {
    pub layout: Layout,
    pub message: String,
    pub handoff_url: String,
}

async fn redirect_empty_cart(session: &Session) -> Response {
    notifications::push_or_log(
        session,
        Notification::info("Your cart is empty", "Add a jar or two before checking out."),
    )
    .await;
    Redirect::to("/menu").into_response()
}

/// Prefill blank name, phone, address, and email from the saved profile.
async fn prefill_from_profile(state: &AppState, auth: &OptionalAuth, form: &mut DraftForm) {
    let OptionalAuth(Some(user)) = auth else {
        return;
    };

    match ProfileRepository::new(state.pool()).get(user.id).await {
        Ok(Some(profile)) => {
            let fill = |field: &mut String, value: Option<String>| {
                if field.trim().is_empty()
                    && let Some(value) = value
                {
                    *field = value;
                }
            };
            fill(&mut form.name, profile.display_name);
            fill(&mut form.phone, profile.phone);
            fill(&mut form.address, profile.address);
            fill(&mut form.email, profile.email.or_else(|| Some(user.email.to_string())));
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load profile for checkout prefill"),
    }
}

/// Display the checkout form and message preview.
///
/// Submitting the form with GET ("Preview") re-renders with the entered
/// details; an empty cart goes back to the menu.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    layout: Layout,
    Query(mut form): Query<DraftForm>,
) -> Result<Response> {
    let cart = SessionCart::load(&session).await?;
    if cart.cart().is_empty() {
        layout.keep_notifications(&session).await;
        return Ok(redirect_empty_cart(&session).await);
    }

    if form.is_blank() {
        prefill_from_profile(&state, &auth, &mut form).await;
    }

    let preview = compose_order_message(cart.cart(), &OrderDraft::from(&form));

    Ok(CheckoutTemplate {
        layout,
        form,
        preview,
    }
    .into_response())
}

/// Submit the order: compose, copy, hand off to WhatsApp, clear the cart.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<DraftForm>,
) -> Result<Response> {
    let platform = ClientPlatform::detect(
        headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok()),
    );

    let mut cart = SessionCart::load(&session).await?;
    let checkout = Checkout::new(
        &state.config().handoff_destination,
        SessionClipboard(session.clone()),
        SessionLauncher(session.clone()),
        SessionNotifier(session.clone()),
    );

    let outcome = match checkout
        .submit(cart.cart_mut(), &OrderDraft::from(&form), platform)
        .await
    {
        Ok(outcome) => outcome,
        Err(CheckoutError::EmptyCart) => return Ok(redirect_empty_cart(&session).await),
        Err(e) => return Err(e.into()),
    };
    cart.save().await?;

    // The copy must land in the session before the response is written.
    if let Err(e) = outcome.clipboard_report.await {
        tracing::error!(error = %e, "Clipboard report task failed");
    }

    Ok(Redirect::to("/checkout/sent").into_response())
}

/// Confirmation page: opens the WhatsApp link and shows the message.
///
/// The handoff is taken from the session, so a reload goes to the menu.
#[instrument(skip_all)]
pub async fn sent(session: Session, layout: Layout) -> Result<Response> {
    let Some(handoff) = take_handoff(&session).await? else {
        layout.keep_notifications(&session).await;
        return Ok(Redirect::to("/menu").into_response());
    };

    Ok(SentTemplate {
        layout,
        message: handoff.message,
        handoff_url: handoff.url,
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_from_form_drops_blank_optionals() {
        let form = DraftForm {
            name: "  Ravi ".to_string(),
            phone: "9000000000".to_string(),
            address: "Vijayawada".to_string(),
            email: "   ".to_string(),
            notes: "less oil".to_string(),
        };
        let draft = OrderDraft::from(&form);
        assert_eq!(draft.name, "Ravi");
        assert_eq!(draft.email, None);
        assert_eq!(draft.notes.as_deref(), Some("less oil"));
    }

    #[test]
    fn test_blank_form() {
        assert!(DraftForm::default().is_blank());
        let form = DraftForm {
            notes: "x".to_string(),
            ..DraftForm::default()
        };
        assert!(!form.is_blank());
    }
}
