//! Data every full page renders: header cart badge, cart panel, toasts.
//!
//! Page handlers take [`Layout`] as an extractor and embed it in their
//! template as the `layout` field; `base.html` reads it from there.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use super::cart::CartView;
use crate::middleware::CspNonce;
use crate::models::{CurrentUser, session_keys};
use crate::services::cart::SessionCart;
use crate::services::notifications::{self, Notification};

/// Shared page chrome.
pub struct Layout {
    pub cart: CartView,
    /// Flash notifications, shown once.
    pub notifications: Vec<Notification>,
    pub user: Option<CurrentUser>,
    pub nonce: String,
    /// Path and query of this page, posted back as `return_to` by cart forms.
    pub current_path: String,
}

impl Layout {
    /// Show a notification on this render rather than the next one.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    #[must_use]
    pub const fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Put this page's notifications back for the next page, when the
    /// handler redirects instead of rendering.
    pub async fn keep_notifications(self, session: &Session) {
        for notification in self.notifications {
            notifications::push_or_log(session, notification).await;
        }
    }

    /// Replace the cart after a handler changed it.
    pub fn set_cart(&mut self, cart: CartView) {
        self.cart = cart;
    }
}

/// The cart panel and badge alone, for fragment responses.
///
/// Field names match [`Layout`] so the partial templates render from either.
pub struct CartFragment {
    pub cart: CartView,
    pub current_path: String,
}

impl<S> FromRequestParts<S> for Layout
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(CspNonce(nonce)) = CspNonce::from_request_parts(parts, state).await;

        let current_path = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);

        let Some(session) = parts.extensions.get::<Session>().cloned() else {
            tracing::warn!("Session not found in request extensions - layer may be misconfigured");
            return Ok(Self {
                cart: CartView::default(),
                notifications: Vec::new(),
                user: None,
                nonce,
                current_path,
            });
        };

        let cart = match SessionCart::load(&session).await {
            Ok(cart) => CartView::from(cart.cart()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cart for layout");
                CartView::default()
            }
        };

        let user = session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten();

        Ok(Self {
            cart,
            notifications: notifications::take(&session).await,
            user,
            nonce,
            current_path,
        })
    }
}
