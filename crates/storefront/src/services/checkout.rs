//! Checkout: hand the order off to WhatsApp.
//!
//! The storefront takes no payment and writes no order row. Checking out
//! composes the order message, copies it for the customer, opens a WhatsApp
//! chat with the shop pre-filled with the message, and empties the cart.
//!
//! The three side effects sit behind traits so the sequence can be tested
//! without a browser:
//! - [`Clipboard`] receives the message (fallible, reported asynchronously).
//!   A clipboard that only stages the message for the browser reports
//!   nothing; the confirmation page reports the real copy.
//! - [`HandoffLauncher`] opens the WhatsApp URL (best effort)
//! - [`Notifier`] tells the customer what happened

use std::future::Future;

use thiserror::Error;
use tokio::task::JoinHandle;
use tower_sessions::Session;
use tracing::instrument;

use maas_pickles_core::{Cart, ClientPlatform, OrderDraft, build_handoff_url, compose_order_message};

use super::notifications::{self, Notification};
use crate::models::session_keys;

/// Errors from the checkout sequence.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The clipboard rejected the message.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// The handoff URL could not be opened.
    #[error("could not open handoff: {0}")]
    Launch(String),

    /// Session store failure.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// What a clipboard did with the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardWrite {
    /// The message is on the clipboard.
    Copied,
    /// The message was handed on for the browser to copy; the outcome is
    /// reported there.
    Staged,
}

/// Somewhere the order message can be copied to.
pub trait Clipboard: Clone + Send + Sync + 'static {
    fn write_text(
        &self,
        text: String,
    ) -> impl Future<Output = Result<ClipboardWrite, CheckoutError>> + Send;
}

/// Opens the messaging handoff URL.
pub trait HandoffLauncher: Send + Sync {
    fn open(&self, url: &str) -> impl Future<Output = Result<(), CheckoutError>> + Send;
}

/// Delivers user-visible notifications.
pub trait Notifier: Clone + Send + Sync + 'static {
    fn notify(&self, notification: Notification) -> impl Future<Output = ()> + Send;
}

/// What a successful checkout produced.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub message: String,
    pub handoff_url: String,
    /// Resolves to whether the clipboard accepted the message. Already
    /// reported through the notifier; await it only to know the write has
    /// settled.
    pub clipboard_report: JoinHandle<bool>,
}

/// The checkout sequence, wired to its side effects.
pub struct Checkout<'a, C, L, N> {
    destination: &'a str,
    clipboard: C,
    launcher: L,
    notifier: N,
}

impl<'a, C, L, N> Checkout<'a, C, L, N>
where
    C: Clipboard,
    L: HandoffLauncher,
    N: Notifier,
{
    /// `destination` is the shop's WhatsApp number; formatting is ignored.
    pub const fn new(destination: &'a str, clipboard: C, launcher: L, notifier: N) -> Self {
        Self {
            destination,
            clipboard,
            launcher,
            notifier,
        }
    }

    /// Submit the cart.
    ///
    /// The clipboard write is spawned and its result reported through the
    /// notifier; opening the URL and clearing the cart don't wait for it.
    /// On success the cart is empty and its panel closed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to order. The
    /// cart is left untouched.
    #[instrument(skip_all, fields(items = cart.total_items(), platform = ?platform))]
    pub async fn submit(
        &self,
        cart: &mut Cart,
        draft: &OrderDraft,
        platform: ClientPlatform,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let message = compose_order_message(cart, draft);
        let handoff_url = build_handoff_url(self.destination, &message, platform);

        let clipboard_report = tokio::spawn(report_clipboard(
            self.clipboard.clone(),
            self.notifier.clone(),
            message.clone(),
        ));

        if let Err(e) = self.launcher.open(&handoff_url).await {
            tracing::warn!(error = %e, "Failed to open WhatsApp handoff");
            self.notifier
                .notify(Notification::error(
                    "Couldn't open WhatsApp",
                    "Use the link below to send your order.",
                ))
                .await;
        }

        let total = cart.total_price();
        cart.clear();
        cart.close();

        tracing::info!(%total, "Order handed off to WhatsApp");

        Ok(CheckoutOutcome {
            message,
            handoff_url,
            clipboard_report,
        })
    }
}

async fn report_clipboard<C: Clipboard, N: Notifier>(
    clipboard: C,
    notifier: N,
    message: String,
) -> bool {
    match clipboard.write_text(message).await {
        Ok(ClipboardWrite::Staged) => true,
        Ok(ClipboardWrite::Copied) => {
            notifier
                .notify(Notification::success(
                    "Order copied",
                    "Your order details are on the clipboard.",
                ))
                .await;
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to copy order message");
            notifier
                .notify(Notification::error(
                    "Couldn't copy",
                    "Copy the order details below manually.",
                ))
                .await;
            false
        }
    }
}

// =============================================================================
// Session-backed implementations
// =============================================================================

/// Stages the message in the session. The confirmation page copies it in
/// the browser and shows whether that worked.
#[derive(Clone)]
pub struct SessionClipboard(pub Session);

impl Clipboard for SessionClipboard {
    async fn write_text(&self, text: String) -> Result<ClipboardWrite, CheckoutError> {
        self.0
            .insert(session_keys::ORDER_MESSAGE, text)
            .await
            .map(|()| ClipboardWrite::Staged)
            .map_err(|e| CheckoutError::Clipboard(e.to_string()))
    }
}

/// Records the URL for the confirmation page, which opens it in a new tab.
pub struct SessionLauncher(pub Session);

impl HandoffLauncher for SessionLauncher {
    async fn open(&self, url: &str) -> Result<(), CheckoutError> {
        self.0
            .insert(session_keys::HANDOFF_URL, url)
            .await
            .map_err(|e| CheckoutError::Launch(e.to_string()))
    }
}

/// Queues flash notifications in the session.
#[derive(Clone)]
pub struct SessionNotifier(pub Session);

impl Notifier for SessionNotifier {
    async fn notify(&self, notification: Notification) {
        notifications::push_or_log(&self.0, notification).await;
    }
}

/// What the confirmation page needs, taken from the session once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub message: String,
    pub url: String,
}

/// Take the last checkout's message and URL out of the session.
///
/// Returns `None` if either is missing, e.g. on a reload of the
/// confirmation page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take_handoff(session: &Session) -> Result<Option<Handoff>, CheckoutError> {
    let message = session
        .remove::<String>(session_keys::ORDER_MESSAGE)
        .await?;
    let url = session.remove::<String>(session_keys::HANDOFF_URL).await?;

    Ok(message
        .zip(url)
        .map(|(message, url)| Handoff { message, url }))
}
