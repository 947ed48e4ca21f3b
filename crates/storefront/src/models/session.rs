//! Session-related types.
//!
//! Everything the storefront keeps per browser session, and the keys it is
//! stored under.

use serde::{Deserialize, Serialize};

use maas_pickles_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// The signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// The cart (line items and panel visibility).
    pub const CART: &str = "cart";

    /// Queued notifications, shown once by the next rendered page.
    pub const NOTIFICATIONS: &str = "notifications";

    /// Last composed order message, for the copy-to-clipboard block.
    pub const ORDER_MESSAGE: &str = "order_message";

    /// WhatsApp URL the confirmation page opens.
    pub const HANDOFF_URL: &str = "handoff_url";
}
