//! Order message composition and the WhatsApp handoff.
//!
//! Checkout does not create an order in the database. Instead the cart is
//! rendered into a plain-text message and the customer is sent to WhatsApp
//! with that message pre-filled, addressed to the shop's number.
//!
//! Everything here is pure: the same cart, draft, and platform always give the
//! same message and URL, so the checkout page preview matches what is sent.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Customer details collected on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Special instructions.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Which WhatsApp URL template a client should receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientPlatform {
    /// Phones and tablets: `wa.me` deep link into the app.
    Mobile,
    /// Everything else: WhatsApp Web.
    #[default]
    Desktop,
}

static MOBILE_USER_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user agent pattern is a valid regex")
});

impl ClientPlatform {
    /// Classify a client from its `User-Agent` header.
    ///
    /// A missing header counts as desktop.
    #[must_use]
    pub fn detect(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if MOBILE_USER_AGENT.is_match(ua) => Self::Mobile,
            _ => Self::Desktop,
        }
    }
}

/// Render the cart and customer details as a WhatsApp message.
///
/// The grand total is taken from [`Cart::total_price`] so the message always
/// agrees with the cart panel. An empty cart yields an empty message; the
/// checkout routes never submit one.
#[must_use]
pub fn compose_order_message(cart: &Cart, draft: &OrderDraft) -> String {
    if cart.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "🫙 *New Order - Maa's Pickles*");
    let _ = writeln!(out);
    let _ = writeln!(out, "*Customer Details*");
    let _ = writeln!(out, "Name: {}", draft.name.trim());
    let _ = writeln!(out, "Phone: {}", draft.phone.trim());
    if let Some(email) = non_blank(draft.email.as_deref()) {
        let _ = writeln!(out, "Email: {email}");
    }
    let _ = writeln!(out, "Address: {}", draft.address.trim());
    let _ = writeln!(out);

    let _ = writeln!(out, "*Order Items*");
    for line in cart.items() {
        let _ = writeln!(
            out,
            "• {} ({}) × {} = {}",
            line.product.name,
            line.product.weight,
            line.quantity(),
            line.line_total()
        );
    }
    let _ = writeln!(out);
    let _ = write!(out, "*Total: {}*", cart.total_price());

    if let Some(notes) = non_blank(draft.notes.as_deref()) {
        let _ = write!(out, "\n\n*Special Instructions*\n{notes}");
    }

    out
}

/// Build the WhatsApp URL that opens a chat with `destination` pre-filled
/// with `message`.
///
/// Every non-digit is stripped from `destination`, so "+91 90595-82419" and
/// "919059582419" address the same chat. `destination` should contain at
/// least one digit; otherwise the URL is well-formed but goes nowhere.
#[must_use]
pub fn build_handoff_url(destination: &str, message: &str, platform: ClientPlatform) -> String {
    let phone: String = destination.chars().filter(char::is_ascii_digit).collect();
    let text = urlencoding::encode(message);

    match platform {
        ClientPlatform::Mobile => format!("https://wa.me/{phone}?text={text}"),
        ClientPlatform::Desktop => {
            format!("https://web.whatsapp.com/send?phone={phone}&text={text}")
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog;

    fn draft() -> OrderDraft {
        OrderDraft {
            name: "Ravi Kumar".to_owned(),
            phone: "+91 98765 43210".to_owned(),
            address: "12 Spice Lane, Hyderabad".to_owned(),
            email: None,
            notes: None,
        }
    }

    fn mango_cart(quantity: u32) -> Cart {
        let mut cart = Cart::new();
        cart.add_item(catalog::find("mango-pickle").unwrap(), quantity);
        cart
    }

    #[test]
    fn test_message_lists_items_and_total() {
        let cart = mango_cart(2);
        let message = compose_order_message(&cart, &draft());

        assert!(message.contains("Aam Ka Achar (250g) × 2 = ₹498"));
        let total_line = message.lines().find(|l| l.contains("Total")).unwrap();
        assert!(total_line.contains("₹498"));
        assert!(message.contains("Name: Ravi Kumar"));
        assert!(message.contains("Phone: +91 98765 43210"));
        assert!(message.contains("Address: 12 Spice Lane, Hyderabad"));
        assert!(message.contains("*Order Items*"));
    }

    #[test]
    fn test_message_total_matches_cart() {
        let mut cart = mango_cart(1);
        cart.add_item(catalog::find("chicken-pickle").unwrap(), 2);
        let message = compose_order_message(&cart, &draft());

        assert!(message.ends_with(&format!("*Total: {}*", cart.total_price())));
        assert!(message.contains("₹947"));
    }

    #[test]
    fn test_optional_fields_only_when_present() {
        let cart = mango_cart(1);
        let plain = compose_order_message(&cart, &draft());
        assert!(!plain.contains("Email:"));
        assert!(!plain.contains("Special Instructions"));

        let full = OrderDraft {
            email: Some("ravi@example.com".to_owned()),
            notes: Some("Less oil please".to_owned()),
            ..draft()
        };
        let message = compose_order_message(&cart, &full);
        assert!(message.contains("Email: ravi@example.com"));
        assert!(message.ends_with("*Special Instructions*\nLess oil please"));

        let blank = OrderDraft {
            email: Some("  ".to_owned()),
            ..draft()
        };
        assert!(!compose_order_message(&cart, &blank).contains("Email:"));
    }

    #[test]
    fn test_empty_cart_gives_empty_message() {
        assert_eq!(compose_order_message(&Cart::new(), &draft()), "");
    }

    #[test]
    fn test_handoff_url_strips_destination_to_digits() {
        for platform in [ClientPlatform::Mobile, ClientPlatform::Desktop] {
            let url = build_handoff_url("+91 90595-82419", "hi", platform);
            assert!(url.contains("919059582419"), "{url}");
            assert!(!url.contains('+'));
        }
    }

    #[test]
    fn test_handoff_url_templates() {
        assert_eq!(
            build_handoff_url("919059582419", "Total: ₹498", ClientPlatform::Mobile),
            "https://wa.me/919059582419?text=Total%3A%20%E2%82%B9498"
        );
        assert_eq!(
            build_handoff_url("919059582419", "a&b", ClientPlatform::Desktop),
            "https://web.whatsapp.com/send?phone=919059582419&text=a%26b"
        );
    }

    #[test]
    fn test_handoff_url_encodes_newlines() {
        let url = build_handoff_url("1", "line one\nline two", ClientPlatform::Mobile);
        assert!(url.ends_with("line%20one%0Aline%20two"));
    }

    #[test]
    fn test_platform_detection() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        let android = "Mozilla/5.0 (Linux; ANDROID 14; Pixel 8) Chrome/120.0 Mobile";
        let mac = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15 Safari/605.1.15";

        assert_eq!(ClientPlatform::detect(Some(iphone)), ClientPlatform::Mobile);
        assert_eq!(ClientPlatform::detect(Some(android)), ClientPlatform::Mobile);
        assert_eq!(ClientPlatform::detect(Some("opera mini/8.0")), ClientPlatform::Mobile);
        assert_eq!(ClientPlatform::detect(Some(mac)), ClientPlatform::Desktop);
        assert_eq!(ClientPlatform::detect(None), ClientPlatform::Desktop);
    }
}
