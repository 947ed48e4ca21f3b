//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Email and password accounts
//! - `cart` - Loads and saves the session's cart
//! - `checkout` - Order handoff to WhatsApp
//! - `notifications` - Flash notifications shown once by the next page

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod notifications;
