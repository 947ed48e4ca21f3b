//! Maa's Pickles Core - catalog, cart, and order composition.
//!
//! This crate holds everything the storefront needs that does not touch the
//! network or the database:
//! - `types` - IDs, prices, statuses, categories, and email addresses
//! - `catalog` - The static product catalog
//! - `cart` - The cart store (line items, totals, panel visibility)
//! - `order` - Order message composition and the messaging handoff URL
//!
//! # Architecture
//!
//! No I/O lives here. The storefront owns a [`Cart`] per session and calls
//! into [`order`] when the customer checks out.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::Product;
pub use order::{ClientPlatform, OrderDraft, build_handoff_url, compose_order_message};
pub use types::*;
