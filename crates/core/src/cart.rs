//! The cart store.
//!
//! A [`Cart`] is the only place line items and the cart panel's visibility
//! change. The storefront keeps one per browser session and persists it in
//! the session between requests, so it serializes with serde.
//!
//! Invariants:
//! - at most one line per product id
//! - every line's quantity is at least 1

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// One product and how many jars of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Selected products plus the open/closed state of the cart panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLine>,
    #[serde(default)]
    is_open: bool,
}

impl Cart {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product.id == *product_id)
    }

    /// Add `quantity` jars of `product`.
    ///
    /// An existing line for the same product id is incremented; otherwise a
    /// new line is appended.
    ///
    /// `quantity` must be at least 1. Callers pass 1 unless the customer
    /// picked a count; zero is ignored in release builds.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        debug_assert!(quantity >= 1, "add_item requires a positive quantity");
        if quantity == 0 {
            return;
        }

        match self.items.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
    }

    /// Drop the line for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|line| line.product.id != *product_id);
    }

    /// Set a line's quantity to exactly `quantity`.
    ///
    /// Zero or negative removes the line. Absent ids are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product.id == *product_id)
        {
            line.quantity = quantity;
        }
    }

    /// Remove every line. Panel visibility is left alone.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn open(&mut self) {
        self.is_open = true;
    }

    pub const fn close(&mut self) {
        self.is_open = false;
    }

    pub const fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Total number of jars.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of every line's price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartLine::line_total).sum()
    }
}
