//! Recorded orders shown in the order history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use maas_pickles_core::{OrderId, OrderStatus, Price, UserId};

/// One line of an order, snapshotted when the order was recorded.
///
/// Stored as JSON so later catalog changes don't rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub weight: String,
    /// Unit price at the time of ordering.
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A customer's order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_amount: Price,
    pub status: OrderStatus,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_snapshot_without_image() {
        let json = r#"{"name":"Aam Ka Achar","weight":"250g","price":249,"quantity":2}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.image, None);
        assert_eq!(item.line_total(), Price::new(498));
    }
}
