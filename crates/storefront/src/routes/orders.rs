//! Order history.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::layout::Layout;
use crate::db::OrderRepository;
use crate::middleware::RequireAuth;
use crate::models::{Order, OrderItem};
use crate::services::notifications::Notification;
use crate::state::AppState;

/// Order line display data for templates.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub name: String,
    pub weight: String,
    pub quantity: u32,
    pub line_price: String,
    pub image: Option<String>,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            weight: item.weight.clone(),
            quantity: item.quantity,
            line_price: item.line_total().to_string(),
            image: item.image.clone(),
        }
    }
}

/// Order display data for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    /// Short reference, e.g. `3F2A9C01`.
    pub reference: String,
    pub placed_on: String,
    pub status: String,
    pub status_class: String,
    pub customer_name: String,
    pub total: String,
    pub items: Vec<OrderItemView>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            reference: order.id.short_ref(),
            placed_on: order.created_at.format("%-d %b %Y").to_string(),
            status: order.status.label().to_string(),
            status_class: order.status.badge_class().to_string(),
            customer_name: order.customer_name.clone(),
            total: order.total_amount.to_string(),
            items: order.items.iter().map(OrderItemView::from).collect(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderView>,
}

/// List the signed-in user's orders, newest first.
///
/// A database failure shows an error notification and an empty list.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut layout: Layout,
) -> impl IntoResponse {
    let orders = match OrderRepository::new(state.pool()).list_for_user(user.id).await {
        Ok(orders) => orders.iter().map(OrderView::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load orders");
            layout.notify(Notification::error(
                "Couldn't load your orders",
                "Please try again in a moment.",
            ));
            Vec::new()
        }
    };

    OrdersTemplate { layout, orders }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use maas_pickles_core::{OrderId, OrderStatus, Price, UserId};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_order_view() {
        let order = Order {
            id: OrderId::new(Uuid::parse_str("3f2a9c01-0000-4000-8000-000000000000").unwrap()),
            user_id: UserId::new_v4(),
            items: vec![OrderItem {
                name: "Aam Ka Achar".to_string(),
                weight: "250g".to_string(),
                price: Price::new(249),
                quantity: 2,
                image: None,
            }],
            total_amount: Price::new(498),
            status: OrderStatus::Shipped,
            customer_name: "Lakshmi".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap(),
        };

        let view = OrderView::from(&order);
        assert_eq!(view.reference, "3F2A9C01");
        assert_eq!(view.placed_on, "9 Mar 2026");
        assert_eq!(view.status, "Shipped");
        assert_eq!(view.total, "₹498");
        assert_eq!(view.items[0].line_price, "₹498");
    }
}
