//! Order history repository.
//!
//! Read-only: checkout hands orders off to WhatsApp and the shop records them
//! separately, so the storefront never inserts here.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use maas_pickles_core::{OrderId, OrderStatus, Price, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    items: Json<Vec<OrderItem>>,
    total_amount: i64,
    status: OrderStatus,
    customer_name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let total = u64::try_from(row.total_amount).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative total {} on order {}",
                row.total_amount, row.id
            ))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            items: row.items.0,
            total_amount: Price::new(total),
            status: row.status,
            customer_name: row.customer_name,
            created_at: row.created_at,
        })
    }
}

/// Repository for a customer's past orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored total is negative.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, items, total_amount, status, customer_name, created_at
            FROM storefront.orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
