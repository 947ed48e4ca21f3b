//! User domain types.

use chrono::{DateTime, Utc};

use maas_pickles_core::{Email, UserId};

/// A storefront account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
