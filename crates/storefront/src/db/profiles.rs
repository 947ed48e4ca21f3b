//! Profile repository.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use maas_pickles_core::{Email, UserId};

use super::RepositoryError;
use crate::models::{Profile, ProfileUpdate};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    display_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            display_name: row.display_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
        }
    }
}

/// Repository for customer profiles, keyed by user id.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the empty profile for a newly registered user.
    ///
    /// Takes a connection so registration can run it inside its transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a profile.
    pub async fn create_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
        email: &Email,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO storefront.profiles (user_id, email)
            VALUES ($1, $2)
            ",
        )
        .bind(user_id)
        .bind(email.as_str())
        .execute(conn)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "profile"))?;

        Ok(())
    }

    /// Get a user's profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT user_id, display_name, email, phone, address
            FROM storefront.profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    /// Save the editable fields. Blank fields are stored as NULL.
    ///
    /// One `UPDATE`, so a failure leaves the stored profile untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no profile.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            UPDATE storefront.profiles
            SET display_name = $2, phone = $3, address = $4, updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, display_name, email, phone, address
            ",
        )
        .bind(user_id)
        .bind(ProfileUpdate::normalized(&update.display_name))
        .bind(ProfileUpdate::normalized(&update.phone))
        .bind(ProfileUpdate::normalized(&update.address))
        .fetch_optional(self.pool)
        .await?;

        row.map(Profile::from).ok_or(RepositoryError::NotFound)
    }
}
