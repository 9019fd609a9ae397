//! Profile repository for database operations.
//!
//! Reads and updates the one-to-one `user_profiles` row together with the
//! contact fields on `users`. All queries use the runtime query API with
//! explicit binds.

use sqlx::PgPool;

use verve_core::{PhoneNumber, UserId};

use super::RepositoryError;
use crate::models::user::{ProfileChanges, UserProfile};

/// Joined profile + account select, shared by reads and the update path.
const SELECT_PROFILE: &str = r"
    SELECT p.user_id, p.display_name, p.first_name, p.last_name, p.address,
           p.birthdate, p.gender, p.img, u.email, u.phone_number
    FROM user_profiles p
    JOIN users u ON u.id = p.user_id
    WHERE p.user_id = $1
";

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's profile, joined with their account contact fields.
    ///
    /// Returns `None` if the user has no profile row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, UserProfile>(SELECT_PROFILE)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Apply a partial update to a user's profile and account fields.
    ///
    /// Runs in a single transaction: the current row is read to source
    /// fallback values, omitted fields keep their stored value, and both
    /// `user_profiles` and `users` are updated before the explicit commit.
    /// Any failure before the commit rolls the whole transaction back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no profile row.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> Result<UserProfile, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, UserProfile>(SELECT_PROFILE)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        // Omitted fields fall back to the stored value
        let merged = UserProfile {
            user_id,
            display_name: changes.display_name.clone().or(current.display_name),
            first_name: changes.first_name.clone().or(current.first_name),
            last_name: changes.last_name.clone().or(current.last_name),
            address: changes.address.clone().or(current.address),
            birthdate: changes.birthdate.or(current.birthdate),
            gender: changes.gender.clone().or(current.gender),
            img: changes.img.clone().or(current.img),
            email: changes.email.clone().unwrap_or(current.email),
            phone_number: changes.phone_number.clone().or(current.phone_number),
        };

        sqlx::query(
            r"
            UPDATE user_profiles SET
                display_name = $1,
                first_name = $2,
                last_name = $3,
                address = $4,
                birthdate = $5,
                gender = $6,
                img = $7
            WHERE user_id = $8
            ",
        )
        .bind(merged.display_name.as_deref())
        .bind(merged.first_name.as_deref())
        .bind(merged.last_name.as_deref())
        .bind(merged.address.as_deref())
        .bind(merged.birthdate)
        .bind(merged.gender.as_deref())
        .bind(merged.img.as_deref())
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            UPDATE users SET
                email = $1,
                phone_number = $2
            WHERE id = $3
            ",
        )
        .bind(merged.email.as_str())
        .bind(merged.phone_number.as_ref().map(PhoneNumber::as_str))
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(merged)
    }
}
