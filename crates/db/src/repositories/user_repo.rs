//! Repository for the `users` table.

use campusdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateAccount, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, firstname, lastname, gender, \
                       phone, country, region, city, brgy, street, dob, profile_picture, \
                       created_at, updated_at";

/// Provides account and profile operations.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Duplicate usernames or emails fail with a unique violation on
    /// `uq_users_username` / `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, firstname, lastname,
                                gender, phone, country, region, city, brgy, street, dob)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.firstname)
            .bind(&input.lastname)
            .bind(&input.gender)
            .bind(&input.phone)
            .bind(&input.country)
            .bind(&input.region)
            .bind(&input.city)
            .bind(&input.brgy)
            .bind(&input.street)
            .bind(input.dob)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Change username and/or email. `None` fields keep their stored value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_account(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the personal details shown on the profile page.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                firstname = $2,
                lastname = $3,
                email = $4,
                phone = $5,
                gender = $6,
                dob = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.firstname)
            .bind(&input.lastname)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.gender)
            .bind(input.dob)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the profile picture path, returning the previous one.
    ///
    /// Returns `None` if the user does not exist.
    pub async fn set_profile_picture(
        pool: &PgPool,
        id: DbId,
        path: Option<&str>,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>(
            "UPDATE users u SET profile_picture = $2, updated_at = NOW()
             FROM (SELECT id, profile_picture FROM users WHERE id = $1) prev
             WHERE u.id = prev.id
             RETURNING prev.profile_picture",
        )
        .bind(id)
        .bind(path)
        .fetch_optional(pool)
        .await
    }

    /// Delete a user. Their sessions go with them (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
