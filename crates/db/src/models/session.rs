//! Session models.

use campusdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub token_hash: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for opening a new session.
pub struct CreateSession {
    pub token_hash: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

/// An unexpired session joined with its owner's current identity.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveSession {
    pub session_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub role: String,
}
