//! Shared response bodies for API handlers.
//!
//! Mutations answer with a short human-readable `message`; page-level actions
//! (login, signup, account deletion) tell the browser where to go next.

use campusdesk_core::types::DbId;
use serde::Serialize;

/// `{ "message": ... }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "message": ..., "id": ... }` for created records.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: DbId,
}

/// Navigation hint for the browser after login, signup or account deletion.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub redirect: &'static str,
}
