//! Audit trail models.
//!
//! Rows are immutable apart from the `archived` flag; archiving hides a row
//! from the default listing but never deletes it.

use campusdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    /// Acting username at the time of the request.
    #[serde(rename = "user")]
    pub username: String,
    /// HTTP method of the recorded request.
    pub action: String,
    pub path: String,
    pub details: String,
    pub timestamp: Timestamp,
    pub archived: bool,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub username: String,
    pub action: String,
    pub path: String,
    pub details: String,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filters for listing audit records. All are optional and combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    /// Case-insensitive substring over username and details.
    pub filter: Option<String>,
    /// Exact HTTP method, case-insensitive.
    pub action: Option<String>,
    /// Calendar day (UTC) of the timestamp.
    pub date: Option<NaiveDate>,
    /// Include archived rows. Honoured for administrators only.
    #[serde(default)]
    pub include_archived: bool,
}
