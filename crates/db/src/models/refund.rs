//! Refund requests.
//!
//! Unlike the other resources, a refund carries a workflow status. Creating
//! one without a status starts it at `Pending`; updating one without a status
//! keeps whatever is stored.

use campusdesk_core::refund::RefundStatus;
use campusdesk_core::types::{DbId, Timestamp};
use campusdesk_core::validation::{number_or_text, required_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{placeholders, PgQuery, Resource};

/// A row from the `refunds` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub id: DbId,
    /// Identifier of the refunded payment, by convention only.
    pub payment_id: String,
    pub amount: f64,
    pub description: String,
    /// One of `Pending`, `Approved`, `Rejected` (enforced by a CHECK constraint).
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RefundInput {
    #[validate(custom(function = "required_text"))]
    pub payment_id: String,
    #[serde(deserialize_with = "number_or_text")]
    #[validate(
        required(message = "is required"),
        range(exclusive_min = 0.0, message = "must be a positive number")
    )]
    pub amount: Option<f64>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RefundStatus>,
}

impl Resource for Refund {
    type Input = RefundInput;

    const LABEL: &'static str = "Refund";
    const TABLE: &'static str = "refunds";
    const COLUMNS: &'static str =
        "id, payment_id, amount, description, status, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] =
        &["payment_id", "amount", "description", "status"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["payment_id", "description"];

    fn bind<'q>(input: &'q RefundInput, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(input.payment_id.trim())
            .bind(input.amount)
            .bind(input.description.trim())
            .bind(input.status.map(|s| s.as_str()))
    }

    fn insert_sql() -> String {
        "INSERT INTO refunds (payment_id, amount, description, status) \
         VALUES ($1, $2, $3, COALESCE($4, 'Pending')) RETURNING id"
            .to_string()
    }

    fn update_sql() -> String {
        let p = placeholders(2, Self::WRITE_COLUMNS.len());
        format!(
            "UPDATE refunds SET payment_id = {}, amount = {}, description = {}, \
             status = COALESCE({}, status), updated_at = NOW() WHERE id = $1 RETURNING id",
            p[0], p[1], p[2], p[3]
        )
    }
}
