//! Payments received from students.

use campusdesk_core::types::{DbId, Timestamp};
use campusdesk_core::validation::{number_or_text, required_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{PgQuery, Resource};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayment {
    pub id: DbId,
    /// School-issued student number, not a `students.id` reference.
    pub student_id: String,
    pub student_name: String,
    pub amount: f64,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentPaymentInput {
    #[validate(custom(function = "required_text"))]
    pub student_id: String,
    #[validate(custom(function = "required_text"))]
    pub student_name: String,
    #[serde(deserialize_with = "number_or_text")]
    #[validate(
        required(message = "is required"),
        range(exclusive_min = 0.0, message = "must be a positive number")
    )]
    pub amount: Option<f64>,
    pub description: String,
}

impl Resource for StudentPayment {
    type Input = StudentPaymentInput;

    const LABEL: &'static str = "Student payment";
    const TABLE: &'static str = "student_payments";
    const COLUMNS: &'static str =
        "id, student_id, student_name, amount, description, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] =
        &["student_id", "student_name", "amount", "description"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["student_id", "student_name"];

    fn bind<'q>(input: &'q StudentPaymentInput, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(input.student_id.trim())
            .bind(input.student_name.trim())
            .bind(input.amount)
            .bind(input.description.trim())
    }
}
