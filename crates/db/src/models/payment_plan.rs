//! Installment payment plans.

use campusdesk_core::types::{DbId, Timestamp};
use campusdesk_core::validation::{number_or_text, required_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{PgQuery, Resource};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub id: DbId,
    pub name: String,
    pub amount: f64,
    /// Free-form schedule description, empty when not given.
    pub schedule: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PaymentPlanInput {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[serde(deserialize_with = "number_or_text")]
    #[validate(
        required(message = "is required"),
        range(exclusive_min = 0.0, message = "must be a positive number")
    )]
    pub amount: Option<f64>,
    pub schedule: String,
}

impl Resource for PaymentPlan {
    type Input = PaymentPlanInput;

    const LABEL: &'static str = "Payment plan";
    const TABLE: &'static str = "payment_plans";
    const COLUMNS: &'static str = "id, name, amount, schedule, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &["name", "amount", "schedule"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "schedule"];

    fn bind<'q>(input: &'q PaymentPlanInput, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(input.name.trim())
            .bind(input.amount)
            .bind(input.schedule.trim())
    }
}
