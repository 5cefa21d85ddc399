//! Tuition fee schedule entries.

use campusdesk_core::types::{DbId, Timestamp};
use campusdesk_core::validation::{number_or_text, required_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{PgQuery, Resource};

/// A row from the `tuition_fees` table. Serialized with the fee kind as `type`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TuitionFee {
    pub id: DbId,
    #[serde(rename = "type")]
    pub fee_type: String,
    pub amount: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct TuitionFeeInput {
    #[serde(rename = "type")]
    #[validate(custom(function = "required_text"))]
    pub fee_type: String,
    #[serde(deserialize_with = "number_or_text")]
    #[validate(
        required(message = "is required"),
        range(exclusive_min = 0.0, message = "must be a positive number")
    )]
    pub amount: Option<f64>,
}

impl Resource for TuitionFee {
    type Input = TuitionFeeInput;

    const LABEL: &'static str = "Tuition fee";
    const TABLE: &'static str = "tuition_fees";
    const COLUMNS: &'static str = "id, fee_type, amount, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &["fee_type", "amount"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["fee_type"];

    fn bind<'q>(input: &'q TuitionFeeInput, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(input.fee_type.trim()).bind(input.amount)
    }
}
