//! Accepted payment methods (cash, bank transfer, e-wallets).

use campusdesk_core::types::{DbId, Timestamp};
use campusdesk_core::validation::required_text;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{PgQuery, Resource};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: DbId,
    pub name: String,
    /// Logo URL or path.
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PaymentMethodInput {
    #[validate(custom(function = "required_text"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Resource for PaymentMethod {
    type Input = PaymentMethodInput;

    const LABEL: &'static str = "Payment method";
    const TABLE: &'static str = "payment_methods";
    const COLUMNS: &'static str = "id, name, image, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &["name", "image"];
    const SEARCH_COLUMNS: &'static [&'static str] = &["name"];

    fn bind<'q>(input: &'q PaymentMethodInput, query: PgQuery<'q>) -> PgQuery<'q> {
        let image = input
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        query.bind(input.name.trim()).bind(image)
    }
}
