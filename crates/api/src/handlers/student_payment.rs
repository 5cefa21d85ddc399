//! Refund requests raised from a recorded student payment.

use axum::extract::State;
use axum::Json;
use campusdesk_core::error::CoreError;
use campusdesk_core::types::DbId;
use campusdesk_db::models::refund::{Refund, RefundInput};
use campusdesk_db::models::student_payment::StudentPayment;
use campusdesk_db::resource::{Resource, ResourceRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::AuthUser;
use crate::response::CreatedResponse;
use crate::state::AppState;

/// Request body for `POST /api/student-payment/{id}/refund`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefundRequest {
    /// Reason for the refund. Defaults to the payment's own description.
    pub description: Option<String>,
}

/// POST /api/student-payment/{id}/refund
///
/// Open a `Pending` refund for the full amount of the payment.
pub async fn request_refund(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<RefundRequest>,
) -> AppResult<Json<CreatedResponse>> {
    let payment = ResourceRepo::<StudentPayment>::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: StudentPayment::LABEL,
            id,
        }))?;

    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or(payment.description);

    let refund = RefundInput {
        payment_id: payment.id.to_string(),
        amount: Some(payment.amount),
        description,
        status: None,
    };
    let refund_id = ResourceRepo::<Refund>::create(&state.pool, &refund).await?;

    tracing::info!(payment_id = id, refund_id, user = %user.username, "Refund requested");

    Ok(Json(CreatedResponse {
        message: "Refund requested".to_string(),
        id: refund_id,
    }))
}
