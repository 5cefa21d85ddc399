pub mod account;
pub mod audit;
pub mod auth;
pub mod health;
pub mod pages;
pub mod resource;

use axum::routing::{get, post};
use axum::Router;
use campusdesk_db::models::payment_method::PaymentMethod;
use campusdesk_db::models::payment_plan::PaymentPlan;
use campusdesk_db::models::refund::Refund;
use campusdesk_db::models::student::Student;
use campusdesk_db::models::student_payment::StudentPayment;
use campusdesk_db::models::tuition_fee::TuitionFee;

use crate::handlers;
use crate::middleware::audit::record_mutations;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Every route requires a session. Successful mutations are recorded by the
/// audit interceptor wrapping the whole tree.
///
/// ```text
/// /student                        CRUD (name, program)
/// /tuition-fee                    CRUD (type)
/// /payment-plan                   CRUD (name, schedule)
/// /request-refund                 CRUD (paymentId, description)
/// /payment-method                 CRUD (name)
/// /student-payment                CRUD (studentId, studentName)
/// /student-payment/{id}/refund    request a refund for a payment (POST)
///
/// /audit-log                      list, get, archive
/// /dashboard                      summary counts (GET)
///
/// /account                        get, update, delete
/// /profile                        get, update
/// /profile-picture                upload, remove
/// ```
pub fn api_routes(state: AppState) -> Router<AppState> {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        // Administrative resources.
        .nest("/student", resource::router::<Student>())
        .nest("/tuition-fee", resource::router::<TuitionFee>())
        .nest("/payment-plan", resource::router::<PaymentPlan>())
        .nest("/request-refund", resource::router::<Refund>())
        .nest("/payment-method", resource::router::<PaymentMethod>())
        .nest(
            "/student-payment",
            resource::router::<StudentPayment>().route(
                "/{id}/refund",
                post(handlers::student_payment::request_refund),
            ),
        )
        // Audit trail (archive-only deletes).
        .nest("/audit-log", audit::router())
        .route("/dashboard", get(handlers::dashboard::summary))
        // The signed-in user's own account.
        .merge(account::router(max_upload_bytes))
        .layer(axum::middleware::from_fn_with_state(state, record_mutations))
}
