//! Aggregate counts for the dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardCounts;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Count rows across the resource tables in one round trip.
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT
                (SELECT COUNT(*) FROM students)::BIGINT AS students,
                (SELECT COUNT(*) FROM tuition_fees)::BIGINT AS tuition_fees,
                (SELECT COUNT(*) FROM payment_plans)::BIGINT AS payment_plans,
                (SELECT COUNT(*) FROM payment_methods)::BIGINT AS payment_methods,
                (SELECT COUNT(*) FROM student_payments)::BIGINT AS student_payments,
                (SELECT COUNT(*) FROM refunds WHERE status = 'Pending')::BIGINT AS pending_refunds,
                (SELECT COALESCE(SUM(amount), 0) FROM student_payments)::DOUBLE PRECISION
                    AS total_collected",
        )
        .fetch_one(pool)
        .await
    }
}
