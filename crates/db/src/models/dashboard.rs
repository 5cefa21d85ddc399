//! Dashboard summary counts.

use serde::Serialize;
use sqlx::FromRow;

/// Totals shown on the dashboard landing page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardCounts {
    pub students: i64,
    pub tuition_fees: i64,
    pub payment_plans: i64,
    pub payment_methods: i64,
    pub student_payments: i64,
    pub pending_refunds: i64,
    /// Sum of all student payment amounts.
    pub total_collected: f64,
}
