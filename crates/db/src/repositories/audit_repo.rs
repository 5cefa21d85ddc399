//! Repository for the `audit_logs` table.

use campusdesk_core::search::contains_pattern;
use campusdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, action, path, details, timestamp, archived";

/// Provides append, query and archive operations for the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append one record stamped with the current time.
    pub async fn insert(pool: &PgPool, input: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (username, action, path, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(&input.username)
            .bind(&input.action)
            .bind(&input.path)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// List records newest first. Archived rows are skipped unless
    /// `params.include_archived` is set; callers decide who may set it.
    pub async fn list(pool: &PgPool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let pattern = params.filter.as_deref().and_then(contains_pattern);
        let action = params
            .action
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_uppercase);

        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE ($1::BOOLEAN OR archived = false)
               AND ($2::TEXT IS NULL OR username ILIKE $2 OR details ILIKE $2)
               AND ($3::TEXT IS NULL OR action = $3)
               AND ($4::DATE IS NULL OR (timestamp AT TIME ZONE 'UTC')::DATE = $4)
             ORDER BY timestamp DESC, id DESC"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(params.include_archived)
            .bind(pattern)
            .bind(action)
            .bind(params.date)
            .fetch_all(pool)
            .await
    }

    /// Find a record by ID, archived or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AuditLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_logs WHERE id = $1");
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a record archived. Returns `false` if no row has `id`.
    ///
    /// Archiving an already-archived record succeeds without change.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE audit_logs SET archived = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
