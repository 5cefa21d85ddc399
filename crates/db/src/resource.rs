//! Generic CRUD over one table per resource.
//!
//! Every administrative resource (students, fees, plans, refunds, payment
//! methods, student payments) is a flat row keyed by a BIGSERIAL `id`. A
//! resource describes its table once through [`Resource`]; [`ResourceRepo`]
//! derives the parameterized statements from that description.

use std::marker::PhantomData;

use campusdesk_core::search::contains_pattern;
use campusdesk_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, PgPool, Postgres, Row};
use validator::Validate;

/// A statement with positional arguments still being bound.
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Table description of a CRUD resource. Implemented on the row type.
pub trait Resource:
    for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Create/update payload. Validated before any statement runs.
    type Input: DeserializeOwned + Validate + Send + Sync + 'static;

    /// Human-readable name used in messages (`"Student"`).
    const LABEL: &'static str;
    /// Table name.
    const TABLE: &'static str;
    /// Column list for SELECT queries.
    const COLUMNS: &'static str;
    /// Columns written by create and update, in [`Resource::bind`] order.
    const WRITE_COLUMNS: &'static [&'static str];
    /// Text columns matched by the list filter.
    const SEARCH_COLUMNS: &'static [&'static str];

    /// Bind the input's values for [`Resource::WRITE_COLUMNS`], in order.
    fn bind<'q>(input: &'q Self::Input, query: PgQuery<'q>) -> PgQuery<'q>;

    /// `INSERT ... RETURNING id`, values bound from `$1`.
    fn insert_sql() -> String {
        let values = placeholders(1, Self::WRITE_COLUMNS.len());
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            Self::TABLE,
            Self::WRITE_COLUMNS.join(", "),
            values.join(", ")
        )
    }

    /// `UPDATE ... WHERE id = $1 RETURNING id`, values bound from `$2`.
    fn update_sql() -> String {
        let assignments: Vec<String> = Self::WRITE_COLUMNS
            .iter()
            .zip(placeholders(2, Self::WRITE_COLUMNS.len()))
            .map(|(column, p)| format!("{column} = {p}"))
            .collect();
        format!(
            "UPDATE {} SET {}, updated_at = NOW() WHERE id = $1 RETURNING id",
            Self::TABLE,
            assignments.join(", ")
        )
    }
}

/// `$start, $start+1, ...` for `count` parameters.
pub fn placeholders(start: usize, count: usize) -> Vec<String> {
    (start..start + count).map(|i| format!("${i}")).collect()
}

/// Provides list/get/create/update/delete for any [`Resource`].
pub struct ResourceRepo<R>(PhantomData<R>);

impl<R: Resource> ResourceRepo<R> {
    /// List all rows ordered by id, optionally narrowed to rows where any
    /// search column contains `filter` (case-insensitive).
    pub async fn list(pool: &PgPool, filter: Option<&str>) -> Result<Vec<R>, sqlx::Error> {
        let pattern = filter.and_then(contains_pattern);
        match pattern {
            Some(pattern) if !R::SEARCH_COLUMNS.is_empty() => {
                let predicate = R::SEARCH_COLUMNS
                    .iter()
                    .map(|column| format!("{column} ILIKE $1"))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                let query = format!(
                    "SELECT {} FROM {} WHERE {predicate} ORDER BY id ASC",
                    R::COLUMNS,
                    R::TABLE
                );
                sqlx::query_as::<_, R>(&query)
                    .bind(pattern)
                    .fetch_all(pool)
                    .await
            }
            _ => {
                let query = format!("SELECT {} FROM {} ORDER BY id ASC", R::COLUMNS, R::TABLE);
                sqlx::query_as::<_, R>(&query).fetch_all(pool).await
            }
        }
    }

    /// Find a row by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<R>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", R::COLUMNS, R::TABLE);
        sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a row, returning the generated id.
    pub async fn create(pool: &PgPool, input: &R::Input) -> Result<DbId, sqlx::Error> {
        let query = R::insert_sql();
        let row = R::bind(input, sqlx::query(&query)).fetch_one(pool).await?;
        row.try_get("id")
    }

    /// Overwrite a row's writable columns. Returns `false` if no row has `id`.
    pub async fn update(pool: &PgPool, id: DbId, input: &R::Input) -> Result<bool, sqlx::Error> {
        let query = R::update_sql();
        let row = R::bind(input, sqlx::query(&query).bind(id))
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Delete a row. Returns `false` if no row has `id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
