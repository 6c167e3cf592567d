//! Number allocation
//!
//! Reads the numbers already issued under a prefix while holding a
//! transaction-scoped advisory lock on that prefix. Two requests creating
//! jobs of the same type in the same year are serialized until the first
//! commits; the UNIQUE constraints on `jobs.job_number` and
//! `invoices.number` back this up.

use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::services::job_number::{next_number, NumberSeries};
use crate::utils::errors::AppResult;

fn table_and_column(series: NumberSeries) -> (&'static str, &'static str) {
    match series {
        NumberSeries::Job(_) => ("jobs", "job_number"),
        NumberSeries::Invoice => ("invoices", "number"),
    }
}

/// Next free number for `series` in the current year. The lock is held
/// until `tx` commits or rolls back.
pub async fn allocate_number(
    tx: &mut Transaction<'_, Postgres>,
    series: NumberSeries,
) -> AppResult<String> {
    let prefix = series.current_prefix();

    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(&prefix)
        .execute(&mut **tx)
        .await?;

    let (table, column) = table_and_column(series);
    let sql = format!(
        "SELECT {column} FROM {table} WHERE {column} LIKE $1 || '%'",
        column = column,
        table = table
    );
    let existing: Vec<String> = sqlx::query_scalar(&sql)
        .bind(&prefix)
        .fetch_all(&mut **tx)
        .await?;

    let number = next_number(&prefix, existing.iter().map(String::as_str));
    debug!("Allocated {} ({} existing under {})", number, existing.len(), prefix);
    Ok(number)
}
