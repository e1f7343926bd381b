//! The `script_changelog` table: DDL, reads, and the start/complete writes.
//!
//! One row exists per `(change_number, delta_set)`. A row with a NULL
//! `complete_dt` is an attempt that started but never finished; the next run
//! that selects the change reuses it by updating `start_dt`.

use crate::error::{DeployError, DeployResult};
use sd_core::sql_utils::quote_literal;
use sd_core::{AppliedSet, ChangeFile, DeltaSet};
use sd_db::{Database, DbError, TextRow};

/// Fixed changelog table name
pub const TABLE_NAME: &str = "script_changelog";

/// Identity recorded in `applied_by`
pub const APPLIED_BY: &str = "scriptdeploy";

/// DDL for the changelog table
pub fn create_table_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
    change_number BIGINT NOT NULL,
    delta_set VARCHAR(10) NOT NULL,
    start_dt TIMESTAMP NOT NULL,
    complete_dt TIMESTAMP,
    applied_by VARCHAR(100) NOT NULL,
    description VARCHAR(500) NOT NULL,
    PRIMARY KEY (change_number, delta_set)
)"
    )
}

/// Create the changelog table if it does not exist.
///
/// Returns `true` when the table was created by this call.
pub async fn ensure_table(db: &dyn Database) -> DeployResult<bool> {
    if db.relation_exists(TABLE_NAME).await? {
        return Ok(false);
    }
    db.execute_batch(&create_table_sql()).await?;
    Ok(true)
}

fn missing_table(err: DbError) -> DeployError {
    match err {
        DbError::TableNotFound(_) => DeployError::ChangelogMissing {
            table: TABLE_NAME.to_string(),
        },
        other => DeployError::Database(other),
    }
}

/// Change numbers in `delta_set` whose `complete_dt` is set.
///
/// An empty set is a normal result, not an error.
pub async fn applied_change_numbers(
    db: &dyn Database,
    delta_set: &DeltaSet,
) -> DeployResult<AppliedSet> {
    let sql = format!(
        "SELECT change_number FROM {TABLE_NAME} \
         WHERE delta_set = {} AND complete_dt IS NOT NULL \
         ORDER BY change_number",
        quote_literal(delta_set)
    );
    let numbers = db.query_i64_column(&sql).await.map_err(missing_table)?;
    Ok(numbers.into_iter().collect())
}

/// How the start of a change was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A fresh row was inserted
    Inserted,
    /// A row from an earlier unfinished attempt had its `start_dt` refreshed
    Restarted,
}

/// Write the start row for `change`, reusing a leftover row on key conflict.
///
/// Only a duplicate-key failure triggers the update; any other insert failure
/// is returned to the caller.
pub async fn record_start(
    db: &dyn Database,
    timestamp: &str,
    delta_set: &DeltaSet,
    change: &ChangeFile,
) -> DeployResult<StartOutcome> {
    let insert = format!(
        "INSERT INTO {TABLE_NAME} (change_number, delta_set, start_dt, applied_by, description) \
         VALUES ({}, {}, {}, {}, {})",
        change.change_number,
        quote_literal(delta_set),
        timestamp,
        quote_literal(APPLIED_BY),
        quote_literal(&change.file_name)
    );

    match db.execute(&insert).await {
        Ok(_) => Ok(StartOutcome::Inserted),
        Err(err) if err.is_duplicate_key() => {
            log::debug!(
                "Change #{} already has a start row, refreshing start_dt",
                change.change_number
            );
            let update = format!(
                "UPDATE {TABLE_NAME} SET start_dt = {} \
                 WHERE change_number = {} AND delta_set = {}",
                timestamp,
                change.change_number,
                quote_literal(delta_set)
            );
            let updated = db
                .execute(&update)
                .await
                .map_err(|source| DeployError::RecordStart {
                    change_number: change.change_number,
                    source,
                })?;
            if updated == 0 {
                return Err(DeployError::StartConflict {
                    change_number: change.change_number,
                    delta_set: delta_set.to_string(),
                });
            }
            Ok(StartOutcome::Restarted)
        }
        Err(DbError::TableNotFound(_)) => Err(DeployError::ChangelogMissing {
            table: TABLE_NAME.to_string(),
        }),
        Err(source) => Err(DeployError::RecordStart {
            change_number: change.change_number,
            source,
        }),
    }
}

/// Stamp `complete_dt` on the row for `change_number`.
pub async fn record_complete(
    db: &dyn Database,
    timestamp: &str,
    delta_set: &DeltaSet,
    change_number: i64,
) -> DeployResult<()> {
    let update = format!(
        "UPDATE {TABLE_NAME} SET complete_dt = {} \
         WHERE change_number = {} AND delta_set = {}",
        timestamp,
        change_number,
        quote_literal(delta_set)
    );
    let updated = db
        .execute(&update)
        .await
        .map_err(|source| DeployError::RecordComplete {
            change_number,
            source,
        })?;
    if updated != 1 {
        log::warn!("Completion of change #{change_number} touched {updated} changelog rows");
    }
    Ok(())
}

/// A changelog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub change_number: i64,
    pub delta_set: String,
    pub start_dt: String,
    pub complete_dt: Option<String>,
    pub applied_by: String,
    pub description: String,
}

impl ChangeRecord {
    /// Whether the change finished successfully
    pub fn is_complete(&self) -> bool {
        self.complete_dt.is_some()
    }
}

/// All rows for `delta_set`, ordered by change number.
pub async fn fetch_records(
    db: &dyn Database,
    delta_set: &DeltaSet,
) -> DeployResult<Vec<ChangeRecord>> {
    let sql = format!(
        "SELECT CAST(change_number AS VARCHAR), delta_set, CAST(start_dt AS VARCHAR), \
         CAST(complete_dt AS VARCHAR), applied_by, description \
         FROM {TABLE_NAME} WHERE delta_set = {} ORDER BY change_number",
        quote_literal(delta_set)
    );
    let rows = db.query_text_rows(&sql, 6).await.map_err(missing_table)?;
    rows.into_iter().map(decode_record).collect()
}

fn decode_record(row: TextRow) -> DeployResult<ChangeRecord> {
    let [number, delta_set, start_dt, complete_dt, applied_by, description]: [Option<String>; 6] =
        row.try_into().map_err(|row: TextRow| {
            DeployError::InvalidRecord(format!("expected 6 columns, got {}", row.len()))
        })?;
    let required = |value: Option<String>, column: &str| {
        value.ok_or_else(|| DeployError::InvalidRecord(format!("{column} is NULL")))
    };

    let number = required(number, "change_number")?;
    let change_number = number.parse::<i64>().map_err(|_| {
        DeployError::InvalidRecord(format!("change_number '{number}' is not an integer"))
    })?;

    Ok(ChangeRecord {
        change_number,
        delta_set: required(delta_set, "delta_set")?,
        start_dt: required(start_dt, "start_dt")?,
        complete_dt,
        applied_by: required(applied_by, "applied_by")?,
        description: required(description, "description")?,
    })
}

#[cfg(test)]
#[path = "changelog_test.rs"]
mod tests;
