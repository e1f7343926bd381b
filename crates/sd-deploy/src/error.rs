//! Error types for deployment runs.

use sd_core::CoreError;
use sd_db::DbError;
use thiserror::Error;

/// Errors that abort a deployment run.
///
/// A script exiting non-zero is not an error; it is reported through the
/// progress sink and recorded in the [`DeployReport`](crate::DeployReport).
#[derive(Error, Debug)]
pub enum DeployError {
    /// Configuration, dialect, or catalog error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Connection or query failure (R001)
    #[error("[R001] Database error: {0}")]
    Database(#[from] DbError),

    /// Changelog table has not been created (R002)
    #[error("[R002] Changelog table '{table}' does not exist. Run `scriptdeploy init` to create it")]
    ChangelogMissing { table: String },

    /// Start row could not be written (R003)
    #[error("[R003] Could not record start of change #{change_number}: {source}")]
    RecordStart {
        change_number: i64,
        #[source]
        source: DbError,
    },

    /// Completion could not be written (R004)
    #[error("[R004] Could not record completion of change #{change_number}: {source}")]
    RecordComplete {
        change_number: i64,
        #[source]
        source: DbError,
    },

    /// Existing row for the change number belongs to another delta-set (R005)
    #[error("[R005] Change #{change_number} is already recorded outside delta-set '{delta_set}'")]
    StartConflict {
        change_number: i64,
        delta_set: String,
    },

    /// Changelog row could not be decoded (R006)
    #[error("[R006] Invalid changelog row: {0}")]
    InvalidRecord(String),
}

/// Result type alias for [`DeployError`].
pub type DeployResult<T> = Result<T, DeployError>;
