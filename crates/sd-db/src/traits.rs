//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// One result row with every column rendered as optional text
pub type TextRow = Vec<Option<String>>;

/// Database abstraction trait for scriptdeploy
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Run a query and collect its first column as integers
    async fn query_i64_column(&self, sql: &str) -> DbResult<Vec<i64>>;

    /// Run a query and collect the first `columns` columns of every row as text.
    ///
    /// Columns should be cast to a text type in the query; NULLs come back
    /// as `None`.
    async fn query_text_rows(&self, sql: &str, columns: usize) -> DbResult<Vec<TextRow>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
