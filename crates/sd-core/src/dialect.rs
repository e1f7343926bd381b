//! Dialect registry: maps a connection scheme to its timestamp syntax.
//!
//! Each dialect contributes one capability, a SQL expression meaning "now".
//! The registry is open: callers can [`register`](DialectRegistry::register)
//! additional dialects without touching the lookup code.

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Dialect-specific generator for the "current timestamp" SQL expression.
///
/// The returned text is embedded verbatim into changelog statements, so it
/// must be a complete expression valid in a `VALUES (...)` list or a
/// `SET col = ...` clause.
pub trait TimestampSyntax: Send + Sync {
    /// SQL expression evaluating to the current time
    fn current_timestamp_literal(&self) -> String;
}

/// A dialect whose timestamp expression is a fixed string.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestamp(pub &'static str);

impl TimestampSyntax for FixedTimestamp {
    fn current_timestamp_literal(&self) -> String {
        self.0.to_string()
    }
}

/// SQLite stores changelog times as epoch seconds
pub const SQLITE_TIMESTAMP: FixedTimestamp = FixedTimestamp("strftime('%s','now')");
/// MySQL
pub const MYSQL_TIMESTAMP: FixedTimestamp = FixedTimestamp("NOW()");
/// SQL Server (also used for ODBC connections)
pub const MSSQL_TIMESTAMP: FixedTimestamp = FixedTimestamp("DATEDIFF(s, '19700101', GETDATE())");
/// PostgreSQL
pub const PGSQL_TIMESTAMP: FixedTimestamp = FixedTimestamp("NOW()");
/// Oracle
pub const ORACLE_TIMESTAMP: FixedTimestamp =
    FixedTimestamp("(sysdate - to_date('01-JAN-1970','DD-MON-YYYY')) * (86400)");
/// DuckDB
pub const DUCKDB_TIMESTAMP: FixedTimestamp = FixedTimestamp("now()");

/// Registry of dialects keyed by connection scheme.
#[derive(Clone, Default)]
pub struct DialectRegistry {
    dialects: BTreeMap<String, Arc<dyn TimestampSyntax>>,
}

impl std::fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("schemes", &self.dialects.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DialectRegistry {
    /// Empty registry with no dialects
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in dialect.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("sqlite", Arc::new(SQLITE_TIMESTAMP));
        registry.register("mysql", Arc::new(MYSQL_TIMESTAMP));
        registry.register("mssql", Arc::new(MSSQL_TIMESTAMP));
        registry.register("odbc", Arc::new(MSSQL_TIMESTAMP));
        registry.register("pgsql", Arc::new(PGSQL_TIMESTAMP));
        registry.register("oci", Arc::new(ORACLE_TIMESTAMP));
        registry.register("duckdb", Arc::new(DUCKDB_TIMESTAMP));
        registry
    }

    /// Add or replace the dialect for `scheme`.
    pub fn register(&mut self, scheme: impl Into<String>, syntax: Arc<dyn TimestampSyntax>) {
        self.dialects.insert(scheme.into(), syntax);
    }

    /// Look up the dialect for `scheme` (exact, case-sensitive match).
    pub fn resolve(&self, scheme: &str) -> CoreResult<Arc<dyn TimestampSyntax>> {
        self.dialects
            .get(scheme)
            .cloned()
            .ok_or_else(|| CoreError::UnsupportedDialect {
                scheme: scheme.to_string(),
                supported: self.supported().join(", "),
            })
    }

    /// Registered scheme names in sorted order
    pub fn supported(&self) -> Vec<&str> {
        self.dialects.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
