//! SQL literal helpers for building changelog statements.

/// Escape a value for use inside a single-quoted SQL string literal.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render a value as a complete single-quoted SQL string literal.
///
/// # Examples
/// ```
/// use sd_core::sql_utils::quote_literal;
/// assert_eq!(quote_literal("Main"), "'Main'");
/// assert_eq!(quote_literal("it's.sql"), "'it''s.sql'");
/// ```
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_sql_string(value))
}
