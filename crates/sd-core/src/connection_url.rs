//! Connection descriptor parsing.
//!
//! A descriptor has the form `scheme:parameters`. The scheme (everything
//! before the first colon) selects the dialect and the driver; the parameters
//! are handed to the driver untouched.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// A parsed `scheme:parameters` connection descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUrl {
    scheme: String,
    params: String,
}

impl ConnectionUrl {
    /// Split a descriptor at its first colon.
    ///
    /// # Examples
    /// ```
    /// use sd_core::ConnectionUrl;
    /// let url = ConnectionUrl::parse("duckdb::memory:").unwrap();
    /// assert_eq!(url.scheme(), "duckdb");
    /// assert_eq!(url.params(), ":memory:");
    /// ```
    pub fn parse(url: &str) -> CoreResult<Self> {
        match url.split_once(':') {
            Some((scheme, params)) if !scheme.is_empty() => Ok(Self {
                scheme: scheme.to_string(),
                params: params.to_string(),
            }),
            _ => Err(CoreError::InvalidConnectionUrl {
                url: url.to_string(),
            }),
        }
    }

    /// Scheme name used for dialect and driver lookup
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Driver-specific parameters after the first colon
    pub fn params(&self) -> &str {
        &self.params
    }
}

impl fmt::Display for ConnectionUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pdo_style_descriptor() {
        let url = ConnectionUrl::parse("mysql:host=localhost;dbname=test").unwrap();
        assert_eq!(url.scheme(), "mysql");
        assert_eq!(url.params(), "host=localhost;dbname=test");
        assert_eq!(url.to_string(), "mysql:host=localhost;dbname=test");
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let url = ConnectionUrl::parse("duckdb:C:/data/deploy.duckdb").unwrap();
        assert_eq!(url.scheme(), "duckdb");
        assert_eq!(url.params(), "C:/data/deploy.duckdb");
    }

    #[test]
    fn test_parse_empty_params() {
        let url = ConnectionUrl::parse("duckdb:").unwrap();
        assert_eq!(url.params(), "");
    }

    #[test]
    fn test_parse_without_colon_fails() {
        let err = ConnectionUrl::parse("deploy.duckdb").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConnectionUrl { .. }));
    }

    #[test]
    fn test_parse_empty_scheme_fails() {
        assert!(ConnectionUrl::parse(":memory:").is_err());
    }
}
