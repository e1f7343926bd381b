//! Error types for sd-core

use thiserror::Error;

/// Core error type for scriptdeploy
#[derive(Error, Debug)]
pub enum CoreError {
    /// S001: Configuration file not found
    #[error("[S001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// S002: Failed to parse configuration file
    #[error("[S002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// S003: Invalid configuration value
    #[error("[S003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// S004: Connection URL has no `scheme:` prefix
    #[error("[S004] Invalid connection URL '{url}': expected 'scheme:parameters'")]
    InvalidConnectionUrl { url: String },

    /// S005: Connection scheme has no registered dialect
    #[error("[S005] '{scheme}' is not a supported database dialect. Supported: {supported}")]
    UnsupportedDialect { scheme: String, supported: String },

    /// S006: Script directory missing or not a directory
    #[error("[S006] Script directory does not exist: {path}")]
    DirectoryNotFound { path: String },

    /// S007: Digit run in a file name does not fit a change number
    #[error("[S007] Change number '{digits}' in '{file_name}' is out of range")]
    InvalidChangeNumber { file_name: String, digits: String },

    /// S008: Two script files map to the same change number
    #[error("[S008] Duplicate change number {change_number}: '{first}' and '{second}'")]
    DuplicateChangeNumber {
        change_number: i64,
        first: String,
        second: String,
    },

    /// S009: IO error with file path context
    #[error("[S009] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
