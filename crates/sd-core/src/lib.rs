//! sd-core - Core library for scriptdeploy
//!
//! This crate provides configuration parsing, connection URL handling, the
//! dialect registry, change catalog discovery, and the selection engine used
//! across all scriptdeploy components. Nothing in here touches a database.

pub mod catalog;
pub mod config;
pub mod connection_url;
pub mod delta_set;
pub mod dialect;
pub mod error;
pub mod selection;
pub mod sql_utils;

pub use catalog::{list_changes, parse_change_number, ChangeCatalog, ChangeFile};
pub use config::{DeployConfig, DEFAULT_COMMAND, DEFAULT_DELTA_SET};
pub use connection_url::ConnectionUrl;
pub use delta_set::DeltaSet;
pub use dialect::{DialectRegistry, TimestampSyntax};
pub use error::{CoreError, CoreResult};
pub use selection::{last_applied, select, AppliedSet, SelectionPolicy};
