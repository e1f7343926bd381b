//! sd-db - Database abstraction layer for scriptdeploy
//!
//! This crate provides the `Database` trait, the DuckDB backend, and the
//! driver factory that turns a connection descriptor into a live handle.

pub mod connect;
pub mod duckdb;
pub mod error;
pub mod traits;

pub use connect::{connect, Credentials};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, TextRow};
