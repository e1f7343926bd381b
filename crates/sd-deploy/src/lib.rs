//! sd-deploy - Changelog state machine and script execution.
//!
//! Reads which changes a delta-set has completed, selects the scripts that
//! still need to run, and brackets each script execution with start and
//! completion rows in the `script_changelog` table.
//!
//! ```rust,no_run
//! use sd_core::{DeployConfig, DialectRegistry};
//! use sd_deploy::{deploy, DeployContext, LogSink, ProcessRunner};
//! use std::path::Path;
//!
//! # async fn run() -> sd_deploy::DeployResult<()> {
//! let config = DeployConfig::load_from_dir(Path::new("."))?;
//! let ctx = DeployContext::open(&config, Path::new("."), &DialectRegistry::builtin()).await?;
//! let report = deploy(&ctx, &ProcessRunner, &LogSink).await?;
//! println!("{} completed, {} failed", report.completed.len(), report.failed.len());
//! # Ok(())
//! # }
//! ```

pub mod changelog;
pub mod context;
pub mod error;
pub mod executor;
pub mod progress;
pub mod runner;

pub use changelog::{ChangeRecord, StartOutcome, APPLIED_BY, TABLE_NAME};
pub use context::{open_database, DeployContext, RunSettings};
pub use error::{DeployError, DeployResult};
pub use executor::{deploy, ChangeOutcome, DeployReport, FailedChange};
pub use progress::{DeployEvent, LogSink, ProgressSink};
pub use runner::{Invocation, ProcessRunner, ScriptRunner};
