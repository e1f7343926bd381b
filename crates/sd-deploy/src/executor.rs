//! Deployment executor: runs selected changes one at a time.
//!
//! Each change moves through `Starting -> Running -> Completed | Failed`.
//! The start row is written before the script runs and the completion stamp
//! only after it exits with status 0, with no transaction around the pair.
//! A crash in between leaves an open row that the next run retries.

use crate::changelog::{self, StartOutcome};
use crate::context::DeployContext;
use crate::error::DeployResult;
use crate::progress::{DeployEvent, ProgressSink};
use crate::runner::{Invocation, ScriptRunner};
use sd_core::{ChangeFile, SelectionPolicy};

/// Exit status that marks a script as successful
pub const SUCCESS_CODE: i32 = 0;

/// Result of running one change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Script succeeded and `complete_dt` was written
    Completed { start: StartOutcome },
    /// Script failed or could not be started; the row stays open
    Failed {
        start: StartOutcome,
        exit_code: Option<i32>,
        reason: Option<String>,
    },
}

/// A change whose script did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedChange {
    pub change: ChangeFile,
    pub exit_code: Option<i32>,
    pub reason: Option<String>,
}

/// Summary of a deployment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub completed: Vec<ChangeFile>,
    pub failed: Vec<FailedChange>,
    /// Change numbers whose start row was left over from an earlier run
    pub retried: Vec<i64>,
}

impl DeployReport {
    /// True when every selected change completed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run every selected change in order.
///
/// A failing script is reported and skipped; changelog write errors abort
/// the run immediately.
pub async fn deploy(
    ctx: &DeployContext,
    runner: &dyn ScriptRunner,
    sink: &dyn ProgressSink,
) -> DeployResult<DeployReport> {
    sink.report(&DeployEvent::CurrentRevision {
        last_applied: ctx.last_applied,
    });
    sink.report(&DeployEvent::ToBeApplied {
        change_numbers: ctx.selected_numbers(),
    });
    if ctx.settings.policy == SelectionPolicy::CheckAll {
        sink.report(&DeployEvent::CheckAllEnabled);
    }

    let mut report = DeployReport::default();

    for change in &ctx.selection {
        let start = match apply_change(ctx, runner, sink, change).await? {
            ChangeOutcome::Completed { start } => {
                report.completed.push(change.clone());
                start
            }
            ChangeOutcome::Failed {
                start,
                exit_code,
                reason,
            } => {
                report.failed.push(FailedChange {
                    change: change.clone(),
                    exit_code,
                    reason,
                });
                start
            }
        };
        if start == StartOutcome::Restarted {
            report.retried.push(change.change_number);
        }
    }

    Ok(report)
}

/// Start, run, and (on success) complete a single change.
pub async fn apply_change(
    ctx: &DeployContext,
    runner: &dyn ScriptRunner,
    sink: &dyn ProgressSink,
    change: &ChangeFile,
) -> DeployResult<ChangeOutcome> {
    let delta_set = &ctx.settings.delta_set;

    let start = changelog::record_start(ctx.db(), ctx.timestamp(), delta_set, change).await?;
    if start == StartOutcome::Restarted {
        sink.report(&DeployEvent::Retrying {
            change_number: change.change_number,
        });
    }

    sink.report(&DeployEvent::Applying {
        change_number: change.change_number,
        file_name: change.file_name.clone(),
    });

    let invocation = Invocation::new(&ctx.settings.command, &change.path);
    let (exit_code, reason) = match runner.run(&invocation).await {
        Ok(code) => (Some(code), None),
        Err(e) => (None, Some(e.to_string())),
    };

    if exit_code == Some(SUCCESS_CODE) {
        changelog::record_complete(ctx.db(), ctx.timestamp(), delta_set, change.change_number)
            .await?;
        sink.report(&DeployEvent::Completed {
            change_number: change.change_number,
            file_name: change.file_name.clone(),
        });
        return Ok(ChangeOutcome::Completed { start });
    }

    sink.report(&DeployEvent::Failed {
        change_number: change.change_number,
        file_name: change.file_name.clone(),
        exit_code,
        reason: reason.clone(),
    });
    Ok(ChangeOutcome::Failed {
        start,
        exit_code,
        reason,
    })
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
