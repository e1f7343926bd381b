//! Progress reporting for deployment runs.

use std::fmt;

/// Something worth telling the user while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Highest completed change number before the run
    CurrentRevision { last_applied: i64 },
    /// Change numbers selected for this run, in execution order
    ToBeApplied { change_numbers: Vec<i64> },
    /// CheckAll selection is active
    CheckAllEnabled,
    /// A script is about to run
    Applying { change_number: i64, file_name: String },
    /// An unfinished row from an earlier attempt is being reused
    Retrying { change_number: i64 },
    /// A script exited successfully and its completion was recorded
    Completed { change_number: i64, file_name: String },
    /// A script failed; its row stays open for a later run
    Failed {
        change_number: i64,
        file_name: String,
        exit_code: Option<i32>,
        reason: Option<String>,
    },
}

impl fmt::Display for DeployEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployEvent::CurrentRevision { last_applied } => {
                write!(f, "Current script revision: {last_applied}")
            }
            DeployEvent::ToBeApplied { change_numbers } => {
                if change_numbers.is_empty() {
                    write!(f, "To be applied: (None)")
                } else {
                    let list: Vec<String> = change_numbers.iter().map(i64::to_string).collect();
                    write!(f, "To be applied: {}", list.join(", "))
                }
            }
            DeployEvent::CheckAllEnabled => {
                write!(f, "Applying all scripts regardless of delta number order.")
            }
            DeployEvent::Applying {
                change_number,
                file_name,
            } => write!(f, "Applying #{change_number}: {file_name}..."),
            DeployEvent::Retrying { change_number } => write!(
                f,
                "Change #{change_number} did not complete previously, retrying"
            ),
            DeployEvent::Completed {
                change_number,
                file_name,
            } => write!(f, "Applied #{change_number}: {file_name}"),
            DeployEvent::Failed {
                change_number,
                file_name,
                exit_code,
                reason,
            } => {
                write!(f, "Script #{change_number} ({file_name}) was not applied")?;
                match (exit_code, reason) {
                    (Some(code), _) => write!(f, " because it failed with code: {code}"),
                    (None, Some(reason)) => {
                        write!(f, " because it could not be started: {reason}")
                    }
                    (None, None) => Ok(()),
                }
            }
        }
    }
}

/// Receives [`DeployEvent`]s as they happen.
pub trait ProgressSink: Send + Sync {
    /// Handle one event
    fn report(&self, event: &DeployEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&self, event: &DeployEvent) {
        match event {
            DeployEvent::Failed { .. } => log::warn!("{event}"),
            DeployEvent::Retrying { .. } => log::debug!("{event}"),
            _ => log::info!("{event}"),
        }
    }
}
