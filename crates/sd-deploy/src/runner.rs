//! External script execution.

use async_trait::async_trait;
use sd_core::DEFAULT_COMMAND;
use std::path::{Path, PathBuf};

/// A fully resolved script invocation: `program args... script`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to launch
    pub program: String,
    /// Leading arguments from the command prefix
    pub args: Vec<String>,
    /// Absolute path of the script, passed as the last argument
    pub script: PathBuf,
}

impl Invocation {
    /// Build an invocation from a command prefix such as `php` or `bash -e`.
    ///
    /// The prefix is split on whitespace; no shell is involved. A blank
    /// prefix falls back to [`DEFAULT_COMMAND`].
    pub fn new(command: &str, script: &Path) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_else(|| DEFAULT_COMMAND.to_string());
        Self {
            program,
            args: parts.collect(),
            script: script.to_path_buf(),
        }
    }

    /// Human-readable command line for logs
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push(' ');
        line.push_str(&self.script.display().to_string());
        line
    }
}

/// Runs one script and reports its exit status.
///
/// Implementations block (asynchronously) until the script exits. An `Err`
/// means the process could not be started at all.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Execute `invocation`, returning the process exit code
    async fn run(&self, invocation: &Invocation) -> std::io::Result<i32>;
}

/// Runs scripts as child processes that share this process's stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl ScriptRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<i32> {
        log::debug!("Running {}", invocation.command_line());
        let status = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .arg(&invocation.script)
            .status()
            .await?;
        // Killed by a signal: no exit code
        Ok(status.code().unwrap_or(-1))
    }
}
