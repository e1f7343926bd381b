//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// scriptdeploy - apply numbered change scripts and track them in a changelog table
#[derive(Parser, Debug)]
#[command(name = "scriptdeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Connection URL, e.g. duckdb:deploy.duckdb
    #[arg(long, global = true, env = "SCRIPTDEPLOY_URL")]
    pub url: Option<String>,

    /// Database user
    #[arg(short, long, global = true, env = "SCRIPTDEPLOY_USER")]
    pub userid: Option<String>,

    /// Database password
    #[arg(long, global = true, env = "SCRIPTDEPLOY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending change scripts
    Deploy(DeployArgs),

    /// Show applied and pending changes without running anything
    Status(StatusArgs),

    /// Create the changelog table
    Init,
}

/// Options that decide which changes a run selects
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Directory containing change scripts
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Changelog partition to read and write
    #[arg(long)]
    pub delta_set: Option<String>,

    /// Apply every change that is not complete, even below the current
    /// revision. `--checkall=false` overrides a config file that enables it
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub checkall: Option<bool>,
}

/// Arguments for the deploy command
#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Command prefix used to run each script (default: php)
    #[arg(long = "command")]
    pub custom_command: Option<String>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats for reporting commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON document
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
