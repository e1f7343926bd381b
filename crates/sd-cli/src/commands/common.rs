//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sd_core::{DeltaSet, DeployConfig};
use sd_deploy::{DeployEvent, ProgressSink};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalArgs, SelectionArgs};

/// Error type representing a non-zero process exit code.
///
/// Return `Err(ExitCode(N).into())` instead of calling
/// `std::process::exit(N)` so destructors still run.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty on purpose: main() handles this variant without printing it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// A loaded configuration together with the directory it is relative to.
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub(crate) config: DeployConfig,
    pub(crate) root: PathBuf,
}

/// Load the config file (if any) and layer command-line overrides on top.
///
/// An explicit `--config` path must exist. Without one, the project
/// directory is searched and a missing file falls back to defaults so a
/// run can be driven entirely by flags and environment variables.
pub(crate) fn load_config(
    global: &GlobalArgs,
    selection: Option<&SelectionArgs>,
) -> Result<LoadedConfig> {
    let root = PathBuf::from(&global.project_dir);

    let mut config = match &global.config {
        Some(path) => DeployConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => match DeployConfig::find_in_dir(&root) {
            Some(path) => DeployConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => DeployConfig::default(),
        },
    };

    if let Some(url) = &global.url {
        config.url = Some(url.clone());
    }
    if let Some(userid) = &global.userid {
        config.userid = Some(userid.clone());
    }
    if let Some(password) = &global.password {
        config.password = Some(password.clone());
    }

    if let Some(selection) = selection {
        if let Some(dir) = &selection.dir {
            config.dir = dir.clone();
        }
        if let Some(delta_set) = &selection.delta_set {
            config.delta_set = DeltaSet::try_new(delta_set.as_str())
                .context("--delta-set must not be empty")?;
        }
        if let Some(checkall) = selection.checkall {
            config.checkall = checkall;
        }
    }

    config.validate().context("Invalid configuration")?;

    if global.verbose {
        eprintln!("[verbose] {:?}", config);
    }

    Ok(LoadedConfig { config, root })
}

/// Prints deployment progress to the terminal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleSink {
    pub(crate) verbose: bool,
}

impl ProgressSink for ConsoleSink {
    fn report(&self, event: &DeployEvent) {
        match event {
            DeployEvent::Completed {
                change_number,
                file_name,
            } => println!("  ✓ #{} {}", change_number, file_name),
            DeployEvent::Failed { .. } => eprintln!("  ✗ {}", event),
            DeployEvent::Retrying { .. } => {
                if self.verbose {
                    eprintln!("[verbose] {}", event);
                }
            }
            _ => println!("{}", event),
        }
    }
}
