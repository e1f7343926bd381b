//! Deploy command implementation - runs pending change scripts

use anyhow::{Context, Result};
use sd_core::DialectRegistry;
use sd_deploy::{deploy, DeployContext, ProcessRunner};

use crate::cli::{DeployArgs, GlobalArgs};
use crate::commands::common::{load_config, ConsoleSink, ExitCode, LoadedConfig};

/// Execute the deploy command
pub(crate) async fn execute(args: &DeployArgs, global: &GlobalArgs) -> Result<()> {
    let LoadedConfig { mut config, root } = load_config(global, Some(&args.selection))?;
    if let Some(command) = &args.custom_command {
        config.custom_command = Some(command.clone());
        config.validate().context("Invalid configuration")?;
    }

    let ctx = DeployContext::open(&config, &root, &DialectRegistry::builtin())
        .await
        .context("Failed to prepare deployment")?;

    if global.verbose {
        eprintln!(
            "[verbose] {} script(s) in {}, command: {}",
            ctx.catalog.len(),
            ctx.settings.script_dir.display(),
            ctx.settings.command
        );
    }

    let sink = ConsoleSink {
        verbose: global.verbose,
    };
    let report = deploy(&ctx, &ProcessRunner, &sink)
        .await
        .context("Deployment aborted")?;

    println!(
        "\nDone. {} applied, {} failed",
        report.completed.len(),
        report.failed.len()
    );
    if !report.retried.is_empty() {
        println!("Resumed unfinished change(s): {:?}", report.retried);
    }

    if !report.is_success() {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
