//! Init command implementation - creates the changelog table

use anyhow::{Context, Result};
use sd_core::DialectRegistry;
use sd_deploy::changelog::ensure_table;
use sd_deploy::{open_database, TABLE_NAME};

use crate::cli::GlobalArgs;
use crate::commands::common::load_config;

/// Execute the init command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let loaded = load_config(global, None)?;
    let (db, _) = open_database(&loaded.config, &DialectRegistry::builtin())
        .context("Failed to open database")?;

    let created = ensure_table(db.as_ref())
        .await
        .with_context(|| format!("Failed to create {}", TABLE_NAME))?;

    if created {
        println!("  ✓ Created {}", TABLE_NAME);
    } else {
        println!("  ✓ {} already exists", TABLE_NAME);
    }
    Ok(())
}
