//! Status command implementation - reports changelog state without running scripts

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sd_core::DialectRegistry;
use sd_deploy::changelog::{fetch_records, ChangeRecord};
use sd_deploy::DeployContext;
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::load_config;

/// Status document emitted by `--output json`
#[derive(Debug, Serialize)]
struct StatusReport {
    generated_at: DateTime<Utc>,
    delta_set: String,
    policy: String,
    last_applied: i64,
    applied: Vec<i64>,
    pending: Vec<PendingChange>,
    incomplete: Vec<IncompleteChange>,
}

#[derive(Debug, Serialize)]
struct PendingChange {
    change_number: i64,
    file_name: String,
}

/// A changelog row whose script has started but never completed
#[derive(Debug, Serialize)]
struct IncompleteChange {
    change_number: i64,
    start_dt: String,
    description: String,
}

impl From<&ChangeRecord> for IncompleteChange {
    fn from(record: &ChangeRecord) -> Self {
        Self {
            change_number: record.change_number,
            start_dt: record.start_dt.clone(),
            description: record.description.clone(),
        }
    }
}

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let loaded = load_config(global, Some(&args.selection))?;
    let ctx = DeployContext::open(&loaded.config, &loaded.root, &DialectRegistry::builtin())
        .await
        .context("Failed to read deployment state")?;

    let records = fetch_records(ctx.db(), &ctx.settings.delta_set)
        .await
        .context("Failed to read changelog")?;
    log::debug!(
        "{} changelog row(s) for delta_set {}",
        records.len(),
        ctx.settings.delta_set
    );

    let report = StatusReport {
        generated_at: Utc::now(),
        delta_set: ctx.settings.delta_set.to_string(),
        policy: ctx.settings.policy.to_string(),
        last_applied: ctx.last_applied,
        applied: ctx.applied.iter().copied().collect(),
        pending: ctx
            .selection
            .iter()
            .map(|c| PendingChange {
                change_number: c.change_number,
                file_name: c.file_name.clone(),
            })
            .collect(),
        incomplete: records
            .iter()
            .filter(|r| !r.is_complete())
            .map(IncompleteChange::from)
            .collect(),
    };

    match args.output {
        OutputFormat::Table => print_report(&report),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_report(report: &StatusReport) {
    println!("Delta set:      {}", report.delta_set);
    println!("Policy:         {}", report.policy);
    println!("Last applied:   {}", report.last_applied);
    println!("Applied count:  {}", report.applied.len());
    println!();

    if report.pending.is_empty() {
        println!("No pending changes");
    } else {
        let rows: Vec<Vec<String>> = report
            .pending
            .iter()
            .map(|p| vec![p.change_number.to_string(), p.file_name.clone()])
            .collect();
        print_table(&["CHANGE", "FILE"], &rows);
    }

    if !report.incomplete.is_empty() {
        println!();
        println!("Started but not completed:");
        let rows: Vec<Vec<String>> = report
            .incomplete
            .iter()
            .map(|c| {
                vec![
                    c.change_number.to_string(),
                    c.start_dt.clone(),
                    c.description.clone(),
                ]
            })
            .collect();
        print_table(&["CHANGE", "STARTED", "DESCRIPTION"], &rows);
    }
}

/// Print rows as a left-aligned table with a dashed separator
fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max(h.len())
        })
        .collect();

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", format_row(headers.to_vec()));
    println!(
        "{}",
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        println!("{}", format_row(row.iter().map(String::as_str).collect()));
    }
}
