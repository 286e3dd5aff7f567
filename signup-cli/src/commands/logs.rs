//! Logs command - inspect what happened to past submissions

use anyhow::Result;
use chrono::{Duration, Local, TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use signup_core::{EntryPoint, Field, LogEntry, LoggingService};

use super::get_data_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent events, newest first
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only events about this form field (e.g. email, dateOfBirth)
        #[arg(long)]
        field: Option<String>,
        /// Only events that carry an error
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which fields submissions were rejected on
    Rejections {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show event counts and where the log lives
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete events older than N days
    Clear {
        #[arg(long, default_value = "30")]
        older_than_days: u32,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let data_dir = get_data_dir()?;
    let service = LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))?;

    match command {
        LogsCommands::List {
            limit,
            field,
            errors,
            json,
        } => list(&service, limit, field.as_deref(), errors, json),
        LogsCommands::Rejections { json } => rejections(&service, json),
        LogsCommands::Stats { json } => stats(&service, json),
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => clear(&service, older_than_days, force, json),
    }
}

fn list(
    service: &LoggingService,
    limit: usize,
    field: Option<&str>,
    errors: bool,
    json: bool,
) -> Result<()> {
    // Accept any spelling Field understands, match on the stored camelCase name
    let field = field.map(|f| f.parse::<Field>()).transpose()?;

    let entries: Vec<LogEntry> = service
        .get_recent(usize::MAX)?
        .into_iter()
        .filter(|e| !errors || e.error_message.is_some())
        .filter(|e| match field {
            Some(f) => e.field.as_deref() == Some(f.as_str()),
            None => true,
        })
        .take(limit)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No matching events.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["When", "Event", "Field", "Command", "Error"]);
    for entry in &entries {
        table.add_row(vec![
            local_time(entry.timestamp),
            entry.event.clone(),
            entry.field.as_deref().map(field_label).unwrap_or_default(),
            entry.command.clone().unwrap_or_default(),
            entry.error_message.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn rejections(service: &LoggingService, json: bool) -> Result<()> {
    let counts = service.rejections_by_field()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    let total: u64 = counts.values().sum();
    if total == 0 {
        println!("No rejected fields recorded.");
        return Ok(());
    }

    // Known fields in form order, then anything an older version logged
    let mut rows: Vec<(String, u64)> = Field::ALL
        .iter()
        .filter_map(|f| counts.get(f.as_str()).map(|n| (f.label().to_string(), *n)))
        .collect();
    rows.extend(
        counts
            .iter()
            .filter(|(name, _)| name.parse::<Field>().is_err())
            .map(|(name, n)| (name.clone(), *n)),
    );

    let mut table = output::create_table();
    table.set_header(vec!["Field", "Rejections", "Share"]);
    for (label, n) in rows {
        table.add_row(vec![
            label,
            n.to_string(),
            format!("{:.0}%", n as f64 * 100.0 / total as f64),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn stats(service: &LoggingService, json: bool) -> Result<()> {
    let events = service.event_counts()?;
    let total: u64 = events.values().sum();
    let path = service.log_path();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "total": total,
                "events": events,
                "logPath": path.to_string_lossy(),
            })
        );
        return Ok(());
    }

    println!("{} {}", "Events:".bold(), total);
    for (event, n) in &events {
        println!("  {:<24} {}", event, n);
    }
    println!("{} {}", "Log:".bold(), path.display());
    Ok(())
}

fn clear(service: &LoggingService, older_than_days: u32, force: bool, json: bool) -> Result<()> {
    let cutoff = Utc::now() - Duration::days(i64::from(older_than_days));

    let confirmed = force
        || json
        || Confirm::new()
            .with_prompt(format!(
                "Delete events from before {}?",
                cutoff.with_timezone(&Local).format("%Y-%m-%d")
            ))
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    let deleted = service.delete_before(cutoff.timestamp_millis())?;
    if json {
        println!("{}", serde_json::json!({ "deleted": deleted }));
    } else {
        output::success(&format!("Deleted {} event(s)", deleted));
    }
    Ok(())
}

fn field_label(name: &str) -> String {
    name.parse::<Field>()
        .map(|f| f.label().to_string())
        .unwrap_or_else(|_| name.to_string())
}

fn local_time(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}
