//! Remove command - delete a registered user by id

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use signup_core::LogEvent;

use super::{get_context, get_logger, log_event};

pub fn run(id: &str, force: bool, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("remove"));

    let mut ctx = get_context()?;

    let Some(record) = ctx
        .registration_service
        .load_all()
        .iter()
        .find(|r| r.id == id)
        .cloned()
    else {
        // Removing an absent record is a no-op, not a failure
        if json {
            println!("{}", serde_json::json!({"id": id, "removed": false}));
        } else {
            println!("{}", format!("Record '{}' not found, nothing to remove", id).dimmed());
        }
        return Ok(());
    };

    // Confirm removal unless --force
    if !force && !json {
        println!(
            "\n{}",
            format!("This will remove {} <{}>.", record.full_name, record.email).yellow()
        );

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let removed = ctx.registration_service.remove_by_id(id)?;
    log_event(&logger, LogEvent::new("registration_removed").with_command("remove"));

    if json {
        println!("{}", serde_json::json!({"id": id, "removed": removed}));
    } else {
        println!("\n{} Record '{}' removed\n", "✓".green(), id);
    }

    Ok(())
}
