//! List command - show registered users

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let records = ctx.registration_service.load_all();

    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No registered users yet".dimmed());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Full name", "Email", "Phone", "Date of birth", "Registered"]);

    for record in records {
        table.add_row(vec![
            record.id.clone(),
            record.full_name.clone(),
            record.email.clone(),
            record.phone.clone(),
            record.date_of_birth.clone(),
            record.registered_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{}", "Registered Users".bold());
    println!("{}", table);
    println!("{} total", records.len());

    Ok(())
}
