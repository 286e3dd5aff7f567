//! Validate command - check one field value without submitting

use anyhow::Result;
use colored::Colorize;
use signup_core::Field;

use super::get_context;

pub fn run(field: &str, value: &str, password: &str, json: bool) -> Result<()> {
    let field: Field = field.parse()?;
    let ctx = get_context()?;
    let result = ctx.registration_service.validate_field(field, value, password);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "field": field,
                "valid": result.is_ok(),
                "error": result.err(),
            })
        );
        return Ok(());
    }

    match result {
        Ok(()) => println!("{} {} is valid", "✓".green(), field.label()),
        Err(msg) => {
            println!("{} {}: {}", "✗".red(), field.label(), msg);
            std::process::exit(1);
        }
    }

    Ok(())
}
