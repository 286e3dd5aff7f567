//! Register command - fill in and submit the registration form

use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use dialoguer::{Input, Password};
use signup_core::{
    Field, FormState, LogEvent, OperationResult, RegistrationOutcome, UserRecord, FIELD_REJECTED,
};

use super::{get_context, get_logger, log_event};
use crate::output;

#[derive(Args)]
pub struct RegisterArgs {
    /// Full name (letters and spaces)
    #[arg(long)]
    full_name: Option<String>,
    /// Email address
    #[arg(long)]
    email: Option<String>,
    /// Password (prompted with hidden input if omitted)
    #[arg(long)]
    password: Option<String>,
    /// Password confirmation
    #[arg(long)]
    confirm_password: Option<String>,
    /// Phone number
    #[arg(long)]
    phone: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: Option<String>,
    /// Never prompt; missing fields are submitted empty
    #[arg(long)]
    no_input: bool,
    /// Output as JSON (implies --no-input)
    #[arg(long)]
    json: bool,
}

impl RegisterArgs {
    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => self.full_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Password => self.password.as_deref(),
            Field::ConfirmPassword => self.confirm_password.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::DateOfBirth => self.date_of_birth.as_deref(),
        }
    }
}

pub fn run(args: RegisterArgs) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("register"));

    let mut ctx = get_context()?;
    let interactive = !args.json && !args.no_input && atty::is(atty::Stream::Stdin);
    let today = ctx.registration_service.clock().today();

    let mut form = FormState::new();
    for field in Field::ALL {
        if let Some(value) = args.value(field) {
            form = form.change(field, value, today).blur(field, today);
        }
        if interactive && (args.value(field).is_none() || form.visible_error(field).is_some()) {
            form = prompt_until_valid(form, field, today)?;
        }
    }

    let (form, outcome) = ctx.registration_service.submit(form)?;

    match outcome {
        RegistrationOutcome::Registered { record } => {
            log_event(&logger, LogEvent::new("registration_stored").with_command("register"));

            if args.json {
                println!("{}", serde_json::to_string_pretty(&OperationResult::ok(&record))?);
                return Ok(());
            }

            if interactive {
                if let Some(until) = form.success_until {
                    let now = ctx.registration_service.clock().now();
                    let remaining = (until - now).to_std().unwrap_or_default();
                    output::transient_banner("Registration successful!", remaining)?;
                }
            }
            print_registered(&record);
            Ok(())
        }
        RegistrationOutcome::Rejected { errors } => {
            for field in errors.keys() {
                log_event(
                    &logger,
                    LogEvent::new(FIELD_REJECTED)
                        .with_command("register")
                        .with_field(field.as_str()),
                );
            }

            if args.json {
                let context: HashMap<String, serde_json::Value> = errors
                    .iter()
                    .map(|(field, msg)| (field.to_string(), serde_json::Value::from(msg.as_str())))
                    .collect();
                let result =
                    OperationResult::<UserRecord>::fail_with_context("Registration rejected", context);
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::error("Registration rejected:");
                for (field, msg) in &errors {
                    output::field_error(field.label(), msg);
                }
            }

            anyhow::bail!("{} field(s) invalid", errors.len())
        }
    }
}

/// Prompt for a field until it validates
///
/// Each answer is a change followed by a blur, so the error shown is the
/// one the form state holds for the now-touched field.
fn prompt_until_valid(mut form: FormState, field: Field, today: NaiveDate) -> Result<FormState> {
    loop {
        if let Some(msg) = form.visible_error(field) {
            output::field_error(field.label(), msg);
        }

        let value = prompt_value(field)?;
        form = form.change(field, value, today).blur(field, today);

        if form.visible_error(field).is_none() {
            return Ok(form);
        }
    }
}

fn prompt_value(field: Field) -> Result<String> {
    if field.is_secret() {
        return Ok(Password::new()
            .with_prompt(field.label())
            .allow_empty_password(true)
            .interact()?);
    }

    let prompt = match field {
        Field::DateOfBirth => format!("{} (YYYY-MM-DD)", field.label()),
        _ => field.label().to_string(),
    };
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

fn print_registered(record: &UserRecord) {
    output::success(&format!("✓ Registered {}", record.full_name));
    println!("  ID: {}", record.id);
    println!("  Email: {}", record.email);
    println!("  Registered at: {}", record.registered_at.to_rfc3339());
}
