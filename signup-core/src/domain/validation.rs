//! Field validation rules
//!
//! Every rule is a pure function of the field value plus a small context
//! (the sibling password and today's date). Rules run in a fixed order and
//! the first failing rule's message is the field's only error.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::registration::{Field, RegistrationInput};

/// Characters that satisfy the password special-character rule
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_PHONE_DIGITS: usize = 10;
pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 120;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+0-9\s\-()]+$").unwrap());

/// Field name → error message, in form order. Empty means acceptable.
pub type FieldErrors = BTreeMap<Field, String>;

/// Values a rule may need besides the field's own value
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Current value of the password field, for `confirmPassword`
    pub password: &'a str,
    /// Today's date, for the age rule
    pub today: NaiveDate,
}

impl<'a> ValidationContext<'a> {
    pub fn new(password: &'a str, today: NaiveDate) -> Self {
        Self { password, today }
    }
}

/// Validate one field value
pub fn validate_field(
    field: Field,
    value: &str,
    ctx: &ValidationContext<'_>,
) -> Result<(), &'static str> {
    match field {
        Field::FullName => validate_full_name(value),
        Field::Email => validate_email(value),
        Field::Password => validate_password(value),
        Field::ConfirmPassword => validate_confirm_password(value, ctx.password),
        Field::Phone => validate_phone(value),
        Field::DateOfBirth => validate_date_of_birth(value, ctx.today),
    }
}

/// Validate every field of an input
pub fn validate_all(input: &RegistrationInput, today: NaiveDate) -> FieldErrors {
    let ctx = ValidationContext::new(&input.password, today);
    Field::ALL
        .iter()
        .filter_map(|&field| {
            validate_field(field, input.get(field), &ctx)
                .err()
                .map(|msg| (field, msg.to_string()))
        })
        .collect()
}

pub fn validate_full_name(value: &str) -> Result<(), &'static str> {
    let name = value.trim();
    if name.is_empty() {
        return Err("Full name is required");
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err("Full name must be at least 2 characters");
    }
    if !NAME_RE.is_match(name) {
        return Err("Full name can only contain letters and spaces");
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), &'static str> {
    let email = value.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Please enter a valid email address");
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Password is required");
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain a lowercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain an uppercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a number");
    }
    if !value.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err("Password must contain a special character (@$!%*?&)");
    }
    Ok(())
}

pub fn validate_confirm_password(value: &str, password: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Please confirm your password");
    }
    if value != password {
        return Err("Passwords do not match");
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), &'static str> {
    let phone = value.trim();
    if phone.is_empty() {
        return Err("Phone number is required");
    }
    if !PHONE_RE.is_match(phone) {
        return Err("Please enter a valid phone number");
    }
    if phone.chars().filter(|c| c.is_ascii_digit()).count() < MIN_PHONE_DIGITS {
        return Err("Phone number must have at least 10 digits");
    }
    Ok(())
}

pub fn validate_date_of_birth(value: &str, today: NaiveDate) -> Result<(), &'static str> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("Date of birth is required");
    }
    let Some(birth) = parse_date(raw) else {
        return Err("Please enter a valid date");
    };

    let age = age_in_years(birth, today);
    if age < MIN_AGE {
        return Err("You must be at least 13 years old");
    }
    if age > MAX_AGE {
        return Err("Please enter a valid date of birth");
    }
    Ok(())
}

/// Parse `YYYY-MM-DD`, or take the date part of an RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Age as the difference of calendar years
///
/// Month and day are ignored, so someone born in December counts as a
/// year older from January 1st. Kept as-is to match how existing records
/// were accepted.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth.year()
}
