//! Registration input and form field names

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

/// A field of the registration form
///
/// Ordering follows the form layout, so maps keyed by `Field` iterate in
/// the order a user sees the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    Phone,
    DateOfBirth,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 6] = [
        Field::FullName,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::Phone,
        Field::DateOfBirth,
    ];

    /// Wire name (camelCase, as stored and displayed)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Phone => "phone",
            Field::DateOfBirth => "dateOfBirth",
        }
    }

    /// Human label for prompts and tables
    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::Phone => "Phone",
            Field::DateOfBirth => "Date of birth",
        }
    }

    /// Whether input for this field should be hidden when typed
    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts `fullName`, `full_name` and `full-name` spellings, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "fullname" | "name" => Ok(Field::FullName),
            "email" => Ok(Field::Email),
            "password" => Ok(Field::Password),
            "confirmpassword" => Ok(Field::ConfirmPassword),
            "phone" => Ok(Field::Phone),
            "dateofbirth" | "dob" => Ok(Field::DateOfBirth),
            _ => Err(Error::validation(format!("Unknown field: {}", s))),
        }
    }
}

/// Raw form values as typed by the user
///
/// Transient: never persisted. The password fields only exist here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub date_of_birth: String,
}

impl RegistrationInput {
    /// Current value of a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::Phone => &self.phone,
            Field::DateOfBirth => &self.date_of_birth,
        }
    }

    /// Replace the value of a field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FullName => self.full_name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
            Field::Phone => self.phone = value,
            Field::DateOfBirth => self.date_of_birth = value,
        }
    }

    /// Builder-style setter
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}
