//! Registered user domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::registration::RegistrationInput;

/// A registered user, as persisted in the slot
///
/// The password is deliberately absent: it is checked on submission and
/// then dropped with the `RegistrationInput`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unix-millisecond timestamp of registration, as a string
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub registered_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build a record from an accepted input, trimming text fields
    pub fn from_input(
        id: impl Into<String>,
        input: &RegistrationInput,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: input.full_name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone.trim().to_string(),
            date_of_birth: input.date_of_birth.trim().to_string(),
            registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_input_drops_password_and_trims() {
        let input = RegistrationInput {
            full_name: "  Jo  ".to_string(),
            email: " a@b.com".to_string(),
            password: "Abcdef1!".to_string(),
            confirm_password: "Abcdef1!".to_string(),
            phone: "1234567890 ".to_string(),
            date_of_birth: "2000-01-01".to_string(),
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let record = UserRecord::from_input("1714564800000", &input, at);
        assert_eq!(record.full_name, "Jo");
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.phone, "1234567890");

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("Abcdef1!"));
        assert!(json.contains("\"registeredAt\":\"2024-05-01T12:00:00Z\""));
        assert!(json.contains("\"fullName\":\"Jo\""));
    }
}
