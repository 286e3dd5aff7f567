//! Registration form state
//!
//! The form is an immutable value. Each user interaction is a reducer that
//! consumes the current state and returns the next one, so a front-end
//! only has to hold the latest `FormState` and render from it.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::registration::{Field, RegistrationInput};
use super::validation::{validate_all, validate_field, FieldErrors, ValidationContext};

/// How long the success indication stays visible by default
pub const DEFAULT_SUCCESS_BANNER_SECS: u64 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: RegistrationInput,
    pub touched: BTreeSet<Field>,
    pub errors: FieldErrors,
    /// Success indication is shown until this instant
    pub success_until: Option<DateTime<Utc>>,
}

/// Result of submitting the form
#[derive(Debug, Clone)]
pub struct Submission {
    pub state: FormState,
    /// The validated input, present only when no field has an error
    pub accepted: Option<RegistrationInput>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-filled values (nothing touched yet)
    pub fn with_values(values: RegistrationInput) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// A field's value changed
    ///
    /// Touched fields are re-validated immediately. A password change also
    /// re-checks a touched confirmation, since its rule depends on it.
    pub fn change(mut self, field: Field, value: impl Into<String>, today: NaiveDate) -> Self {
        self.values.set(field, value);
        if self.touched.contains(&field) {
            self.revalidate(field, today);
        }
        if field == Field::Password && self.touched.contains(&Field::ConfirmPassword) {
            self.revalidate(Field::ConfirmPassword, today);
        }
        self
    }

    /// A field lost focus: mark it touched and validate it
    pub fn blur(mut self, field: Field, today: NaiveDate) -> Self {
        self.touched.insert(field);
        self.revalidate(field, today);
        self
    }

    /// Validate every field regardless of touched status
    pub fn submit(mut self, today: NaiveDate) -> Submission {
        self.touched.extend(Field::ALL);
        self.errors = validate_all(&self.values, today);

        let accepted = if self.errors.is_empty() {
            Some(self.values.clone())
        } else {
            None
        };

        Submission {
            state: self,
            accepted,
        }
    }

    /// The submission was stored: reset the form and show the success
    /// indication for `banner`
    pub fn succeeded(self, now: DateTime<Utc>, banner: Duration) -> Self {
        Self {
            success_until: Some(now + banner),
            ..Self::default()
        }
    }

    /// Hide the success indication once its time has passed
    pub fn expire(mut self, now: DateTime<Utc>) -> Self {
        if !self.success_visible(now) {
            self.success_until = None;
        }
        self
    }

    pub fn success_visible(&self, now: DateTime<Utc>) -> bool {
        self.success_until.map_or(false, |until| now < until)
    }

    /// The error to display for a field (untouched fields show nothing)
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    fn revalidate(&mut self, field: Field, today: NaiveDate) {
        let ctx = ValidationContext::new(&self.values.password, today);
        match validate_field(field, self.values.get(field), &ctx) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(msg) => {
                self.errors.insert(field, msg.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filled() -> FormState {
        let t = today();
        FormState::new()
            .change(Field::FullName, "Jo", t)
            .change(Field::Email, "a@b.com", t)
            .change(Field::Password, "Abcdef1!", t)
            .change(Field::ConfirmPassword, "Abcdef1!", t)
            .change(Field::Phone, "1234567890", t)
            .change(Field::DateOfBirth, "2000-01-01", t)
    }

    #[test]
    fn test_untouched_field_shows_no_error() {
        let state = FormState::new().change(Field::Email, "nope", today());
        assert!(state.errors.is_empty());
        assert_eq!(state.visible_error(Field::Email), None);
    }

    #[test]
    fn test_blur_marks_touched_and_validates() {
        let t = today();
        let state = FormState::new().change(Field::Email, "nope", t).blur(Field::Email, t);

        assert!(state.is_touched(Field::Email));
        assert_eq!(
            state.visible_error(Field::Email),
            Some("Please enter a valid email address")
        );

        let state = state.change(Field::Email, "a@b.com", t);
        assert_eq!(state.visible_error(Field::Email), None);
    }

    #[test]
    fn test_password_change_rechecks_touched_confirmation() {
        let t = today();
        let state = FormState::new()
            .change(Field::Password, "Abcdef1!", t)
            .change(Field::ConfirmPassword, "Abcdef1!", t)
            .blur(Field::ConfirmPassword, t);
        assert_eq!(state.visible_error(Field::ConfirmPassword), None);

        let state = state.change(Field::Password, "Abcdef1?", t);
        assert_eq!(
            state.visible_error(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_submit_validates_untouched_fields() {
        let submission = FormState::new().change(Field::FullName, "Jo", today()).submit(today());

        assert!(submission.accepted.is_none());
        assert_eq!(submission.state.touched.len(), Field::ALL.len());
        assert_eq!(submission.state.visible_error(Field::FullName), None);
        assert_eq!(
            submission.state.visible_error(Field::Email),
            Some("Email is required")
        );
    }

    #[test]
    fn test_submit_accepts_valid_form() {
        let submission = filled().submit(today());

        assert!(submission.state.errors.is_empty());
        let accepted = submission.accepted.unwrap();
        assert_eq!(accepted.full_name, "Jo");
    }

    #[test]
    fn test_succeeded_clears_and_banner_expires() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let banner = Duration::seconds(DEFAULT_SUCCESS_BANNER_SECS as i64);

        let state = filled().submit(today()).state.succeeded(now, banner);
        assert_eq!(state.values, RegistrationInput::default());
        assert!(state.touched.is_empty());
        assert!(state.errors.is_empty());
        assert!(state.success_visible(now + Duration::seconds(2)));

        let state = state.expire(now + Duration::seconds(1));
        assert!(state.success_until.is_some());

        let state = state.expire(now + Duration::seconds(3));
        assert!(!state.success_visible(now + Duration::seconds(3)));
        assert!(state.success_until.is_none());
    }
}
