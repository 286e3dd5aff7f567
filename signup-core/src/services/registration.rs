//! Registration service - validate submissions and keep the store

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use crate::domain::form::DEFAULT_SUCCESS_BANNER_SECS;
use crate::domain::{
    validate_all, validate_field, Field, FieldErrors, FormState, RegistrationInput, UserRecord,
    ValidationContext,
};
use crate::ports::Clock;
use crate::services::store::RegistrationStore;

/// Outcome of a registration attempt
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RegistrationOutcome {
    /// The input passed every rule and the record was stored
    Registered { record: UserRecord },
    /// At least one field failed; nothing was stored
    Rejected { errors: FieldErrors },
}

impl RegistrationOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationOutcome::Registered { .. })
    }
}

/// Registration service: the operations a front-end calls
pub struct RegistrationService {
    store: RegistrationStore,
    clock: Arc<dyn Clock>,
    success_banner: Duration,
}

impl RegistrationService {
    pub fn new(store: RegistrationStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            success_banner: Duration::seconds(DEFAULT_SUCCESS_BANNER_SECS as i64),
        }
    }

    /// Override how long the success indication stays up after a submit
    pub fn with_success_banner(mut self, banner: Duration) -> Self {
        self.success_banner = banner;
        self
    }

    pub fn success_banner(&self) -> Duration {
        self.success_banner
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Validate a single field value against today's date
    pub fn validate_field(
        &self,
        field: Field,
        value: &str,
        password: &str,
    ) -> std::result::Result<(), &'static str> {
        let ctx = ValidationContext::new(password, self.clock.today());
        validate_field(field, value, &ctx)
    }

    /// Validate an input and store it if every field passes
    pub fn register(&mut self, input: &RegistrationInput) -> Result<RegistrationOutcome> {
        let errors = validate_all(input, self.clock.today());
        if !errors.is_empty() {
            return Ok(RegistrationOutcome::Rejected { errors });
        }

        let record = self.append_accepted(input, self.clock.now())?;
        Ok(RegistrationOutcome::Registered { record })
    }

    /// Submit a form: validate all fields, store on success and return the
    /// next form state
    pub fn submit(&mut self, form: FormState) -> Result<(FormState, RegistrationOutcome)> {
        let now = self.clock.now();
        let submission = form.submit(self.clock.today());

        match submission.accepted {
            Some(input) => {
                let record = self.append_accepted(&input, now)?;
                let state = submission.state.succeeded(now, self.success_banner);
                Ok((state, RegistrationOutcome::Registered { record }))
            }
            None => {
                let errors = submission.state.errors.clone();
                Ok((submission.state, RegistrationOutcome::Rejected { errors }))
            }
        }
    }

    /// Remove a record by id; `false` if there was no such record
    pub fn remove_by_id(&mut self, id: &str) -> Result<bool> {
        let removed = self
            .store
            .remove_by_id(id)
            .with_context(|| format!("Failed to remove record {}", id))?;
        if removed {
            info!(records = self.store.len(), "registration removed");
        }
        Ok(removed)
    }

    /// All registered users in registration order
    pub fn load_all(&self) -> &[UserRecord] {
        self.store.load_all()
    }

    fn append_accepted(
        &mut self,
        input: &RegistrationInput,
        now: DateTime<Utc>,
    ) -> Result<UserRecord> {
        let id = self.next_id(now);
        let record = UserRecord::from_input(id, input, now);
        self.store
            .append(record.clone())
            .context("Failed to store registration")?;
        info!(records = self.store.len(), "registration stored");
        Ok(record)
    }

    /// Unix-millisecond timestamp, bumped past any id already taken
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while self.store.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, MemorySlotStorage};
    use crate::services::store::DEFAULT_STORAGE_KEY;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
    }

    fn service() -> RegistrationService {
        let storage = Arc::new(MemorySlotStorage::new());
        let store = RegistrationStore::open(storage, DEFAULT_STORAGE_KEY).unwrap();
        RegistrationService::new(store, Arc::new(FixedClock::new(now())))
    }

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            full_name: "Jo".to_string(),
            email: "a@b.com".to_string(),
            password: "Abcdef1!".to_string(),
            confirm_password: "Abcdef1!".to_string(),
            phone: "1234567890".to_string(),
            date_of_birth: "2000-01-01".to_string(),
        }
    }

    #[test]
    fn test_register_valid_input() {
        let mut service = service();
        let outcome = service.register(&valid_input()).unwrap();

        match outcome {
            RegistrationOutcome::Registered { record } => {
                assert_eq!(record.id, now().timestamp_millis().to_string());
                assert_eq!(record.registered_at, now());
            }
            RegistrationOutcome::Rejected { errors } => panic!("rejected: {:?}", errors),
        }
        assert_eq!(service.load_all().len(), 1);
    }

    #[test]
    fn test_register_rejects_lowercase_only_password() {
        let mut service = service();
        let input = RegistrationInput {
            password: "abcdefgh".to_string(),
            confirm_password: "abcdefgh".to_string(),
            ..valid_input()
        };

        match service.register(&input).unwrap() {
            RegistrationOutcome::Rejected { errors } => {
                assert_eq!(
                    errors.get(&Field::Password).map(String::as_str),
                    Some("Password must contain an uppercase letter")
                );
                assert_eq!(errors.len(), 1);
            }
            RegistrationOutcome::Registered { .. } => panic!("must be rejected"),
        }
        assert!(service.load_all().is_empty());
    }

    #[test]
    fn test_ids_stay_unique_within_one_millisecond() {
        let mut service = service();
        service.register(&valid_input()).unwrap();
        service.register(&valid_input()).unwrap();

        let ids: Vec<_> = service.load_all().iter().map(|r| r.id.clone()).collect();
        let base = now().timestamp_millis();
        assert_eq!(ids, vec![base.to_string(), (base + 1).to_string()]);
    }

    #[test]
    fn test_submit_resets_form_and_shows_banner() {
        let mut service = service().with_success_banner(Duration::seconds(5));
        let form = FormState::with_values(valid_input());

        let (state, outcome) = service.submit(form).unwrap();
        assert!(outcome.is_registered());
        assert_eq!(state.values, RegistrationInput::default());
        assert_eq!(state.success_until, Some(now() + Duration::seconds(5)));
    }

    #[test]
    fn test_submit_rejected_keeps_values() {
        let mut service = service();
        let form = FormState::with_values(RegistrationInput {
            date_of_birth: "2014-03-01".to_string(),
            ..valid_input()
        });

        let (state, outcome) = service.submit(form).unwrap();
        assert!(!outcome.is_registered());
        assert_eq!(state.values.full_name, "Jo");
        assert_eq!(
            state.visible_error(Field::DateOfBirth),
            Some("You must be at least 13 years old")
        );
        assert!(state.success_until.is_none());
        assert!(service.load_all().is_empty());
    }

    #[test]
    fn test_validate_field_uses_clock_date() {
        let service = service();
        assert_eq!(
            service.validate_field(Field::DateOfBirth, "2012-12-31", ""),
            Err("You must be at least 13 years old")
        );
        assert!(service.validate_field(Field::DateOfBirth, "2011-01-01", "").is_ok());
    }

    #[test]
    fn test_remove_by_id() {
        let mut service = service();
        service.register(&valid_input()).unwrap();
        let id = service.load_all()[0].id.clone();

        assert!(service.remove_by_id(&id).unwrap());
        assert!(!service.remove_by_id(&id).unwrap());
        assert!(service.load_all().is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let mut service = service();
        let outcome = service.register(&RegistrationInput::default()).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "rejected");
        assert_eq!(json["errors"]["fullName"], "Full name is required");
    }
}
