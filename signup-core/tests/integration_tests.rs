//! Integration tests for signup-core
//!
//! These tests drive the registration flow end to end over a real file slot
//! in a temp directory. Only the clock is fixed.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use signup_core::adapters::{FileSlotStorage, FixedClock, MemorySlotStorage};
use signup_core::config::Config;
use signup_core::ports::SlotStorage;
use signup_core::services::{RegistrationStore, DEFAULT_STORAGE_KEY};
use signup_core::{
    Error, Field, FormState, RegistrationInput, RegistrationOutcome, SignupContext, UserRecord,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
}

/// Create a context over a file slot in the temp dir
fn create_context(temp_dir: &TempDir) -> SignupContext {
    let storage = Arc::new(FileSlotStorage::new(temp_dir.path()));
    SignupContext::with_storage(Config::default(), storage, Arc::new(FixedClock::new(now())))
        .expect("Failed to create context")
}

fn scenario_input() -> RegistrationInput {
    RegistrationInput {
        full_name: "Jo".to_string(),
        email: "a@b.com".to_string(),
        password: "Abcdef1!".to_string(),
        confirm_password: "Abcdef1!".to_string(),
        phone: "1234567890".to_string(),
        date_of_birth: "2000-01-01".to_string(),
    }
}

fn read_slot(temp_dir: &TempDir) -> Vec<UserRecord> {
    let raw = FileSlotStorage::new(temp_dir.path())
        .load(DEFAULT_STORAGE_KEY)
        .unwrap()
        .expect("slot should exist");
    serde_json::from_str(&raw).unwrap()
}

// ============================================================================
// Submission Scenarios
// ============================================================================

#[test]
fn test_valid_submission_is_stored() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = create_context(&temp_dir);

    let outcome = ctx.registration_service.register(&scenario_input()).unwrap();
    assert!(outcome.is_registered());

    let records = ctx.registration_service.load_all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].full_name, "Jo");
    assert_eq!(records[0].email, "a@b.com");
    assert_eq!(records[0].registered_at, now());
    assert_eq!(read_slot(&temp_dir), records);
}

#[test]
fn test_stored_slot_never_contains_password() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = create_context(&temp_dir);
    ctx.registration_service.register(&scenario_input()).unwrap();

    let raw = std::fs::read_to_string(temp_dir.path().join("registeredUsers.json")).unwrap();
    assert!(!raw.contains("Abcdef1!"));
    assert!(!raw.contains("password"));
}

#[test]
fn test_missing_uppercase_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = create_context(&temp_dir);
    let input = RegistrationInput {
        password: "abcdefgh".to_string(),
        confirm_password: "abcdefgh".to_string(),
        ..scenario_input()
    };

    match ctx.registration_service.register(&input).unwrap() {
        RegistrationOutcome::Rejected { errors } => {
            assert_eq!(
                errors[&Field::Password],
                "Password must contain an uppercase letter"
            );
        }
        RegistrationOutcome::Registered { .. } => panic!("must be rejected"),
    }
    assert!(ctx.registration_service.load_all().is_empty());
    assert!(!temp_dir.path().join("registeredUsers.json").exists());
}

#[test]
fn test_ten_year_old_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = create_context(&temp_dir);
    let input = RegistrationInput {
        date_of_birth: "2014-06-15".to_string(),
        ..scenario_input()
    };

    match ctx.registration_service.register(&input).unwrap() {
        RegistrationOutcome::Rejected { errors } => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[&Field::DateOfBirth], "You must be at least 13 years old");
        }
        RegistrationOutcome::Registered { .. } => panic!("must be rejected"),
    }
}

#[test]
fn test_form_flow_through_service() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = create_context(&temp_dir);
    let today = now().date_naive();

    let mut form = FormState::new();
    for field in Field::ALL {
        form = form
            .change(field, scenario_input().get(field), today)
            .blur(field, today);
        assert_eq!(form.visible_error(field), None, "{} should be valid", field);
    }

    let (form, outcome) = ctx.registration_service.submit(form).unwrap();
    assert!(outcome.is_registered());
    assert!(form.success_visible(now()));
    assert!(!form.success_visible(now() + chrono::Duration::seconds(3)));
    assert_eq!(form.values, RegistrationInput::default());
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_records_survive_reopen_in_order() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut ctx = create_context(&temp_dir);
        ctx.registration_service.register(&scenario_input()).unwrap();
        let second = RegistrationInput {
            full_name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            ..scenario_input()
        };
        ctx.registration_service.register(&second).unwrap();
    }

    let ctx = create_context(&temp_dir);
    let names: Vec<_> = ctx
        .registration_service
        .load_all()
        .iter()
        .map(|r| r.full_name.as_str())
        .collect();
    assert_eq!(names, vec!["Jo", "Grace Hopper"]);
}

#[test]
fn test_remove_twice_equals_remove_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = create_context(&temp_dir);
    ctx.registration_service.register(&scenario_input()).unwrap();
    ctx.registration_service.register(&scenario_input()).unwrap();
    let id = ctx.registration_service.load_all()[0].id.clone();

    assert!(ctx.registration_service.remove_by_id(&id).unwrap());
    let once = read_slot(&temp_dir);

    assert!(!ctx.registration_service.remove_by_id(&id).unwrap());
    assert_eq!(read_slot(&temp_dir), once);
    assert_eq!(once.len(), 1);
    assert_ne!(once[0].id, id);
}

#[test]
fn test_corrupt_slot_starts_empty_and_recovers() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("registeredUsers.json"), "not json at all").unwrap();

    let mut ctx = create_context(&temp_dir);
    assert!(ctx.registration_service.load_all().is_empty());

    ctx.registration_service.register(&scenario_input()).unwrap();
    assert_eq!(read_slot(&temp_dir).len(), 1);
}

#[test]
fn test_custom_storage_key() {
    let storage = Arc::new(MemorySlotStorage::new());
    let config = Config {
        storage_key: "users_v2".to_string(),
        ..Config::default()
    };
    let mut ctx = SignupContext::with_storage(
        config,
        storage.clone(),
        Arc::new(FixedClock::new(now())),
    )
    .unwrap();

    ctx.registration_service.register(&scenario_input()).unwrap();

    assert!(storage.load("users_v2").unwrap().is_some());
    assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_none());

    let reopened = RegistrationStore::open(storage, "users_v2").unwrap();
    assert_eq!(reopened.len(), 1);
}

#[test]
fn test_context_new_uses_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = SignupContext::new(temp_dir.path()).unwrap();

    assert!(ctx.registration_service.load_all().is_empty());
    assert_eq!(
        ctx.registration_service.success_banner(),
        chrono::Duration::seconds(3)
    );
}

#[test]
fn test_context_validates_single_field() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let service = &ctx.registration_service;

    assert_eq!(
        service.validate_field(Field::Phone, "١٢٣٤٥٦٧٨٩٠", ""),
        Err("Please enter a valid phone number")
    );
    assert_eq!(
        service.validate_field(Field::ConfirmPassword, "Abcdef1!", "Abcdef2!"),
        Err("Passwords do not match")
    );
    assert!(service.validate_field(Field::DateOfBirth, "2011-06-15", "").is_ok());
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn test_saved_settings_drive_new_context() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        storage_key: "signups".to_string(),
        success_banner_secs: 7,
    };
    config.save(temp_dir.path()).unwrap();

    let mut ctx = SignupContext::new(temp_dir.path()).unwrap();
    assert_eq!(ctx.config, config);
    assert_eq!(
        ctx.registration_service.success_banner(),
        chrono::Duration::seconds(7)
    );

    ctx.registration_service.register(&scenario_input()).unwrap();
    assert!(temp_dir.path().join("signups.json").exists());
}

#[test]
fn test_unusable_storage_key_fails_context() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("settings.json"),
        r#"{"storage": {"key": "a/b"}}"#,
    )
    .unwrap();

    let err = SignupContext::new(temp_dir.path()).err().expect("must fail");
    assert!(err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<Error>(), Some(Error::Config(_)))));
}
