//! Signup Core - registration form logic
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Form fields, validation rules, form state, user records
//! - **ports**: Trait definitions for external dependencies (SlotStorage, Clock)
//! - **services**: Business logic orchestration (registration, store, event log)
//! - **adapters**: Concrete implementations (file and in-memory slots, clocks)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;

use adapters::{FileSlotStorage, SystemClock};
use config::Config;
use ports::{Clock, SlotStorage};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Field, FieldErrors, FormState, RegistrationInput, UserRecord};
pub use services::{
    EntryPoint, LogEntry, LogEvent, LoggingService, RegistrationOutcome, RegistrationService,
    FIELD_REJECTED,
};

/// Main context for signup operations
///
/// This is the primary entry point for front-ends. It holds the
/// configuration and the registration service built over the slot.
pub struct SignupContext {
    pub config: Config,
    pub registration_service: RegistrationService,
}

impl SignupContext {
    /// Create a context over the data directory
    ///
    /// Settings come from `settings.json` and records from a file slot in
    /// the same directory.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let storage = Arc::new(FileSlotStorage::new(data_dir));
        Self::with_storage(config, storage, Arc::new(SystemClock))
    }

    /// Create a context over any slot storage and clock
    pub fn with_storage(
        config: Config,
        storage: Arc<dyn SlotStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let store = RegistrationStore::open(storage, config.storage_key.clone())
            .with_context(|| format!("Failed to open slot '{}'", config.storage_key))?;
        let banner = Duration::seconds(config.success_banner_secs as i64);
        let registration_service = RegistrationService::new(store, clock).with_success_banner(banner);

        Ok(Self {
            config,
            registration_service,
        })
    }
}
