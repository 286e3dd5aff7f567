//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod logging;
mod registration;
pub mod store;

pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService, FIELD_REJECTED};
pub use registration::{RegistrationOutcome, RegistrationService};
pub use store::{RegistrationStore, DEFAULT_STORAGE_KEY};
