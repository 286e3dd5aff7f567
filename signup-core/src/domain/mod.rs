//! Core domain entities
//!
//! Pure data structures and validation rules - no I/O or external
//! dependencies.

pub mod form;
mod registration;
pub mod result;
mod user_record;
pub mod validation;

pub use form::{FormState, Submission};
pub use registration::{Field, RegistrationInput};
pub use user_record::UserRecord;
pub use validation::{validate_all, validate_field, FieldErrors, ValidationContext};
