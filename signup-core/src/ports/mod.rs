//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod clock;
mod slot_storage;

pub use clock::Clock;
pub use slot_storage::SlotStorage;
