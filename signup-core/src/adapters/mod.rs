//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Files in the data directory for the SlotStorage port
//! - Process memory for the SlotStorage port (tests, ephemeral use)
//! - System and fixed clocks for the Clock port

pub mod clock;
pub mod file;
pub mod memory;

pub use clock::{FixedClock, SystemClock};
pub use file::FileSlotStorage;
pub use memory::MemorySlotStorage;
