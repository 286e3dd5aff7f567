//! Slot storage port - a named key-value slot holding one serialized value

use crate::domain::result::Result;

/// Persistent key-value slot abstraction
///
/// The registration store keeps its whole record list as one JSON string
/// under a single key. Implementations (adapters) decide where that string
/// lives: process memory, a file in the data directory, etc.
pub trait SlotStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was saved yet
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    ///
    /// A failed save must leave the previous value in place.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}
