//! In-memory slot storage
//!
//! Holds slot values in process memory. Used by tests and by front-ends
//! that don't want anything written to disk.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::ports::SlotStorage;

#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot pre-populated
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self {
            slots: Mutex::new(slots),
        }
    }
}

impl SlotStorage for MemorySlotStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
