//! Registration store - ordered record list mirrored to a storage slot

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::result::{Error, Result};
use crate::domain::UserRecord;
use crate::ports::SlotStorage;

/// Default slot key for the record list
pub const DEFAULT_STORAGE_KEY: &str = "registeredUsers";

/// In-memory list of registered users, kept in sync with one slot
///
/// The slot is read once in [`RegistrationStore::open`]. Every mutation
/// serializes the whole list and saves it before changing memory, so if
/// the save fails neither copy changes.
pub struct RegistrationStore {
    storage: Arc<dyn SlotStorage>,
    key: String,
    records: Vec<UserRecord>,
}

impl RegistrationStore {
    /// Open the store over `key`
    ///
    /// A missing slot or one that doesn't hold a JSON list of records
    /// starts the store empty. Storage failures are returned.
    pub fn open(storage: Arc<dyn SlotStorage>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let records = match storage.load(&key)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<UserRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!(slot = %key, error = %e, "slot is not a record list, starting empty");
                    Vec::new()
                }
            },
        };
        debug!(slot = %key, records = records.len(), "registration store opened");

        Ok(Self {
            storage,
            key,
            records,
        })
    }

    /// Slot key this store persists to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append a record at the end and persist the list
    pub fn append(&mut self, record: UserRecord) -> Result<()> {
        if self.contains(&record.id) {
            return Err(Error::Duplicate(record.id));
        }

        let mut next = self.records.clone();
        next.push(record);
        self.persist(&next)?;
        self.records = next;
        Ok(())
    }

    /// Remove the record with `id` and persist the list
    ///
    /// Returns whether a record was removed. An unknown id changes nothing
    /// and writes nothing.
    pub fn remove_by_id(&mut self, id: &str) -> Result<bool> {
        if !self.contains(id) {
            return Ok(false);
        }

        let next: Vec<UserRecord> = self
            .records
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();
        self.persist(&next)?;
        self.records = next;
        Ok(true)
    }

    /// All records in insertion order
    pub fn load_all(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self, records: &[UserRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.storage.save(&self.key, &json)?;
        debug!(slot = %self.key, records = records.len(), "registration store persisted");
        Ok(())
    }
}
