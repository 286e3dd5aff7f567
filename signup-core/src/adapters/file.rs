//! File-backed slot storage
//!
//! Each slot is one file, `<dir>/<key>.json`. Writes go to a temp file in
//! the same directory and are renamed over the slot, so readers never see a
//! half-written value and a failed write keeps the previous one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::ports::SlotStorage;

#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    ///
    /// Keys become file names, so only letters, digits, `-`, `_` and `.`
    /// are allowed and a key may not start with a dot.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_slot_key(key) {
            return Err(Error::validation(format!("Invalid slot key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Whether `key` can be used as a slot file name
pub fn is_valid_slot_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl SlotStorage for FileSlotStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        debug!(slot = %path.display(), bytes = value.len(), "slot saved");
        Ok(())
    }
}
