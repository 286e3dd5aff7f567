//! Configuration management
//!
//! Settings live in `settings.json` in the data directory:
//! ```json
//! {
//!   "storage": { "key": "registeredUsers" },
//!   "form": { "successBannerSeconds": 3 }
//! }
//! ```
//! Keys this crate doesn't manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::file::is_valid_slot_key;
use crate::domain::form::DEFAULT_SUCCESS_BANNER_SECS;
use crate::domain::result::Error;
use crate::services::store::DEFAULT_STORAGE_KEY;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    storage: StorageSettings,
    #[serde(default)]
    form: FormSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    success_banner_seconds: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Signup configuration (simplified view of settings)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Slot key the record list is stored under
    pub storage_key: String,
    /// How long the success indication stays visible after a submit
    pub success_banner_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            success_banner_secs: DEFAULT_SUCCESS_BANNER_SECS,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing or unreadable settings file yields defaults. Values can be
    /// overridden with SIGNUP_STORAGE_KEY and SIGNUP_SUCCESS_BANNER_SECS.
    /// A storage key that can't name a slot, from either source, is an
    /// `Error::Config`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let storage_key = match std::env::var("SIGNUP_STORAGE_KEY") {
            Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => raw
                .storage
                .key
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
        };

        let success_banner_secs = match std::env::var("SIGNUP_SUCCESS_BANNER_SECS") {
            Ok(secs) => parse_banner_secs(&secs)?,
            Err(_) => raw
                .form
                .success_banner_seconds
                .unwrap_or(DEFAULT_SUCCESS_BANNER_SECS),
        };

        let config = Self {
            storage_key,
            success_banner_secs,
        };
        config.check()?;
        Ok(config)
    }

    /// Reject values the rest of the crate can't use
    pub fn check(&self) -> std::result::Result<(), Error> {
        if !is_valid_slot_key(&self.storage_key) {
            return Err(Error::config(format!(
                "Invalid storage key {:?}: use letters, digits, '-', '_' or '.'",
                self.storage_key
            )));
        }
        Ok(())
    }

    /// Save config to the data directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        self.check()?;
        let mut settings = read_settings(data_dir)?;

        settings.storage.key = Some(self.storage_key.clone());
        settings.form.success_banner_seconds = Some(self.success_banner_secs);

        std::fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join("settings.json"), content)?;
        Ok(())
    }
}

/// Parse a success banner duration in whole seconds
pub fn parse_banner_secs(raw: &str) -> std::result::Result<u64, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid success banner seconds: {:?}", raw)))
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
