//! Config command - show and change settings.json

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use signup_core::config::{parse_banner_secs, Config};

use super::get_data_dir;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one or more settings
    Set {
        /// Slot key the record list is stored under
        #[arg(long)]
        storage_key: Option<String>,
        /// Seconds the success banner stays visible
        #[arg(long, value_parser = parse_banner_secs)]
        success_banner_secs: Option<u64>,
    },
}

pub fn run(command: Option<ConfigCommands>) -> Result<()> {
    let data_dir = get_data_dir()?;
    let mut config = Config::load(&data_dir)?;

    match command {
        Some(ConfigCommands::Set {
            storage_key,
            success_banner_secs,
        }) => {
            if storage_key.is_none() && success_banner_secs.is_none() {
                anyhow::bail!("Nothing to set: pass --storage-key or --success-banner-secs");
            }
            if let Some(key) = storage_key {
                config.storage_key = key.trim().to_string();
            }
            if let Some(secs) = success_banner_secs {
                config.success_banner_secs = secs;
            }
            config.save(&data_dir)?;
            println!("{}", "Settings saved".green());
            print_config(&config);
            Ok(())
        }
        Some(ConfigCommands::Show { json: true }) => {
            println!(
                "{}",
                serde_json::json!({
                    "storageKey": config.storage_key,
                    "successBannerSecs": config.success_banner_secs,
                    "settingsPath": data_dir.join("settings.json").to_string_lossy(),
                })
            );
            Ok(())
        }
        Some(ConfigCommands::Show { json: false }) | None => {
            print_config(&config);
            println!("  File: {}", data_dir.join("settings.json").display());
            Ok(())
        }
    }
}

fn print_config(config: &Config) {
    println!("  Storage key: {}", config.storage_key);
    println!("  Success banner: {}s", config.success_banner_secs);
}
