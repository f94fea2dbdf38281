use crate::core::dirs::{get_config_directory, get_data_directory};
use crate::core::error::SerenityError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Settings of the binary, kept in `config.json` in the config directory
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub export_dir: PathBuf,
    pub log_level: String,
    pub last_opened: Option<chrono::DateTime<chrono::Utc>>,
}

impl AppConfig {
    /// Defaults rooted at `data_dir`
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self {
            data_file: data_dir.join("serenity.json"),
            export_dir: data_dir.join("exports"),
            log_level: "info".to_string(),
            last_opened: None,
        }
    }

    pub fn load_or_create() -> Result<Self, SerenityError> {
        let config_file = get_config_directory()?.join(CONFIG_FILE);
        let defaults = Self::with_data_dir(&get_data_directory()?);
        Self::load_or_create_at(&config_file, defaults)
    }

    /// Read `config_file`, writing `defaults` there when it does not exist.
    /// An unreadable file is replaced by the defaults in memory only.
    pub fn load_or_create_at(config_file: &Path, defaults: Self) -> Result<Self, SerenityError> {
        if config_file.exists() {
            let content = std::fs::read_to_string(config_file)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    warn!("Ignoring invalid config {}: {e}", config_file.display());
                    Ok(defaults)
                }
            }
        } else {
            defaults.save_at(config_file)?;
            Ok(defaults)
        }
    }

    pub fn save(&self) -> Result<(), SerenityError> {
        self.save_at(&get_config_directory()?.join(CONFIG_FILE))
    }

    pub fn save_at(&self, config_file: &Path) -> Result<(), SerenityError> {
        if let Some(parent) = config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_file, content)?;
        Ok(())
    }

    pub fn touch(&mut self) {
        self.last_opened = Some(chrono::Utc::now());
    }
}
