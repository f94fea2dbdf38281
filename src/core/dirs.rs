use crate::core::error::SerenityError;
use std::path::PathBuf;

const APP_DIR: &str = "serenity";

pub fn get_config_directory() -> Result<PathBuf, SerenityError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join(APP_DIR))
        .ok_or(SerenityError::ConfigDirectoryNotFound)
}

/// Default home of the data file and exported sheets
pub fn get_data_directory() -> Result<PathBuf, SerenityError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".local/share"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::data_dir(),
    };

    base.map(|base| base.join(APP_DIR))
        .ok_or(SerenityError::ConfigDirectoryNotFound)
}
