use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Window geometry remembered between sessions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuiSettings {
    pub window_width: f64,
    pub window_height: f64,
    pub window_x: i32,
    pub window_y: i32,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            window_width: 740.0,
            window_height: 600.0,
            window_x: 0,
            window_y: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPrefs {
    pub serenity_file_path: PathBuf,
    pub gui_settings: GuiSettings,
}

impl UserPrefs {
    pub fn for_data_file(path: impl AsRef<Path>) -> Self {
        Self {
            serenity_file_path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            serenity_file_path: PathBuf::from("data").join("serenity.json"),
            gui_settings: GuiSettings::default(),
        }
    }
}
