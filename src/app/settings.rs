use serde::{Deserialize, Serialize};

use super::library::DEFAULT_LIBRARY_PATH;
use crate::error::{Error, Result};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub library_path: String,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    pub grid_size: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            library_path: DEFAULT_LIBRARY_PATH.to_string(),
            snap_to_grid: true,
            show_grid: true,
            grid_size: 20.0,
        }
    }
}

pub fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub fn save_settings(path: &str, settings: &AppSettings) -> Result<()> {
    if path.ends_with(".toml") {
        let toml = toml::to_string_pretty(settings).map_err(|e| Error::Settings(e.to_string()))?;
        std::fs::write(path, toml)?;
    } else {
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(path, json)?;
    }
    Ok(())
}
