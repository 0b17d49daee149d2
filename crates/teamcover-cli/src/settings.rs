//! Persistent user settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use teamcover_core::DEFAULT_TIMEOUT;

/// Defaults applied when a flag is not given on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_team_size: usize,
    pub timeout_ms: u64,
    /// Print results as JSON instead of text
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_team_size: 5,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            json: false,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("teamcover")
            .join("settings.json")
    }

    /// Load settings, falling back to defaults if missing or unreadable
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> io::Result<PathBuf> {
        let path = Self::path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}
