use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    Light,
    #[default]
    Dark,
}

/// Read-only settings. Nothing is ever written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tool: String,
    pub language: Language,
    pub theme: ThemeChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: "winget".to_string(),
            language: Language::default(),
            theme: ThemeChoice::default(),
        }
    }
}

impl Config {
    /// Loads the user's config file, falling back to defaults when it is
    /// missing or broken.
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("No config location available: {}", e);
                return Self::default();
            }
        };

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        Self::load_from(&path).unwrap_or_else(|e| {
            warn!("Ignoring config at {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        if config.tool.trim().is_empty() {
            anyhow::bail!("'tool' must not be empty");
        }
        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home).join(".config").join("perch").join("config.json"))
    }
}
