//! Settings persistence
//!
//! Settings live in a flat JSON file. Every field has a built-in default, so
//! a partial file is merged over the defaults with the file's values winning.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::catalog::ArtType;
use crate::error::Result;

/// Settings for sgdb-sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SteamGridDB API key
    pub api_key: String,
    /// Which artwork categories to download
    pub image_types: ImageTypes,
    /// Steam installation root, overriding auto-detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_path: Option<PathBuf>,
}

/// Per-category enablement flags; anything not in the file stays enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTypes {
    pub grid: bool,
    pub hero: bool,
    pub logo: bool,
    pub wide: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            image_types: ImageTypes::default(),
            steam_path: None,
        }
    }
}

impl Default for ImageTypes {
    fn default() -> Self {
        Self {
            grid: true,
            hero: true,
            logo: true,
            wide: true,
        }
    }
}

impl ImageTypes {
    /// Check whether one art type is enabled
    pub fn is_enabled(&self, art: ArtType) -> bool {
        match art {
            ArtType::Grid => self.grid,
            ArtType::Wide => self.wide,
            ArtType::Hero => self.hero,
            ArtType::Logo => self.logo,
        }
    }

    /// Enabled art types, in download order
    pub fn enabled(&self) -> Vec<ArtType> {
        ArtType::all()
            .iter()
            .copied()
            .filter(|art| self.is_enabled(*art))
            .collect()
    }
}

impl Settings {
    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("steamgriddb").join("config.json"))
    }

    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load settings from disk
    ///
    /// A missing file gives the defaults. An unreadable or invalid file also
    /// gives the defaults, with a warning.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        let loaded = fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|content| Self::from_json(&content));

        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Could not load config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to disk, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check if a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Apply command-line overrides; a provided value always wins
    pub fn with_overrides(mut self, api_key: Option<String>, steam_path: Option<PathBuf>) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        if let Some(path) = steam_path {
            self.steam_path = Some(path);
        }
        self
    }
}
