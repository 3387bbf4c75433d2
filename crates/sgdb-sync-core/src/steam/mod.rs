//! Steam installation and per-user directory discovery

mod paths;

pub use paths::*;

use std::path::PathBuf;

use crate::catalog::ArtType;

/// One Steam account folder under `userdata`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    /// Numeric Steam account folder name
    pub user_id: String,
    /// Path to `userdata/<user_id>`
    pub path: PathBuf,
}

impl UserContext {
    /// Create a new user context
    pub fn new(user_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            user_id: user_id.into(),
            path: path.into(),
        }
    }

    /// Get the path of the user's `shortcuts.vdf`
    pub fn shortcuts_path(&self) -> PathBuf {
        self.path.join("config").join("shortcuts.vdf")
    }

    /// Get the user's grid artwork directory
    pub fn grid_dir(&self) -> PathBuf {
        self.path.join("config").join("grid")
    }

    /// Get the destination file for one art type of a shortcut
    pub fn artwork_path(&self, app_id: u32, art: ArtType) -> PathBuf {
        self.grid_dir().join(art.file_name(app_id))
    }
}
