//! Platform-specific path detection for Steam installations

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::UserContext;
use crate::error::{Error, Result};

/// Conventional Steam installation roots for this platform, in priority order
pub fn default_steam_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".steam/steam"));
            candidates.push(home.join(".local/share/Steam"));
            // Flatpak Steam
            candidates.push(home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join("Library/Application Support/Steam"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        candidates.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
        candidates.push(PathBuf::from(r"C:\Program Files\Steam"));
    }

    candidates
}

/// Return the first candidate that exists on disk
pub fn locate_steam_root<I, P>(candidates: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut searched = Vec::new();

    for candidate in candidates {
        let path = candidate.into();
        if path.exists() {
            debug!("Using Steam installation at {}", path.display());
            return Ok(path);
        }
        searched.push(path);
    }

    Err(Error::SteamNotFound { searched })
}

/// Resolve the Steam root: explicit override first, else the default candidates
///
/// An override that does not exist is an error; it never falls back.
pub fn resolve_steam_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => locate_steam_root([path]),
        None => locate_steam_root(default_steam_candidates()),
    }
}

/// Enumerate per-user directories under `<root>/userdata`
///
/// Only immediate subdirectories with purely numeric names are returned,
/// sorted by name. A missing `userdata` folder yields an empty list.
pub fn list_users(steam_root: &Path) -> Result<Vec<UserContext>> {
    let userdata = steam_root.join("userdata");
    if !userdata.is_dir() {
        debug!("No userdata folder in {}", steam_root.display());
        return Ok(Vec::new());
    }

    let mut users = Vec::new();
    for entry in fs::read_dir(&userdata)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };

        if is_account_id(&name) {
            users.push(UserContext::new(name, path));
        }
    }

    users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    Ok(users)
}

/// Enumerate users, failing when the installation has none
pub fn discover_users(steam_root: &Path) -> Result<Vec<UserContext>> {
    let users = list_users(steam_root)?;
    if users.is_empty() {
        return Err(Error::NoUsers(steam_root.join("userdata")));
    }
    Ok(users)
}

fn is_account_id(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
