//! Data models for non-Steam shortcuts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flag Steam ORs into the low word of a shortcut's 64-bit grid identifier
const GRID_ID_FLAG: u64 = 0x0200_0000;

/// A non-Steam game entry recovered from `shortcuts.vdf`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRecord {
    /// Display name shown in the Steam library
    pub name: String,
    /// Executable path or command Steam launches
    pub exe: String,
    /// Steam's locally assigned application ID
    pub app_id: u32,
}

impl ShortcutRecord {
    /// Create a new shortcut record
    pub fn new(name: impl Into<String>, exe: impl Into<String>, app_id: u32) -> Self {
        Self {
            name: name.into(),
            exe: exe.into(),
            app_id,
        }
    }

    /// 64-bit identifier some Steam subsystems use in place of the app ID
    pub fn grid_id(&self) -> u64 {
        grid_id(self.app_id)
    }

    /// Case-insensitive substring match against the display name
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Compute the 64-bit grid identifier for a shortcut app ID
pub fn grid_id(app_id: u32) -> u64 {
    (u64::from(app_id) << 32) | GRID_ID_FLAG
}

/// Why a candidate entry was dropped during extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset of the entry's `appid` signature
    pub offset: usize,
    /// Human-readable reason
    pub message: String,
}

impl ParseError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry at byte {}: {}", self.offset, self.message)
    }
}

/// Records and dropped candidates produced by one extraction pass
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Records in the order they appear in the container
    pub records: Vec<ShortcutRecord>,
    /// Candidates that matched structurally but could not be decoded
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    /// Check if any candidate was dropped
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
