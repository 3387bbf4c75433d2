//! SteamGridDB art categories and API response shapes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Artwork category written into Steam's grid folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtType {
    /// Portrait library capsule
    Grid,
    /// Horizontal capsule
    Wide,
    /// Background banner behind the game page header
    Hero,
    /// Transparent logo drawn over the hero
    Logo,
}

impl ArtType {
    /// All art types, in download order
    pub fn all() -> &'static [ArtType] {
        &[Self::Grid, Self::Wide, Self::Hero, Self::Logo]
    }

    /// Key used in the settings file's `image_types` map
    pub fn key(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Wide => "wide",
            Self::Hero => "hero",
            Self::Logo => "logo",
        }
    }

    /// API path segment listing this category for a game
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Grid | Self::Wide => "grids",
            Self::Hero => "heroes",
            Self::Logo => "logos",
        }
    }

    /// Dimension filter sent with the artwork request, if any
    pub fn dimensions(&self) -> Option<&'static str> {
        match self {
            Self::Grid => Some("600x900,342x482,660x930"),
            Self::Wide => Some("460x215,920x430"),
            Self::Hero | Self::Logo => None,
        }
    }

    /// Suffix Steam expects after the app ID in the file name
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Grid => "p",
            Self::Wide => "",
            Self::Hero => "_hero",
            Self::Logo => "_logo",
        }
    }

    /// File name for this art type of a shortcut, e.g. `305620p.png`
    pub fn file_name(&self, app_id: u32) -> String {
        format!("{}{}.png", app_id, self.suffix())
    }

    /// Label used in console output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::Wide => "Wide",
            Self::Hero => "Hero",
            Self::Logo => "Logo",
        }
    }
}

impl fmt::Display for ArtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One game returned by `/search/autocomplete`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// One image returned by `/grids|heroes|logos/game/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkItem {
    pub url: String,
}

/// Envelope shared by every SteamGridDB v2 response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default = "Vec::new")]
    pub errors: Vec<String>,
}

impl<T> ApiResponse<T> {
    /// First element of `data`, or an error if the API reported failure
    ///
    /// An empty `data` array is not an error, just no result.
    pub fn into_first(self) -> Result<Option<T>> {
        if !self.success {
            let reason = if self.errors.is_empty() {
                "request was not successful".to_string()
            } else {
                self.errors.join("; ")
            };
            return Err(Error::Api(reason));
        }
        Ok(self.data.into_iter().next())
    }
}
