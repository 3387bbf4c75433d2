//! Error types for sgdb-sync-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sgdb-sync operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Steam installation not found (searched: {})", format_paths(.searched))]
    SteamNotFound { searched: Vec<PathBuf> },

    #[error("No Steam users found in {0}")]
    NoUsers(PathBuf),

    #[error("No API key provided. Run with --setup or use --api-key")]
    MissingApiKey,

    #[error("SteamGridDB API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidate paths".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for sgdb-sync operations
pub type Result<T> = std::result::Result<T, Error>;
