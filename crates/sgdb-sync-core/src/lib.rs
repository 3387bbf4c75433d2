//! # sgdb-sync-core
//!
//! Core library for applying SteamGridDB artwork to non-Steam shortcuts.
//!
//! This crate provides the foundational functionality for:
//! - Recovering shortcut records from Steam's binary `shortcuts.vdf`
//! - Locating the Steam installation and its per-user folders
//! - Looking up and downloading artwork from the SteamGridDB v2 API
//! - Writing artwork into each user's `config/grid` folder
//!
//! ## Modules
//!
//! - [`catalog`] - Art types and the SteamGridDB client
//! - [`config`] - Settings persistence
//! - [`error`] - Error types and Result alias
//! - [`filter`] - Shortcut filtering
//! - [`shortcuts`] - `shortcuts.vdf` extraction
//! - [`steam`] - Steam root and user discovery
//! - [`sync`] - Synchronization engine
//!
//! ## Example
//!
//! ```no_run
//! use sgdb_sync_core::{discover_users, resolve_steam_root, SteamGridDb, SyncEngine, SyncOptions};
//!
//! let root = resolve_steam_root(None).expect("Steam not found");
//! let users = discover_users(&root).expect("No Steam users");
//! let catalog = SteamGridDb::new("api-key").expect("HTTP client");
//!
//! let summary = SyncEngine::new(SyncOptions::default()).fetch(&users, &catalog);
//! println!("{} game(s) received artwork", summary.games_with_art);
//! ```

// Module declarations
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod shortcuts;
pub mod steam;
pub mod sync;

// Re-export key types for convenience

// Error types
pub use error::{Error, Result};

// Shortcut extraction
pub use shortcuts::{grid_id, ParseError, ParseOutcome, ShortcutReader, ShortcutRecord};

// Steam discovery
pub use steam::{
    default_steam_candidates, discover_users, list_users, locate_steam_root, resolve_steam_root,
    UserContext,
};

// Artwork catalog
pub use catalog::{ArtType, ArtworkCatalog, SteamGridDb, DEFAULT_BASE_URL};

// Configuration
pub use config::{ImageTypes, Settings};

// Filtering
pub use filter::{FilterCriteria, FilterEngine};

// Sync engine
pub use sync::{
    existing_artwork, ProgressCallback, SyncEngine, SyncEvent, SyncOptions, SyncSummary,
};
