//! SteamGridDB artwork lookup and download

mod client;
mod model;

pub use client::{write_stream, ArtworkCatalog, SteamGridDb, DEFAULT_BASE_URL};
pub use model::{ApiResponse, ArtType, ArtworkItem, SearchHit};
