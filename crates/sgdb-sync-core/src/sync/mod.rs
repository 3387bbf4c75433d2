//! Artwork synchronization for non-Steam shortcuts

mod engine;
mod listing;

pub use engine::{ProgressCallback, SyncEngine, SyncEvent, SyncOptions, SyncSummary};
pub use listing::existing_artwork;
