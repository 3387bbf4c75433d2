//! Main artwork synchronization engine

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::catalog::{ArtType, ArtworkCatalog};
use crate::config::{ImageTypes, Settings};
use crate::filter::{FilterCriteria, FilterEngine};
use crate::shortcuts::{ShortcutReader, ShortcutRecord};
use crate::steam::UserContext;
use crate::sync::listing::existing_artwork;

/// What the engine should do with each selected shortcut
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Which shortcuts to process
    pub filter: FilterCriteria,
    /// Which art types to download
    pub image_types: ImageTypes,
}

impl SyncOptions {
    /// Options taken from settings, with no filter
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            filter: FilterCriteria::default(),
            image_types: settings.image_types,
        }
    }

    /// Set the filter criteria
    pub fn with_filter(mut self, filter: FilterCriteria) -> Self {
        self.filter = filter;
        self
    }
}

/// Progress event emitted while the engine runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A user directory is being processed
    UserStarted { user_id: String, shortcuts: usize },
    /// A shortcut passed the filter and is being processed
    ShortcutStarted { name: String, app_id: u32 },
    /// Artwork files already in the grid folder (list mode)
    ExistingArtwork { app_id: u32, files: Vec<String> },
    /// Searching the catalog for a shortcut's name
    Searching { name: String },
    /// The catalog has no game for this name
    NotFound { name: String },
    /// An image was written to the grid folder
    ArtworkDownloaded {
        app_id: u32,
        art: ArtType,
        path: PathBuf,
    },
    /// The catalog has no image of this type for the game
    ArtworkUnavailable { app_id: u32, art: ArtType },
    /// An image URL was found but could not be downloaded
    DownloadFailed { app_id: u32, art: ArtType },
    /// A shortcut is done; `downloaded` counts images written for it
    ShortcutFinished { name: String, downloaded: usize },
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(&SyncEvent) + Send + Sync>;

/// Tally of one engine run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// User directories processed
    pub users: usize,
    /// Shortcuts recovered across all users
    pub shortcuts_found: usize,
    /// Shortcuts that passed the filter
    pub shortcuts_selected: usize,
    /// Shortcut entries dropped because they could not be decoded
    pub entries_dropped: usize,
    /// Shortcuts the catalog had no game for
    pub not_found: usize,
    /// Shortcuts that received at least one image
    pub games_with_art: usize,
    /// Images written
    pub assets_downloaded: usize,
}

impl SyncSummary {
    /// Merge another summary into this one
    pub fn merge(&mut self, other: SyncSummary) {
        self.users += other.users;
        self.shortcuts_found += other.shortcuts_found;
        self.shortcuts_selected += other.shortcuts_selected;
        self.entries_dropped += other.entries_dropped;
        self.not_found += other.not_found;
        self.games_with_art += other.games_with_art;
        self.assets_downloaded += other.assets_downloaded;
    }
}

enum Mode<'a> {
    List,
    Fetch(&'a dyn ArtworkCatalog),
}

/// Drives users -> shortcuts -> filter -> list or fetch
pub struct SyncEngine {
    options: SyncOptions,
    progress_callback: Option<ProgressCallback>,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(options: SyncOptions) -> Self {
        Self {
            options,
            progress_callback: None,
        }
    }

    /// Set the progress callback
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Get the engine options
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Report existing artwork for every selected shortcut, without network calls
    pub fn list(&self, users: &[UserContext]) -> SyncSummary {
        self.run(users, Mode::List)
    }

    /// Search, look up and download artwork for every selected shortcut
    pub fn fetch(&self, users: &[UserContext], catalog: &dyn ArtworkCatalog) -> SyncSummary {
        self.run(users, Mode::Fetch(catalog))
    }

    fn report(&self, event: SyncEvent) {
        if let Some(ref callback) = self.progress_callback {
            callback(&event);
        }
    }

    fn run(&self, users: &[UserContext], mode: Mode<'_>) -> SyncSummary {
        let mut summary = SyncSummary::default();

        for user in users {
            summary.merge(self.run_user(user, &mode));
        }

        info!(
            "Processed {} user(s): {} shortcut(s), {} game(s) received artwork",
            summary.users, summary.shortcuts_selected, summary.games_with_art
        );
        summary
    }

    fn run_user(&self, user: &UserContext, mode: &Mode<'_>) -> SyncSummary {
        let mut summary = SyncSummary {
            users: 1,
            ..Default::default()
        };

        let shortcuts = self.load_shortcuts(user, &mut summary);
        summary.shortcuts_found = shortcuts.len();

        self.report(SyncEvent::UserStarted {
            user_id: user.user_id.clone(),
            shortcuts: shortcuts.len(),
        });

        for record in FilterEngine::filter(&shortcuts, &self.options.filter) {
            summary.shortcuts_selected += 1;
            self.report(SyncEvent::ShortcutStarted {
                name: record.name.clone(),
                app_id: record.app_id,
            });

            let downloaded = match mode {
                Mode::List => {
                    self.report(SyncEvent::ExistingArtwork {
                        app_id: record.app_id,
                        files: existing_artwork(&user.grid_dir(), record.app_id),
                    });
                    0
                }
                Mode::Fetch(catalog) => self.fetch_record(user, record, *catalog, &mut summary),
            };

            if downloaded > 0 {
                summary.games_with_art += 1;
                summary.assets_downloaded += downloaded;
            }

            self.report(SyncEvent::ShortcutFinished {
                name: record.name.clone(),
                downloaded,
            });
        }

        summary
    }

    /// Read a user's shortcuts; an unreadable file counts as no shortcuts
    fn load_shortcuts(&self, user: &UserContext, summary: &mut SyncSummary) -> Vec<ShortcutRecord> {
        let path = user.shortcuts_path();
        match ShortcutReader::read_outcome(&path) {
            Ok(outcome) => {
                summary.entries_dropped += outcome.errors.len();
                outcome.records
            }
            Err(e) => {
                warn!("Error reading shortcuts for user {}: {}", user.user_id, e);
                Vec::new()
            }
        }
    }

    /// Run search -> lookup -> download for one shortcut; returns images written
    fn fetch_record(
        &self,
        user: &UserContext,
        record: &ShortcutRecord,
        catalog: &dyn ArtworkCatalog,
        summary: &mut SyncSummary,
    ) -> usize {
        self.report(SyncEvent::Searching {
            name: record.name.clone(),
        });

        let Some(game_id) = catalog.search(&record.name) else {
            summary.not_found += 1;
            self.report(SyncEvent::NotFound {
                name: record.name.clone(),
            });
            return 0;
        };

        let mut downloaded = 0;
        for art in self.options.image_types.enabled() {
            let Some(url) = catalog.artwork_url(game_id, art) else {
                debug!("No {} for \"{}\" (game {})", art, record.name, game_id);
                self.report(SyncEvent::ArtworkUnavailable {
                    app_id: record.app_id,
                    art,
                });
                continue;
            };

            let path = user.artwork_path(record.app_id, art);
            if catalog.download(&url, &path) {
                downloaded += 1;
                self.report(SyncEvent::ArtworkDownloaded {
                    app_id: record.app_id,
                    art,
                    path,
                });
            } else {
                self.report(SyncEvent::DownloadFailed {
                    app_id: record.app_id,
                    art,
                });
            }
        }

        downloaded
    }
}
