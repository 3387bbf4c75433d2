//! SteamGridDB v2 API client
//!
//! Every lookup is independent and failable: transport errors, non-2xx
//! statuses, undecodable bodies, `success: false` and empty result sets all
//! collapse to "nothing found" with a logged diagnostic. Nothing is retried.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, warn};

use super::{ApiResponse, ArtType, ArtworkItem, SearchHit};
use crate::error::{Error, Result};

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.steamgriddb.com/api/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Lookup and download operations the sync engine needs from an artwork source
pub trait ArtworkCatalog {
    /// Find the catalog's game ID for a display name
    fn search(&self, name: &str) -> Option<u64>;

    /// Get the URL of the first image of one category for a game
    fn artwork_url(&self, game_id: u64, art: ArtType) -> Option<String>;

    /// Download `url` to `dest`, replacing any existing file
    ///
    /// Returns `true` on success.
    fn download(&self, url: &str, dest: &Path) -> bool;
}

/// Blocking HTTP client for SteamGridDB
pub struct SteamGridDb {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SteamGridDb {
    /// Create a client for the production API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("sgdb-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build `{base}/search/autocomplete/{name}` with the name percent-encoded
    pub fn search_url(&self, name: &str) -> Result<Url> {
        self.endpoint(&["search", "autocomplete", name])
    }

    /// Build `{base}/{grids|heroes|logos}/game/{id}` with any dimension filter
    pub fn artwork_request_url(&self, game_id: u64, art: ArtType) -> Result<Url> {
        let mut url = self.endpoint(&[art.endpoint(), "game", &game_id.to_string()])?;
        if let Some(dimensions) = art.dimensions() {
            url.query_pairs_mut().append_pair("dimensions", dimensions);
        }
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL {}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API base URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()?
            .error_for_status()?;

        Ok(response.json()?)
    }

    fn try_search(&self, name: &str) -> Result<Option<u64>> {
        let response: ApiResponse<SearchHit> = self.get_json(self.search_url(name)?)?;
        Ok(response.into_first()?.map(|hit| hit.id))
    }

    fn try_artwork_url(&self, game_id: u64, art: ArtType) -> Result<Option<String>> {
        let url = self.artwork_request_url(game_id, art)?;
        let response: ApiResponse<ArtworkItem> = self.get_json(url)?;
        Ok(response.into_first()?.map(|item| item.url))
    }

    fn try_download(&self, url: &str, dest: &Path) -> Result<u64> {
        debug!("Downloading {} to {}", url, dest.display());
        let mut response = self.client.get(url).send()?.error_for_status()?;
        write_stream(&mut response, dest)
    }
}

impl ArtworkCatalog for SteamGridDb {
    fn search(&self, name: &str) -> Option<u64> {
        match self.try_search(name) {
            Ok(Some(id)) => {
                debug!("Matched \"{}\" to SteamGridDB game {}", name, id);
                Some(id)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Search error for \"{}\": {}", name, e);
                None
            }
        }
    }

    fn artwork_url(&self, game_id: u64, art: ArtType) -> Option<String> {
        match self.try_artwork_url(game_id, art) {
            Ok(url) => url,
            Err(e) => {
                warn!("{} lookup failed for game {}: {}", art, game_id, e);
                None
            }
        }
    }

    fn download(&self, url: &str, dest: &Path) -> bool {
        match self.try_download(url, dest) {
            Ok(bytes) => {
                debug!("Wrote {} bytes to {}", bytes, dest.display());
                true
            }
            Err(e) => {
                warn!("Download error for {}: {}", url, e);
                false
            }
        }
    }
}

/// Stream `reader` into `dest`, creating parent directories
///
/// The destination is truncated first, so repeated writes replace the file.
pub fn write_stream<R: Read>(reader: &mut R, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(dest)?);
    let written = io::copy(reader, &mut writer)?;
    writer.flush()?;

    Ok(written)
}
