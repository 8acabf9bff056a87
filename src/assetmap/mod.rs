//! Asset map collaborator.
//!
//! The asset map is a flat JSON object written by the build's hashing step,
//! mapping source asset paths to their content-versioned equivalents:
//!
//! ```json
//! { "app.js": "app.abc123.js", "style.css": "style.def456.css" }
//! ```
//!
//! Lookups are async and safe for concurrent callers; with `cache` enabled
//! the parsed map is held in an `ArcSwap` so repeated lookups never touch
//! the filesystem, with it disabled every lookup re-reads the file.

use std::{path::PathBuf, sync::Arc};

use arc_swap::ArcSwapOption;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Asset map resolution errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to read asset map `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("asset map `{0}` is not a valid JSON object")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("no mapping for `{0}`")]
    Missing(String),
}

/// Construction options, mirroring the `mapping_path` / `cache` /
/// `read_on_load` configuration keys.
#[derive(Debug, Clone)]
pub struct AssetMapOptions {
    pub mapping_path: PathBuf,
    pub cache: bool,
    pub read_on_load: bool,
}

/// Mapping from source asset paths to content-versioned output paths.
#[derive(Debug)]
pub struct AssetMap {
    path: PathBuf,
    cache: bool,
    loaded: ArcSwapOption<FxHashMap<String, String>>,
}

impl AssetMap {
    /// Construct the collaborator, loading the map up front when
    /// `read_on_load` is set.
    pub async fn open(options: AssetMapOptions) -> Result<Self, LookupError> {
        let map = Self {
            path: options.mapping_path,
            cache: options.cache,
            loaded: ArcSwapOption::empty(),
        };
        if options.read_on_load {
            map.load().await?;
        }
        Ok(map)
    }

    /// Resolve a reference term to its mapped value.
    pub async fn lookup_asset(&self, term: &str) -> Result<String, LookupError> {
        let map = self.load().await?;
        map.get(term)
            .cloned()
            .ok_or_else(|| LookupError::Missing(term.to_string()))
    }

    /// Load the map, honoring the cache flag.
    async fn load(&self) -> Result<Arc<FxHashMap<String, String>>, LookupError> {
        if self.cache
            && let Some(map) = self.loaded.load_full()
        {
            return Ok(map);
        }

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| LookupError::Io(self.path.clone(), err))?;
        let parsed: FxHashMap<String, String> = serde_json::from_slice(&bytes)
            .map_err(|err| LookupError::Parse(self.path.clone(), err))?;

        let map = Arc::new(parsed);
        if self.cache {
            self.loaded.store(Some(map.clone()));
        }
        Ok(map)
    }
}
