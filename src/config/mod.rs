//! Configuration management for `revinject.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError
//! ├── markers    # compiled start/end marker patterns
//! └── mod.rs     # RevConfig (this file)
//! ```
//!
//! # Options
//!
//! | Option         | Purpose                                            |
//! |----------------|----------------------------------------------------|
//! | `mapping_path` | JSON asset map location                            |
//! | `start_tag`    | start marker regex (one capture group = reference) |
//! | `end_tag`      | end marker regex                                   |
//! | `ui_path`      | base path joined onto relative mapped values       |
//! | `cache`        | keep the parsed asset map in memory                |
//! | `read_on_load` | load the asset map at startup                      |
//! | `[[files]]`    | input/output path pairs to process                 |

mod error;
mod markers;

pub use error::ConfigError;
pub use markers::{DEFAULT_END_TAG, DEFAULT_START_TAG, Markers};

use crate::log;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

// ============================================================================
// root configuration
// ============================================================================

/// One input/output pair from the `[[files]]` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePair {
    /// Source file containing marker regions
    pub input: PathBuf,
    /// Destination for the rewritten text
    pub output: PathBuf,
}

/// Root configuration structure representing revinject.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Path to the JSON asset map
    #[serde(default = "default_mapping_path")]
    pub mapping_path: PathBuf,

    /// Start marker pattern; its single capture group yields the asset
    /// reference term
    #[serde(default = "default_start_tag")]
    pub start_tag: String,

    /// End marker pattern
    #[serde(default = "default_end_tag")]
    pub end_tag: String,

    /// Base path for generated URLs
    #[serde(default)]
    pub ui_path: String,

    /// Keep the parsed asset map in memory between lookups
    #[serde(default = "default_true")]
    pub cache: bool,

    /// Load the asset map when the collaborator is constructed
    #[serde(default = "default_true")]
    pub read_on_load: bool,

    /// Input/output pairs to process
    #[serde(default)]
    pub files: Vec<FilePair>,

    /// Compiled marker patterns (internal use only)
    #[serde(skip)]
    markers: OnceLock<Markers>,
}

fn default_mapping_path() -> PathBuf {
    PathBuf::from("assets.json")
}

fn default_start_tag() -> String {
    DEFAULT_START_TAG.to_string()
}

fn default_end_tag() -> String {
    DEFAULT_END_TAG.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RevConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            mapping_path: default_mapping_path(),
            start_tag: default_start_tag(),
            end_tag: default_end_tag(),
            ui_path: String::new(),
            cache: true,
            read_on_load: true,
            files: Vec::new(),
            markers: OnceLock::new(),
        }
    }
}

impl RevConfig {
    /// Load configuration from a config file path.
    ///
    /// Paths in the file resolve relative to its parent directory, and the
    /// marker patterns are compiled (and validated) exactly once here.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_path(path)?;

        config.config_path = path.to_path_buf();
        config.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.normalize_paths();
        config.compile_markers()?;

        Ok(config)
    }

    /// Read and parse the config file, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve configured paths against the project root.
    fn normalize_paths(&mut self) {
        self.mapping_path = self.root_join(&self.mapping_path);
        for pair in &mut self.files {
            pair.input = self.root.join(&pair.input);
            pair.output = self.root.join(&pair.output);
        }
    }

    /// Compile the marker patterns, rejecting invalid configuration.
    fn compile_markers(&self) -> Result<(), ConfigError> {
        let compiled = Markers::compile(&self.start_tag, &self.end_tag)?;
        // load() runs before any other accessor, so the cell is empty here
        let _ = self.markers.set(compiled);
        Ok(())
    }

    /// Compiled marker patterns, shared across all documents.
    pub fn markers(&self) -> &Markers {
        self.markers
            .get_or_init(|| Markers::compile(&self.start_tag, &self.end_tag).unwrap_or_default())
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Get path relative to the project root (for display).
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("revinject.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let config = RevConfig::load(&path).unwrap();
        assert_eq!(config.start_tag, DEFAULT_START_TAG);
        assert_eq!(config.end_tag, DEFAULT_END_TAG);
        assert_eq!(config.ui_path, "");
        assert!(config.cache);
        assert!(config.read_on_load);
        assert!(config.files.is_empty());
        assert_eq!(config.mapping_path, dir.path().join("assets.json"));
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
mapping_path = "build/assets.json"
ui_path = "/static/"
cache = false
read_on_load = false

[[files]]
input = "templates/index.html"
output = "dist/index.html"
"#,
        );

        let config = RevConfig::load(&path).unwrap();
        assert_eq!(config.mapping_path, dir.path().join("build/assets.json"));
        assert_eq!(config.ui_path, "/static/");
        assert!(!config.cache);
        assert!(!config.read_on_load);
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.files[0].input, dir.path().join("templates/index.html"));
        assert_eq!(config.files[0].output, dir.path().join("dist/index.html"));
    }

    #[test]
    fn test_markers_compiled_once() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");

        let config = RevConfig::load(&path).unwrap();
        let first: *const Markers = config.markers();
        let second: *const Markers = config.markers();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_start_tag_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "start_tag = '<!-- no capture group -->'\n");

        assert!(RevConfig::load(&path).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = TempDir::new().unwrap();
        assert!(RevConfig::load(&dir.path().join("absent.toml")).is_err());
    }
}
