//! Compiled marker patterns.
//!
//! The start/end patterns come from configuration as plain strings and are
//! compiled exactly once at load time; every document processed afterwards
//! reuses the same immutable `Markers` value.

use regex::Regex;

use super::ConfigError;

/// Default start marker: the capture group yields the asset reference term.
pub const DEFAULT_START_TAG: &str = "<!-- taskkit:(.*?) -->";

/// Default end marker.
pub const DEFAULT_END_TAG: &str = "<!-- taskkit:end -->";

/// Compiled start/end marker patterns.
#[derive(Debug, Clone)]
pub struct Markers {
    /// Matches a region's opening line; its single capture group is the
    /// asset reference term.
    pub start: Regex,
    /// Matches a region's closing line.
    pub end: Regex,
}

impl Markers {
    /// Compile both patterns, validating that the start pattern carries
    /// exactly one capture group.
    pub fn compile(start_tag: &str, end_tag: &str) -> Result<Self, ConfigError> {
        let start = Regex::new(start_tag).map_err(|e| ConfigError::Pattern("start_tag", e))?;
        let end = Regex::new(end_tag).map_err(|e| ConfigError::Pattern("end_tag", e))?;

        // captures_len() counts the implicit whole-match group
        if start.captures_len() != 2 {
            return Err(ConfigError::Validation(format!(
                "`start_tag` must have exactly one capture group for the asset reference, found {}",
                start.captures_len() - 1
            )));
        }

        Ok(Self { start, end })
    }
}

impl Default for Markers {
    fn default() -> Self {
        // The default patterns are known-good at compile time
        Self::compile(DEFAULT_START_TAG, DEFAULT_END_TAG)
            .expect("default marker patterns must compile")
    }
}
