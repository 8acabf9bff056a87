//! The scan → resolve → substitute pipeline.
//!
//! One file's processing is fully staged: read the input, split into lines,
//! scan for marker regions, resolve every region's reference concurrently,
//! substitute by line range, then write the complete result once. If any
//! stage fails the output path is never touched.

mod resolve;
mod scan;
mod split;
mod substitute;

pub use resolve::{Replacement, resolve_regions};
pub use scan::{Region, scan_regions};
pub use split::{LINE_SEPARATOR, split_lines};
pub use substitute::substitute;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assetmap::{AssetMap, LookupError};
use crate::config::Markers;

/// Per-file pipeline errors
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("start marker on line {line} has no matching end marker")]
    Unterminated { line: usize },

    #[error("asset lookup failed for `{term}`")]
    Lookup {
        term: String,
        #[source]
        source: LookupError,
    },

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Rewrite document content in memory.
///
/// A document without any region is returned byte-identical, bypassing the
/// split/join cycle entirely.
pub async fn rewrite(
    content: &str,
    markers: &Markers,
    assets: &AssetMap,
    ui_path: &str,
) -> Result<String, ProcessError> {
    let lines = split_lines(content);
    let regions = scan_regions(&lines, markers)?;
    if regions.is_empty() {
        return Ok(content.to_string());
    }

    let replacements = resolve_regions(regions, assets, ui_path).await?;
    Ok(substitute(&lines, &replacements))
}

/// Process one file: read, rewrite, write.
///
/// The write happens exactly once with the fully computed content, or not
/// at all when an earlier stage failed.
pub async fn process(
    input: &Path,
    output: &Path,
    markers: &Markers,
    assets: &AssetMap,
    ui_path: &str,
) -> Result<(), ProcessError> {
    let content = tokio::fs::read_to_string(input)
        .await
        .map_err(|err| ProcessError::Read(input.to_path_buf(), err))?;

    let rewritten = rewrite(&content, markers, assets, ui_path).await?;

    tokio::fs::write(output, rewritten)
        .await
        .map_err(|err| ProcessError::Write(output.to_path_buf(), err))
}
