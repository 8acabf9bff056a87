//! Command-line interface module.

mod args;
pub mod check;
pub mod run;

pub use args::{Cli, Commands};

use crate::assetmap::{AssetMap, AssetMapOptions};
use crate::config::RevConfig;
use anyhow::Result;

/// Construct the shared asset map collaborator from configuration.
pub(crate) async fn open_asset_map(config: &RevConfig) -> Result<AssetMap> {
    let map = AssetMap::open(AssetMapOptions {
        mapping_path: config.mapping_path.clone(),
        cache: config.cache,
        read_on_load: config.read_on_load,
    })
    .await?;
    Ok(map)
}

/// Flatten an error and its sources into one display string.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
