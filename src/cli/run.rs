//! Batch driver for the `run` command.
//!
//! Every configured file pair is processed concurrently; each file has its
//! own document and region set, sharing only the asset map. One file's
//! failure is reported and does not stop the others.

use std::sync::Arc;

use anyhow::{Result, bail};
use tokio::task::JoinSet;

use super::{error_chain, open_asset_map};
use crate::config::RevConfig;
use crate::{debug, log, logger, pipeline};

/// Process all configured file pairs.
pub async fn run_files(config: &RevConfig) -> Result<()> {
    if config.files.is_empty() {
        bail!(
            "no files configured; add [[files]] entries to {}",
            config.config_path.display()
        );
    }

    let assets = Arc::new(open_asset_map(config).await?);
    let markers = Arc::new(config.markers().clone());
    let ui_path: Arc<str> = Arc::from(config.ui_path.as_str());

    debug!("run"; "processing {} file(s)", config.files.len());

    let mut tasks = JoinSet::new();
    for pair in config.files.clone() {
        let assets = assets.clone();
        let markers = markers.clone();
        let ui_path = ui_path.clone();
        tasks.spawn(async move {
            let result =
                pipeline::process(&pair.input, &pair.output, &markers, &assets, &ui_path).await;
            (pair, result)
        });
    }

    let mut rewritten = 0usize;
    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (pair, result) = joined?;
        match result {
            Ok(()) => {
                rewritten += 1;
                logger::status_success(&format!(
                    "{} -> {}",
                    config.root_relative(&pair.input).display(),
                    config.root_relative(&pair.output).display()
                ));
            }
            Err(err) => {
                failed += 1;
                logger::status_error(
                    &config.root_relative(&pair.input).display().to_string(),
                    &error_chain(&err),
                );
            }
        }
    }

    if failed > 0 {
        log!("run"; "{} rewritten, {} failed", rewritten, failed);
        bail!("{failed} file(s) failed");
    }

    log!("run"; "{} file(s) rewritten", rewritten);
    Ok(())
}
