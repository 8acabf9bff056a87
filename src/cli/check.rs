//! Dry-run validation for the `check` command.
//!
//! Scans every configured input, resolves each region's reference against
//! the asset map and reports what `run` would substitute. Nothing is
//! written.

use std::path::Path;

use anyhow::{Result, bail};

use super::{error_chain, open_asset_map};
use crate::assetmap::AssetMap;
use crate::config::{Markers, RevConfig};
use crate::pipeline::{ProcessError, resolve_regions, scan_regions, split_lines};
use crate::{debug, log, logger};

/// Validate all configured file pairs without writing output.
pub async fn check_files(config: &RevConfig) -> Result<()> {
    if config.files.is_empty() {
        bail!(
            "no files configured; add [[files]] entries to {}",
            config.config_path.display()
        );
    }

    let assets = open_asset_map(config).await?;
    let markers = config.markers();

    let mut regions = 0usize;
    let mut failed = 0usize;
    for pair in &config.files {
        let display = config.root_relative(&pair.input).display().to_string();
        match check_file(&pair.input, markers, &assets, &config.ui_path).await {
            Ok(report) if report.is_empty() => {
                logger::status_unchanged(&format!("{display}: no regions"));
            }
            Ok(report) => {
                regions += report.len();
                logger::status_success(&format!("{display}: {} region(s)", report.len()));
                for line in &report {
                    debug!("check"; "{line}");
                }
            }
            Err(err) => {
                failed += 1;
                logger::status_error(&display, &error_chain(&err));
            }
        }
    }

    if failed > 0 {
        bail!("{failed} file(s) failed validation");
    }

    log!("check"; "{} region(s) across {} file(s), all resolvable", regions, config.files.len());
    Ok(())
}

/// Scan and resolve one input, returning a per-region summary.
async fn check_file(
    input: &Path,
    markers: &Markers,
    assets: &AssetMap,
    ui_path: &str,
) -> Result<Vec<String>, ProcessError> {
    let content = tokio::fs::read_to_string(input)
        .await
        .map_err(|err| ProcessError::Read(input.to_path_buf(), err))?;

    let lines = split_lines(&content);
    let regions = scan_regions(&lines, markers)?;
    let replacements = resolve_regions(regions, assets, ui_path).await?;

    Ok(replacements
        .iter()
        .map(|r| {
            format!(
                "line {}: {} => {}",
                r.region.start_index + 1,
                r.region.term,
                r.markup
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assetmap::AssetMapOptions;
    use crate::pipeline::LINE_SEPARATOR;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_check_file_reports_regions() {
        let dir = TempDir::new().unwrap();
        let mapping_path = dir.path().join("assets.json");
        fs::write(&mapping_path, r#"{"app.js": "app.1.js"}"#).unwrap();
        let input = dir.path().join("index.html");
        fs::write(
            &input,
            ["<!-- taskkit:app.js -->", "old", "<!-- taskkit:end -->"].join(LINE_SEPARATOR),
        )
        .unwrap();

        let assets = AssetMap::open(AssetMapOptions {
            mapping_path,
            cache: true,
            read_on_load: true,
        })
        .await
        .unwrap();

        let report = check_file(&input, &Markers::default(), &assets, "/static/")
            .await
            .unwrap();
        assert_eq!(report.len(), 1);
        assert!(report[0].starts_with("line 1: app.js"));
        assert!(report[0].contains("/static/app.1.js"));
        // Dry run: the input file is untouched
        assert!(fs::read_to_string(&input).unwrap().contains("old"));
    }

    #[tokio::test]
    async fn test_check_file_surfaces_unresolvable_reference() {
        let dir = TempDir::new().unwrap();
        let mapping_path = dir.path().join("assets.json");
        fs::write(&mapping_path, "{}").unwrap();
        let input = dir.path().join("index.html");
        fs::write(
            &input,
            ["<!-- taskkit:gone.css -->", "<!-- taskkit:end -->"].join(LINE_SEPARATOR),
        )
        .unwrap();

        let assets = AssetMap::open(AssetMapOptions {
            mapping_path,
            cache: true,
            read_on_load: true,
        })
        .await
        .unwrap();

        let err = check_file(&input, &Markers::default(), &assets, "")
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Lookup { term, .. } if term == "gone.css"));
    }
}
