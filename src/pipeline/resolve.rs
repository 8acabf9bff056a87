//! Concurrent asset resolution and markup generation.
//!
//! All region lookups for a document are issued at once; the phase succeeds
//! only when every lookup succeeds and fails as soon as the first failure is
//! observed. Siblings still in flight after a failure are discarded.

use std::{path::Path, sync::OnceLock};

use futures::future::try_join_all;
use url::Url;

use super::{ProcessError, Region};
use crate::assetmap::AssetMap;

/// A region paired with its generated markup line. The 3-line sequence
/// `[start line, markup, end line]` supersedes the region's full span.
#[derive(Debug, Clone)]
pub struct Replacement {
    pub region: Region,
    pub markup: String,
}

/// Resolve every region's reference term and generate its markup.
///
/// Fan-out/fan-in with fail-fast aggregation: the returned error is the
/// first lookup failure, and no partial result escapes.
pub async fn resolve_regions(
    regions: Vec<Region>,
    assets: &AssetMap,
    ui_path: &str,
) -> Result<Vec<Replacement>, ProcessError> {
    let lookups = regions.into_iter().map(|region| async move {
        let mapped =
            assets
                .lookup_asset(&region.term)
                .await
                .map_err(|source| ProcessError::Lookup {
                    term: region.term.clone(),
                    source,
                })?;
        let markup = generate_markup(&region.term, &mapped, ui_path);
        Ok(Replacement { region, markup })
    });

    try_join_all(lookups).await
}

/// Generate the markup line for a resolved region, keyed on the reference
/// term's file extension.
///
/// `.js` and `.css` get wrapping tags with the mapped value resolved against
/// the base path; anything else substitutes the mapped value verbatim.
fn generate_markup(term: &str, mapped: &str, ui_path: &str) -> String {
    match Path::new(term).extension().and_then(|ext| ext.to_str()) {
        Some("js") => format!(
            r#"<script type="application/javascript" src="{}"></script>"#,
            resolve_against_base(ui_path, mapped)
        ),
        Some("css") => format!(
            r#"<link rel="stylesheet" href="{}"/>"#,
            resolve_against_base(ui_path, mapped)
        ),
        _ => mapped.to_string(),
    }
}

/// Standard relative-URL resolution of a mapped value against the base path.
///
/// Absolute mapped values pass through unchanged, as does everything when no
/// base is configured. Path-only bases are joined against a dummy authority
/// since the url crate cannot parse them standalone.
fn resolve_against_base(base: &str, mapped: &str) -> String {
    if base.is_empty() || Url::parse(mapped).is_ok() {
        return mapped.to_string();
    }

    // Base carrying its own scheme resolves directly
    if let Ok(base_url) = Url::parse(base) {
        return base_url
            .join(mapped)
            .map(|joined| joined.to_string())
            .unwrap_or_else(|_| mapped.to_string());
    }

    static DUMMY: OnceLock<Url> = OnceLock::new();
    let dummy = DUMMY.get_or_init(|| Url::parse("http://x").unwrap());

    match dummy.join(base).and_then(|b| b.join(mapped)) {
        Ok(joined) => {
            let mut resolved = joined.path().to_string();
            if let Some(query) = joined.query() {
                resolved.push('?');
                resolved.push_str(query);
            }
            // Keep relative bases relative
            if !base.starts_with('/') && resolved.starts_with('/') {
                resolved.remove(0);
            }
            resolved
        }
        Err(_) => mapped.to_string(),
    }
}
