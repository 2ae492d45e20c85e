//! Manifest loading
//!
//! Reads `metadata.json` and turns it into [`MetadataRecord`]s. Only the top
//! level is strict: the file must be a JSON array. Individual entries with an
//! unexpected shape are dropped here, the same way the ID map drops entries with
//! missing fields.

use std::path::Path;
use tracing::{debug, info};

use crate::models::MetadataRecord;
use crate::{Error, Result};

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Vec<MetadataRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let records = parse_manifest(&content).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(
        path = %path.display(),
        records = records.len(),
        "Loaded manifest"
    );
    Ok(records)
}

/// Parse manifest text
///
/// A leading byte-order mark is tolerated.
pub fn parse_manifest(content: &str) -> serde_json::Result<Vec<MetadataRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let raw: Vec<serde_json::Value> = serde_json::from_str(content)?;

    let records = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(index, error = %e, "Skipping manifest entry with unexpected shape");
                None
            }
        })
        .collect();

    Ok(records)
}
