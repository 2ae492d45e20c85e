//! ID → original filename mapping

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::models::MetadataRecord;

/// Lookup from export ID to original base filename (extension stripped)
///
/// Built once from the manifest and read-only afterwards. When an ID appears in
/// more than one record the later record wins; such overrides are counted.
#[derive(Debug, Clone, Default)]
pub struct IdFilenameMap {
    entries: HashMap<String, String>,
    overridden: usize,
}

impl IdFilenameMap {
    /// Build the map from manifest records, in manifest order
    ///
    /// Records without an `id`, without `media.document.attributes`, or without a
    /// filename attribute are skipped.
    pub fn build(records: &[MetadataRecord]) -> Self {
        let mut map = Self::default();
        let mut skipped = 0usize;

        for record in records {
            let Some(id) = record.id.as_ref() else {
                skipped += 1;
                continue;
            };
            let Some(file_name) = record.original_file_name() else {
                debug!(id = %id, "Record has no filename attribute");
                skipped += 1;
                continue;
            };

            let base_name = strip_extension(file_name).to_string();
            if let Some(previous) = map.entries.insert(id.to_string(), base_name) {
                debug!(id = %id, previous = %previous, "Duplicate ID replaces earlier record");
                map.overridden += 1;
            }
        }

        if map.overridden > 0 {
            warn!(
                count = map.overridden,
                "Manifest repeats IDs; the last record for each ID was used"
            );
        }

        info!(
            mapped = map.entries.len(),
            skipped,
            "Built ID to filename map"
        );
        map
    }

    /// Base filename recorded for `id`
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records whose ID replaced an earlier record's mapping
    pub fn overridden_ids(&self) -> usize {
        self.overridden
    }
}

/// Remove the final extension from a filename
///
/// Only the last `.` of the last path component counts, and dots leading the
/// component do not start an extension (`.hidden` is kept whole).
pub fn strip_extension(file_name: &str) -> &str {
    let component_start = file_name
        .rfind(|c: char| c == '/' || c == '\\')
        .map(|i| i + 1)
        .unwrap_or(0);
    let component = &file_name[component_start..];

    match component.rfind('.') {
        Some(dot) if component[..dot].chars().any(|c| c != '.') => {
            &file_name[..component_start + dot]
        }
        _ => file_name,
    }
}
