//! Manifest record types
//!
//! The export writes one JSON object per message. Only the message ID and the
//! document filename attribute are read; every other field is ignored.
//!
//! ```json
//! { "id": 42,
//!   "media": { "document": { "attributes": [
//!     { "className": "DocumentAttributeFilename", "fileName": "interview.m4a" } ] } } }
//! ```

use serde::Deserialize;
use std::fmt;

/// `className` of the attribute carrying the original filename
pub const FILENAME_ATTRIBUTE: &str = "DocumentAttributeFilename";

/// One manifest entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataRecord {
    pub id: Option<RecordId>,
    pub media: Option<Media>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Media {
    pub document: Option<Document>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    pub attributes: Option<Vec<DocumentAttribute>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentAttribute {
    #[serde(rename = "className")]
    pub class_name: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

/// Message ID, written by the exporter as either a number or a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl MetadataRecord {
    /// Document attributes, if the record carries `media.document.attributes`
    pub fn attributes(&self) -> Option<&[DocumentAttribute]> {
        let media = self.media.as_ref()?;
        let document = media.document.as_ref()?;
        document.attributes.as_deref()
    }

    /// Original filename from the record's filename attribute
    ///
    /// When several filename attributes are present the last one wins.
    pub fn original_file_name(&self) -> Option<&str> {
        self.attributes()?
            .iter()
            .filter(|attr| attr.class_name.as_deref() == Some(FILENAME_ATTRIBUTE))
            .filter_map(|attr| attr.file_name.as_deref())
            .last()
    }
}
