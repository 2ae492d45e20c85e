//! Data models for the rename workflow

pub mod audio_format;
pub mod manifest;
pub mod processing_result;

pub use audio_format::{AudioFormat, FormatCounts};
pub use manifest::{DocumentAttribute, MetadataRecord, RecordId, FILENAME_ATTRIBUTE};
pub use processing_result::{ProcessingResult, RenamedFile};
