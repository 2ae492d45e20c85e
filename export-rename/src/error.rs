//! Error types for export-rename
//!
//! Fatal errors abort the run. Per-file copy failures and unmatched files are
//! not errors: they are recorded in
//! [`ProcessingResult::failed_renames`](crate::models::ProcessingResult) and the
//! batch continues.

use std::path::PathBuf;
use thiserror::Error;

use crate::services::file_scanner::ScanError;

/// Result type for export-rename operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a rename run
#[derive(Debug, Error)]
pub enum Error {
    /// `metadata.json` is absent from the input directory
    #[error("metadata.json not found in the input directory: {0}")]
    MissingManifest(PathBuf),

    /// Manifest could not be read or is not a JSON array
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Input directory could not be scanned
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console prompt could not be read or written
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Summary log could not be written
    #[error("Failed to write log file {0}: {1}")]
    LogWrite(PathBuf, #[source] std::io::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
