//! Audio file scanner
//!
//! Finds exported audio files directly inside the input directory. Only the
//! extension is checked; file contents are never read.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::models::{AudioFormat, FormatCounts};

/// Audio file scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory listing could not be read
    #[error("Cannot read directory {0}: {1}")]
    ReadDir(PathBuf, String),
}

/// An exported audio file whose stem is a candidate export ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFileEntry {
    pub path: PathBuf,
    /// File name as found on disk (e.g. `42.M4A`)
    pub file_name: String,
    /// File name without its extension (e.g. `42`)
    pub stem: String,
    pub format: AudioFormat,
}

impl AudioFileEntry {
    /// Build an entry if `path` has a supported audio extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let format = AudioFormat::from_extension(path.extension()?.to_str()?)?;
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let stem = path.file_stem()?.to_string_lossy().into_owned();

        Some(Self {
            path: path.to_path_buf(),
            file_name,
            stem,
            format,
        })
    }
}

/// Scan result with statistics
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Directory that was scanned
    pub dir: PathBuf,
    /// Audio files, grouped by format in [`AudioFormat::ALL`] order and sorted
    /// by file name within each group
    pub files: Vec<AudioFileEntry>,
    /// Count of files by audio format
    pub by_format: FormatCounts,
}

impl ScanResult {
    pub fn total_files(&self) -> usize {
        self.files.len()
    }
}

/// Audio file scanner
pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan the immediate children of `dir` for audio files
    ///
    /// Subdirectories are not descended into. Symlinks to files are followed.
    pub fn scan(&self, dir: &Path) -> Result<ScanResult, ScanError> {
        if !dir.exists() {
            return Err(ScanError::PathNotFound(dir.to_path_buf()));
        }

        if !dir.is_dir() {
            return Err(ScanError::NotADirectory(dir.to_path_buf()));
        }

        std::fs::read_dir(dir)
            .map_err(|e| ScanError::ReadDir(dir.to_path_buf(), e.to_string()))?;

        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let Some(audio) = AudioFileEntry::from_path(entry.path()) else {
                        continue;
                    };
                    if seen.insert(audio.path.clone()) {
                        candidates.push(audio);
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.format
                .cmp(&b.format)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });

        let mut by_format = FormatCounts::new();
        for file in &candidates {
            *by_format.entry(file.format).or_insert(0) += 1;
        }

        tracing::debug!(
            dir = %dir.display(),
            files = candidates.len(),
            "Scan complete"
        );

        Ok(ScanResult {
            dir: dir.to_path_buf(),
            files: candidates,
            by_format,
        })
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
