//! Rename run results

use std::path::PathBuf;

use super::audio_format::FormatCounts;

/// A file copied under its original name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedFile {
    /// File name in the input directory (e.g. `42.m4a`)
    pub source_name: String,
    /// File name written to the output directory (e.g. `interview.m4a`)
    pub output_name: String,
}

/// Outcome of a confirmed rename run
///
/// `processed_files == successful_renames + failed_renames.len()` once the run
/// completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    /// Audio files found in the input directory
    pub total_files: usize,
    /// Files visited, whatever the outcome
    pub processed_files: usize,
    /// Files copied to the output directory
    pub successful_renames: usize,
    /// One message per file that was not copied
    pub failed_renames: Vec<String>,
    /// Completed copies, in processing order
    pub renamed: Vec<RenamedFile>,
    /// Files found per format (formats with no files are absent)
    pub files_by_format: FormatCounts,
    pub output_directory: PathBuf,
    pub mpga_converted_to_mp3: bool,
}

impl ProcessingResult {
    pub fn new(
        total_files: usize,
        files_by_format: FormatCounts,
        output_directory: PathBuf,
        mpga_converted_to_mp3: bool,
    ) -> Self {
        Self {
            total_files,
            processed_files: 0,
            successful_renames: 0,
            failed_renames: Vec::new(),
            renamed: Vec::new(),
            files_by_format,
            output_directory,
            mpga_converted_to_mp3,
        }
    }

    /// Record a completed copy
    pub fn record_success(&mut self, source_name: String, output_name: String) {
        self.processed_files += 1;
        self.successful_renames += 1;
        self.renamed.push(RenamedFile {
            source_name,
            output_name,
        });
    }

    /// Record a file that was not copied
    pub fn record_failure(&mut self, message: String) {
        self.processed_files += 1;
        self.failed_renames.push(message);
    }
}
