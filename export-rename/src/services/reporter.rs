//! Console and log-file reporting

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use crate::models::{FormatCounts, ProcessingResult};
use crate::services::rename_processor::{CollisionPolicy, RenamePlan};
use crate::{Error, Result};

/// Print the pre-flight summary shown before confirmation
pub fn print_preview(
    out: &mut dyn Write,
    plan: &RenamePlan,
    policy: CollisionPolicy,
) -> io::Result<()> {
    writeln!(out, "\nAudio files found:")?;
    print_format_counts(out, &plan.by_format)?;
    writeln!(
        out,
        "\nFound {} matching files out of {} total audio files",
        plan.matched,
        plan.total_files()
    )?;
    if plan.collisions > 0 {
        writeln!(
            out,
            "{} files resolve to an output name already used in this run (on collision: {})",
            plan.collisions, policy
        )?;
    }
    Ok(())
}

pub fn print_success(out: &mut dyn Write, source_name: &str, output_name: &str) -> io::Result<()> {
    writeln!(out, "Successfully processed: {} → {}", source_name, output_name)
}

pub fn print_failure(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message)
}

/// Print final totals after a run
pub fn print_summary(out: &mut dyn Write, result: &ProcessingResult) -> io::Result<()> {
    writeln!(
        out,
        "\nProcessed {} of {} files: {} renamed, {} failed",
        result.processed_files,
        result.total_files,
        result.successful_renames,
        result.failed_renames.len()
    )?;
    writeln!(out, "Output directory: {}", result.output_directory.display())
}

fn print_format_counts(out: &mut dyn Write, counts: &FormatCounts) -> io::Result<()> {
    for (format, count) in counts {
        writeln!(out, "{}: {} files", format, count)?;
    }
    Ok(())
}

/// Render the plaintext results log
pub fn render_log(result: &ProcessingResult, generated_at: DateTime<Local>) -> String {
    let mut log = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(log, "File Processing Results");
    let _ = writeln!(log, "======================");
    let _ = writeln!(log, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(log);

    let _ = writeln!(log, "Files by format:");
    for (format, count) in &result.files_by_format {
        let _ = writeln!(log, "{}: {} files", format, count);
    }

    let _ = writeln!(log, "\nTotal files in directory: {}", result.total_files);
    let _ = writeln!(log, "Files processed: {}", result.processed_files);
    let _ = writeln!(log, "Successful renames: {}", result.successful_renames);
    let _ = writeln!(log, "Output directory: {}", result.output_directory.display());
    if result.mpga_converted_to_mp3 {
        let _ = writeln!(log, "MPGA files were converted to MP3 extension");
    }
    let _ = writeln!(log);

    if !result.renamed.is_empty() {
        let _ = writeln!(log, "Renamed Files:");
        let _ = writeln!(log, "==============");
        for file in &result.renamed {
            let _ = writeln!(log, "- {} → {}", file.source_name, file.output_name);
        }
        let _ = writeln!(log);
    }

    if !result.failed_renames.is_empty() {
        let _ = writeln!(log, "Failed Operations:");
        let _ = writeln!(log, "=================");
        for failure in &result.failed_renames {
            let _ = writeln!(log, "- {}", failure);
        }
    }

    log
}

/// Write the results log to `path`, replacing any existing file
pub fn write_log(result: &ProcessingResult, path: &Path) -> Result<()> {
    let content = render_log(result, Local::now());
    std::fs::write(path, content).map_err(|e| Error::LogWrite(path.to_path_buf(), e))?;
    info!(path = %path.display(), "Results log written");
    Ok(())
}
