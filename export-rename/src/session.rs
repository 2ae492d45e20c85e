//! Rename session
//!
//! Gathers whatever [`SessionSettings`] leaves open by prompting, then runs the
//! pipeline: load manifest → build ID map → scan → confirm and copy → report.
//!
//! Prompt order: input directory, MPGA conversion, output directory, continue
//! after preview, write log.

use std::io::Write;
use tracing::{error, info};

use crate::config::{SessionSettings, MANIFEST_FILE_NAME};
use crate::models::ProcessingResult;
use crate::prompt::{ask_path, Prompter};
use crate::services::rename_processor::{Confirmation, RenameOptions, RenameProcessor};
use crate::services::{load_manifest, reporter, FileScanner, IdFilenameMap};
use crate::{Error, Result};

/// Run one rename session
///
/// Returns `None` when the operator declines at the preview. A results log that
/// cannot be written is reported on `out` and does not fail the session.
pub fn run(
    settings: &SessionSettings,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<Option<ProcessingResult>> {
    let input_dir = match &settings.input_dir {
        Some(dir) => dir.clone(),
        None => ask_path(prompter, "Enter the input directory path: ")?,
    };

    let manifest_path = input_dir.join(MANIFEST_FILE_NAME);
    if !manifest_path.is_file() {
        return Err(Error::MissingManifest(manifest_path));
    }

    let convert_mpga_to_mp3 = match settings.convert_mpga_to_mp3 {
        Some(convert) => convert,
        None => prompter.confirm("Do you want to convert MPGA files to .mp3 format?")?,
    };
    if convert_mpga_to_mp3 {
        writeln!(out, "MPGA files will be saved with .mp3 extension")?;
        writeln!(out, "All other formats will retain their original extensions")?;
    } else {
        writeln!(out, "All files will retain their original extensions")?;
    }

    let records = load_manifest(&manifest_path)?;
    let id_map = IdFilenameMap::build(&records);

    let output_dir = match &settings.output_dir {
        Some(dir) => dir.clone(),
        None => ask_path(prompter, "Enter the output directory path: ")?,
    };

    info!(
        input_dir = %input_dir.display(),
        output_dir = %output_dir.display(),
        convert_mpga_to_mp3,
        "Starting rename session"
    );

    let scan = FileScanner::new().scan(&input_dir)?;

    let processor = RenameProcessor::new(RenameOptions {
        output_dir: output_dir.clone(),
        convert_mpga_to_mp3,
        on_collision: settings.on_collision,
    });
    let confirmation = if settings.assume_yes {
        Confirmation::Assumed
    } else {
        Confirmation::Ask(&mut *prompter)
    };

    let Some(result) = processor.process(&scan, &id_map, confirmation, out)? else {
        return Ok(None);
    };
    reporter::print_summary(out, &result)?;
    out.flush()?;

    let write_log = match settings.write_log {
        Some(write_log) => write_log,
        None => prompter.confirm(&format!(
            "\nDo you want to create a {} file?",
            settings.log_file_name
        ))?,
    };
    if write_log {
        let log_path = output_dir.join(&settings.log_file_name);
        match reporter::write_log(&result, &log_path) {
            Ok(()) => writeln!(out, "Log file created at: {}", log_path.display())?,
            Err(e) => {
                error!(error = %e, "Results log not written");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    Ok(Some(result))
}
