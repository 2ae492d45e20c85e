//! Rename/copy processor
//!
//! Matches scanned files against the ID map, plans an output name for each, and
//! after confirmation copies them into the output directory.
//!
//! **Workflow:**
//! 1. [`RenameProcessor::plan`] resolves every file to an action without
//!    touching the filesystem
//! 2. The preview is printed and confirmation requested
//! 3. [`RenameProcessor::execute`] creates the output directory and copies
//!
//! Input files are only ever read. A failed copy is recorded and the batch
//! continues.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::models::{FormatCounts, ProcessingResult};
use crate::prompt::Prompter;
use crate::services::file_scanner::{AudioFileEntry, ScanResult};
use crate::services::id_map::IdFilenameMap;
use crate::services::reporter;
use crate::Result;

/// What to do when two files in one run resolve to the same output name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append ` (2)`, ` (3)`, … to the later file's name
    #[default]
    Suffix,
    /// Skip the later file and record it as failed
    Fail,
    /// Let the later file overwrite the earlier one
    Overwrite,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollisionPolicy::Suffix => "suffix",
            CollisionPolicy::Fail => "fail",
            CollisionPolicy::Overwrite => "overwrite",
        };
        f.write_str(name)
    }
}

/// Resolved options for one rename run
#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub output_dir: PathBuf,
    /// Write `.mpga` files with a `.mp3` extension
    pub convert_mpga_to_mp3: bool,
    pub on_collision: CollisionPolicy,
}

/// How the pre-flight confirmation is answered
pub enum Confirmation<'a> {
    /// Ask through the prompter
    Ask(&'a mut dyn Prompter),
    /// Proceed without asking
    Assumed,
}

/// Planned outcome for one scanned file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Copy to `output_name` in the output directory
    Copy { output_name: String },
    /// Stem is not a known export ID
    Unmatched,
    /// Output name already taken earlier in this run (fail policy), or by an
    /// input file when writing into the input directory
    Collision {
        output_name: String,
        claimed_by: String,
    },
}

#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub entry: AudioFileEntry,
    pub action: PlannedAction,
}

/// Rename plan with the counts shown before confirmation
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    /// One item per scanned file, in scan order
    pub files: Vec<PlannedFile>,
    pub by_format: FormatCounts,
    /// Files whose stem is in the ID map
    pub matched: usize,
    /// Matched files whose natural output name was already claimed or names an
    /// input file
    pub collisions: usize,
}

impl RenamePlan {
    pub fn total_files(&self) -> usize {
        self.files.len()
    }
}

/// Rename/copy processor
pub struct RenameProcessor {
    options: RenameOptions,
}

impl RenameProcessor {
    pub fn new(options: RenameOptions) -> Self {
        Self { options }
    }

    /// Resolve every scanned file to an action
    pub fn plan(&self, scan: &ScanResult, id_map: &IdFilenameMap) -> RenamePlan {
        let mut plan = RenamePlan {
            files: Vec::with_capacity(scan.files.len()),
            by_format: scan.by_format.clone(),
            matched: 0,
            collisions: 0,
        };
        // Keyed case-insensitively: "A.wav" and "a.wav" clash on some filesystems
        let mut claimed: HashMap<String, String> = HashMap::new();

        // Writing into the scanned directory: input files must never be targets
        let inputs: HashMap<String, String> = if same_path(&scan.dir, &self.options.output_dir) {
            warn!(dir = %scan.dir.display(), "Output directory is the input directory");
            scan.files
                .iter()
                .map(|e| (e.file_name.to_lowercase(), e.file_name.clone()))
                .collect()
        } else {
            HashMap::new()
        };
        let is_taken = |key: &str, claimed: &HashMap<String, String>| {
            claimed.contains_key(key) || inputs.contains_key(key)
        };

        for entry in &scan.files {
            let Some(base_name) = id_map.get(&entry.stem) else {
                plan.files.push(PlannedFile {
                    entry: entry.clone(),
                    action: PlannedAction::Unmatched,
                });
                continue;
            };
            plan.matched += 1;

            let base_name = sanitize_file_name(base_name);
            let extension = entry
                .format
                .output_extension(self.options.convert_mpga_to_mp3);
            let natural = format!("{}.{}", base_name, extension);

            let key = natural.to_lowercase();
            let action = if let Some(earlier) = claimed.get(&key) {
                plan.collisions += 1;
                warn!(
                    file = %entry.file_name,
                    output = %natural,
                    earlier = %earlier,
                    policy = %self.options.on_collision,
                    "Output name collision"
                );
                match self.options.on_collision {
                    CollisionPolicy::Overwrite => PlannedAction::Copy {
                        output_name: natural,
                    },
                    CollisionPolicy::Fail => PlannedAction::Collision {
                        output_name: natural,
                        claimed_by: earlier.clone(),
                    },
                    CollisionPolicy::Suffix => PlannedAction::Copy {
                        output_name: next_free_name(&base_name, extension, |candidate| {
                            is_taken(candidate, &claimed)
                        }),
                    },
                }
            } else if let Some(input) = inputs.get(&key) {
                plan.collisions += 1;
                warn!(
                    file = %entry.file_name,
                    output = %natural,
                    input = %input,
                    policy = %self.options.on_collision,
                    "Output name is an input file"
                );
                // Overwrite only ever applies to copies made in this run
                match self.options.on_collision {
                    CollisionPolicy::Suffix => PlannedAction::Copy {
                        output_name: next_free_name(&base_name, extension, |candidate| {
                            is_taken(candidate, &claimed)
                        }),
                    },
                    CollisionPolicy::Fail | CollisionPolicy::Overwrite => {
                        PlannedAction::Collision {
                            output_name: natural,
                            claimed_by: input.clone(),
                        }
                    }
                }
            } else {
                PlannedAction::Copy {
                    output_name: natural,
                }
            };

            if let PlannedAction::Copy { output_name } = &action {
                claimed.insert(output_name.to_lowercase(), entry.file_name.clone());
            }
            plan.files.push(PlannedFile {
                entry: entry.clone(),
                action,
            });
        }

        debug!(
            total = plan.total_files(),
            matched = plan.matched,
            collisions = plan.collisions,
            "Rename plan built"
        );
        plan
    }

    /// Copy every planned file, reporting progress to `out`
    ///
    /// Fails only if the output directory cannot be created or `out` cannot be
    /// written. Individual copy failures are recorded in the result.
    pub fn execute(&self, plan: &RenamePlan, out: &mut dyn Write) -> Result<ProcessingResult> {
        let output_dir = &self.options.output_dir;
        fs::create_dir_all(output_dir)?;
        info!(output_dir = %output_dir.display(), "Copying files");

        let mut result = ProcessingResult::new(
            plan.total_files(),
            plan.by_format.clone(),
            output_dir.clone(),
            self.options.convert_mpga_to_mp3,
        );

        for planned in &plan.files {
            let entry = &planned.entry;
            match &planned.action {
                PlannedAction::Copy { output_name } => {
                    let target = output_dir.join(output_name);
                    match copy_with_metadata(&entry.path, &target) {
                        Ok(()) => {
                            reporter::print_success(out, &entry.file_name, output_name)?;
                            result.record_success(entry.file_name.clone(), output_name.clone());
                        }
                        Err(e) => {
                            warn!(file = %entry.file_name, error = %e, "Copy failed");
                            let message =
                                format!("Failed to process {}: {}", entry.file_name, e);
                            reporter::print_failure(out, &message)?;
                            result.record_failure(message);
                        }
                    }
                }
                PlannedAction::Unmatched => {
                    let message = format!("No matching metadata found for: {}", entry.file_name);
                    reporter::print_failure(out, &message)?;
                    result.record_failure(message);
                }
                PlannedAction::Collision {
                    output_name,
                    claimed_by,
                } => {
                    let message = format!(
                        "Skipped {}: output name {} already used by {}",
                        entry.file_name, output_name, claimed_by
                    );
                    reporter::print_failure(out, &message)?;
                    result.record_failure(message);
                }
            }
        }

        info!(
            processed = result.processed_files,
            renamed = result.successful_renames,
            failed = result.failed_renames.len(),
            "Copy complete"
        );
        Ok(result)
    }

    /// Plan, preview, confirm, then execute
    ///
    /// Returns `None` when the confirmation is declined; nothing is written in
    /// that case, not even the output directory.
    pub fn process(
        &self,
        scan: &ScanResult,
        id_map: &IdFilenameMap,
        confirmation: Confirmation<'_>,
        out: &mut dyn Write,
    ) -> Result<Option<ProcessingResult>> {
        let plan = self.plan(scan, id_map);
        reporter::print_preview(out, &plan, self.options.on_collision)?;
        out.flush()?;

        let confirmed = match confirmation {
            Confirmation::Ask(prompter) => {
                prompter.confirm("Do you want to continue with the renaming process?")?
            }
            Confirmation::Assumed => true,
        };

        if !confirmed {
            writeln!(out, "Operation cancelled.")?;
            info!("Rename cancelled at confirmation");
            return Ok(None);
        }

        self.execute(&plan, out).map(Some)
    }
}

/// Replace path separators so a name cannot escape the output directory
fn sanitize_file_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// First `base (n).ext` not yet taken, starting at 2
///
/// `is_taken` receives the lowercased candidate.
fn next_free_name(base_name: &str, extension: &str, is_taken: impl Fn(&str) -> bool) -> String {
    (2..)
        .map(|n| format!("{} ({}).{}", base_name, n, extension))
        .find(|candidate| !is_taken(&candidate.to_lowercase()))
        .unwrap_or_else(|| format!("{}.{}", base_name, extension))
}

/// Copy file contents and permissions, then carry over timestamps
///
/// Timestamp failures are logged only.
fn copy_with_metadata(source: &Path, target: &Path) -> io::Result<()> {
    if same_path(source, target) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        ));
    }

    fs::copy(source, target)?;

    if let Err(e) = copy_timestamps(source, target) {
        warn!(
            target = %target.display(),
            error = %e,
            "Could not preserve file timestamps"
        );
    }
    Ok(())
}

/// Set the target's access/modification times from the source
///
/// `fs::copy` has already given the target the source's mode, which may be
/// read-only. On Unix setting times only needs ownership, so the target is
/// opened for reading.
fn copy_timestamps(source: &Path, target: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;
    let times = fs::FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    open_for_times(target)?.set_times(times)
}

#[cfg(unix)]
fn open_for_times(path: &Path) -> io::Result<fs::File> {
    fs::File::open(path)
}

// Windows needs write access to change file times
#[cfg(not(unix))]
fn open_for_times(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new().write(true).open(path)
}

/// Both paths resolve to the same filesystem entry
fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
