//! Test Helper Utilities
//!
//! Shared fixtures for export-rename integration tests

#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use export_rename::config::SessionSettings;
use export_rename::prompt::ConsolePrompter;

/// Scripted console: answers are fed line by line, prompts are captured
pub type ScriptedPrompter = ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>>;

pub fn scripted(answers: &[&str]) -> ScriptedPrompter {
    let mut input = answers.join("\n");
    input.push('\n');
    ConsolePrompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// An export directory plus an (initially absent) output directory
pub struct ExportFixture {
    _temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ExportFixture {
    /// Export directory with `metadata.json` mapping each `(id, fileName)`
    pub fn new(entries: &[(u64, &str)]) -> Self {
        let records: Vec<String> = entries
            .iter()
            .map(|(id, file_name)| manifest_record(*id, file_name))
            .collect();
        Self::with_manifest(&format!("[{}]", records.join(",\n")))
    }

    /// Export directory with raw manifest text
    pub fn with_manifest(manifest: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("export");
        let output_dir = temp_dir.path().join("renamed");
        fs::create_dir(&input_dir).unwrap();
        fs::write(input_dir.join("metadata.json"), manifest).unwrap();

        Self {
            _temp_dir: temp_dir,
            input_dir,
            output_dir,
        }
    }

    /// Export directory without a manifest
    pub fn without_manifest() -> Self {
        let fixture = Self::with_manifest("[]");
        fs::remove_file(fixture.input_dir.join("metadata.json")).unwrap();
        fixture
    }

    /// Add an exported audio file whose content is its own name
    pub fn add_file(&self, name: &str) -> PathBuf {
        let path = self.input_dir.join(name);
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    /// Settings with both directories filled in and every question answered
    pub fn settings(&self, convert_mpga_to_mp3: bool) -> SessionSettings {
        SessionSettings {
            input_dir: Some(self.input_dir.clone()),
            output_dir: Some(self.output_dir.clone()),
            convert_mpga_to_mp3: Some(convert_mpga_to_mp3),
            write_log: Some(false),
            assume_yes: true,
            ..Default::default()
        }
    }

    /// Sorted file names in the output directory
    pub fn output_names(&self) -> Vec<String> {
        list_names(&self.output_dir)
    }
}

pub fn manifest_record(id: u64, file_name: &str) -> String {
    format!(
        r#"{{"id": {}, "media": {{"document": {{"attributes": [{{"className": "DocumentAttributeFilename", "fileName": "{}"}}]}}}}}}"#,
        id, file_name
    )
}

pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn output_text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}
