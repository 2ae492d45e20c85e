//! Rename pipeline services
//!
//! Load → map → scan → copy → report, in that order.

pub mod file_scanner;
pub mod id_map;
pub mod manifest_loader;
pub mod rename_processor;
pub mod reporter;

pub use file_scanner::{AudioFileEntry, FileScanner, ScanError, ScanResult};
pub use id_map::{strip_extension, IdFilenameMap};
pub use manifest_loader::{load_manifest, parse_manifest};
pub use rename_processor::{
    CollisionPolicy, Confirmation, PlannedAction, PlannedFile, RenameOptions, RenamePlan,
    RenameProcessor,
};
