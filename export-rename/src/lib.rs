//! export-rename library interface
//!
//! Restores the original filenames of audio files from a bulk chat export. The
//! exporter names each file by message ID (`42.m4a`) and writes a
//! `metadata.json` manifest recording each message's original filename; this
//! crate copies every file to an output directory under that original name.
//!
//! [`session::run`] drives the whole workflow; the pieces live in
//! [`services`] and can be used on their own.

pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod services;
pub mod session;

pub use crate::error::{Error, Result};
pub use crate::models::ProcessingResult;
pub use crate::services::rename_processor::{CollisionPolicy, RenameOptions};
