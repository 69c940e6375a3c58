//! Core utilities and types for the claygen generator.
//!
//! This crate provides output file handling and the Go-compatible path helpers
//! used across the claygen workspace.

mod file;
mod utils;

// File operations
pub use file::{OutputFile, Overwrite, WriteResult};
// Path and text utilities
pub use utils::{annotate_source, base_name, clean_path, extension, join_path, strip_extension};
