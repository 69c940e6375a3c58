//! Configuration for the claygen generator.
//!
//! Settings come from two places: a `claygen.toml` file and a protoc-style
//! parameter string (`impl=true,force=true,...`) that overlays it.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod file;
mod param;

pub use config::{Config, FormatConfig, GenerateConfig, TemplatesConfig, parse_config};
pub use error::{Error, Result, SourceContext};
pub use file::ClaygenToml;
