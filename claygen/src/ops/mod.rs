//! Core operations.
//!
//! This module contains the business logic for claygen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod load;

pub use check::check;
pub use generate::{GenerateOptions, generate};
