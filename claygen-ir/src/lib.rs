//! Descriptor types for the claygen generator.
//!
//! This crate holds the already-parsed view of `.proto` files that the
//! generator consumes. Parsing protobuf sources is left to an external
//! front-end; it hands over a [`DescriptorSet`] as JSON.
//!
//! # Architecture
//!
//! ```text
//! *.proto → protoc front-end → DescriptorSet (JSON) → claygen-ir → codegen
//! ```

mod descriptor;
mod package;
mod set;

pub use descriptor::{HttpMethod, HttpRule, MessageRef, Method, ProtoFile, Service};
pub use package::GoPackage;
pub use set::{DescriptorSet, LoadError};
