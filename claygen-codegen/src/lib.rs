//! Generation orchestrator for claygen.
//!
//! Turns parsed `.proto` descriptors into HTTP wiring files and optional
//! implementation stubs. Template rendering and source formatting are
//! collaborators supplied by the caller through [`Renderer`] and
//! [`SourceFormatter`].
//!
//! # Module Organization
//!
//! - [`generation`] - Import registry, root-path resolution, artifact planning,
//!   parameter assembly and the [`Generator`] driving them
//! - [`paths`] - Output file naming
//! - [`testing`] - Collaborator doubles (feature-gated)

mod error;
mod render;

pub mod generation;
pub mod paths;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Error, Result};
pub use generation::{
    Artifact, ArtifactPlan, ArtifactPlanner, Generation, Generator, GeneratorOptions, ImplPlan,
    ImportRegistry, ImportSet, ParamAssembler, RenderParams, RootPathResolver, Session,
    StubProbe, ToolDirProbe, ToolLocation,
};
pub use render::{ArtifactKind, BoxError, Passthrough, Renderer, SourceFormatter};
