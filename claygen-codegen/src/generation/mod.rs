//! Generation: from descriptors to output files.
//!
//! - [`ImportRegistry`] - Session-wide package alias bookkeeping
//! - [`ImportSet`] - Ordered, path-deduplicated import lists
//! - [`RootPathResolver`] - Import path of the running tool
//! - [`ArtifactPlanner`] - Which files to emit for an input
//! - [`ParamAssembler`] - Template parameters per artifact
//! - [`Generator`] - The per-file loop driving all of the above

mod generator;
mod imports;
mod params;
mod planner;
mod root_path;

pub use generator::{Artifact, Generation, Generator, GeneratorOptions, Session};
pub use imports::{ImportRegistry, ImportSet};
pub use params::{COMMON_IMPORTS, DESC_IMPORTS, IMPL_IMPORTS, ParamAssembler, RenderParams};
pub use planner::{ArtifactPlan, ArtifactPlanner, ImplPlan, StubProbe, ToolDirProbe};
pub use root_path::{RootPathResolver, ToolLocation};
