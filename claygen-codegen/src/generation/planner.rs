//! Deciding which artifacts to emit for an input file.

use std::path::PathBuf;

use claygen_ir::ProtoFile;
use tracing::{debug, info};

use super::ToolLocation;
use crate::paths::{desc_output_name, impl_output_name};

/// Checks whether an implementation stub already exists.
pub trait StubProbe {
    /// `path` is the stub's output name, relative to wherever the probe looks.
    fn exists(&self, path: &str) -> bool;
}

/// Looks for existing stubs relative to the tool's own directory.
///
/// This is where the check has always been made, even though stubs are
/// written relative to the invocation's output directory. The two only agree
/// when the generator runs from its own directory; worth revisiting together
/// with the CLI writer, which applies its own if-missing rule.
#[derive(Debug, Clone, Default)]
pub struct ToolDirProbe {
    dir: Option<PathBuf>,
}

impl ToolDirProbe {
    pub fn new(tool: &ToolLocation) -> Self {
        Self {
            dir: tool.dir().map(PathBuf::from),
        }
    }
}

impl StubProbe for ToolDirProbe {
    fn exists(&self, path: &str) -> bool {
        let Some(dir) = &self.dir else {
            return false;
        };
        match dir.join(path).try_exists() {
            Ok(exists) => exists,
            Err(err) => {
                debug!(path, error = %err, "cannot check for existing stub");
                false
            }
        }
    }
}

/// What to do with the implementation stub of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImplPlan {
    /// Implementation generation is off.
    Disabled,
    /// A stub already exists at this path and is left alone.
    Preserve(String),
    /// Emit a stub at this path.
    Emit(String),
}

/// Artifacts planned for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactPlan {
    /// The file declares no services.
    Skip,
    /// Emit the wiring file, and maybe a stub.
    Emit { desc: String, implementation: ImplPlan },
}

/// Plans artifacts per input file.
pub struct ArtifactPlanner {
    emit_impl: bool,
    force: bool,
    probe: Box<dyn StubProbe>,
}

impl ArtifactPlanner {
    pub fn new(emit_impl: bool, force: bool, probe: Box<dyn StubProbe>) -> Self {
        Self {
            emit_impl,
            force,
            probe,
        }
    }

    /// Plan artifacts for `file`.
    ///
    /// Files without services are skipped. The wiring file is always planned;
    /// a stub is planned when implementation generation is on and either
    /// `force` is set or no stub exists yet.
    pub fn plan(&self, file: &ProtoFile) -> ArtifactPlan {
        if !file.has_services() {
            info!(file = %file.name, "no target service defined in the file, skipping");
            return ArtifactPlan::Skip;
        }

        let desc = desc_output_name(&file.name);
        let implementation = if !self.emit_impl {
            ImplPlan::Disabled
        } else {
            let path = impl_output_name(&file.name);
            if !self.force && self.probe.exists(&path) {
                info!(path = %path, "implementation will not be emitted: file already exists");
                ImplPlan::Preserve(path)
            } else {
                ImplPlan::Emit(path)
            }
        };

        ArtifactPlan::Emit {
            desc,
            implementation,
        }
    }
}
