//! The per-file generation loop.

use std::{collections::BTreeMap, path::PathBuf};

use claygen_core::{OutputFile, annotate_source};
use claygen_ir::ProtoFile;
use tracing::{debug, error};

use super::{
    ArtifactPlan, ArtifactPlanner, ImplPlan, ImportRegistry, ParamAssembler, RenderParams,
    RootPathResolver, StubProbe, ToolDirProbe, ToolLocation,
};
use crate::{ArtifactKind, Error, Renderer, Result, SourceFormatter};

/// Generator settings.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Emit implementation stubs.
    pub emit_impl: bool,
    /// Overwrite existing stubs.
    pub force: bool,
    /// Output path segment of the wiring package.
    pub desc_path: String,
    /// Output path segment of the implementation package.
    pub impl_path: String,
    /// Swagger documents keyed by proto file name.
    ///
    /// These are already JSON values, so embedding them never fails here;
    /// [`Error::Swagger`] is only reachable through
    /// [`ParamAssembler::desc_params`] with other document types.
    pub swagger: BTreeMap<String, serde_json::Value>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            emit_impl: false,
            force: false,
            desc_path: ".".to_string(),
            impl_path: ".".to_string(),
            swagger: BTreeMap::new(),
        }
    }
}

/// Environment-coupled state of one generation session: the import registry,
/// root-path resolution and the stub existence check.
pub struct Session {
    pub registry: ImportRegistry,
    pub resolver: RootPathResolver,
    pub probe: Box<dyn StubProbe>,
}

impl Session {
    pub fn new(
        registry: ImportRegistry,
        resolver: RootPathResolver,
        probe: impl StubProbe + 'static,
    ) -> Self {
        Self {
            registry,
            resolver,
            probe: Box::new(probe),
        }
    }

    /// Session for the running binary. Empty `roots` means `$GOPATH`.
    pub fn detect(registry: ImportRegistry, roots: Vec<PathBuf>) -> Self {
        let tool = ToolLocation::current();
        debug!(tool = ?tool.dir(), "detected tool location");
        let probe = ToolDirProbe::new(&tool);
        let resolver = if roots.is_empty() {
            RootPathResolver::from_env(tool)
        } else {
            RootPathResolver::new(tool, roots)
        };
        Self::new(registry, resolver, probe)
    }
}

/// One generated file and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file: OutputFile,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct Generation {
    /// Generated files, in input order.
    pub artifacts: Vec<Artifact>,
    /// Input files skipped because they declare no services.
    pub skipped: Vec<String>,
    /// Existing stubs left untouched.
    pub preserved: Vec<String>,
}

impl Generation {
    /// The generated files without their kinds.
    pub fn into_files(self) -> Vec<OutputFile> {
        self.artifacts.into_iter().map(|a| a.file).collect()
    }
}

/// Drives generation over a batch of input files.
///
/// # Example
///
/// ```ignore
/// let session = Session::detect(ImportRegistry::new(), Vec::new());
/// let mut generator = Generator::new(options, session, renderer, Passthrough);
/// let generation = generator.generate(&files)?;
/// ```
pub struct Generator<R, F> {
    swagger: BTreeMap<String, serde_json::Value>,
    registry: ImportRegistry,
    planner: ArtifactPlanner,
    assembler: ParamAssembler,
    renderer: R,
    formatter: F,
}

impl<R: Renderer, F: SourceFormatter> Generator<R, F> {
    pub fn new(options: GeneratorOptions, session: Session, renderer: R, formatter: F) -> Self {
        let Session {
            mut registry,
            resolver,
            probe,
        } = session;
        let assembler =
            ParamAssembler::new(&mut registry, resolver, options.desc_path, options.impl_path);
        let planner = ArtifactPlanner::new(options.emit_impl, options.force, probe);

        Self {
            swagger: options.swagger,
            registry,
            planner,
            assembler,
            renderer,
            formatter,
        }
    }

    /// The session's import registry.
    pub fn registry(&self) -> &ImportRegistry {
        &self.registry
    }

    /// Generate artifacts for `files`, in order.
    ///
    /// The first render, format or serialization failure aborts the batch;
    /// nothing generated before it is returned.
    pub fn generate(&mut self, files: &[ProtoFile]) -> Result<Generation> {
        let mut generation = Generation::default();

        for file in files {
            debug!(file = %file.name, "processing");

            let (desc, implementation) = match self.planner.plan(file) {
                ArtifactPlan::Skip => {
                    generation.skipped.push(file.name.clone());
                    continue;
                }
                ArtifactPlan::Emit {
                    desc,
                    implementation,
                } => (desc, implementation),
            };

            let params =
                self.assembler
                    .desc_params(&mut self.registry, file, self.swagger.get(&file.name))?;
            let content = self.produce(ArtifactKind::Desc, &params)?;
            debug!(output = %desc, "will emit");
            generation.artifacts.push(Artifact {
                kind: ArtifactKind::Desc,
                file: OutputFile::new(desc, content),
            });

            match implementation {
                ImplPlan::Disabled => {}
                ImplPlan::Preserve(path) => generation.preserved.push(path),
                ImplPlan::Emit(path) => {
                    let params = self.assembler.impl_params(&mut self.registry, file);
                    let content = self.produce(ArtifactKind::Impl, &params)?;
                    debug!(output = %path, "will emit");
                    generation.artifacts.push(Artifact {
                        kind: ArtifactKind::Impl,
                        file: OutputFile::new(path, content),
                    });
                }
            }
        }

        Ok(generation)
    }

    /// Render and format one artifact.
    fn produce(&self, kind: ArtifactKind, params: &RenderParams<'_>) -> Result<String> {
        let file = &params.file.name;

        // A failed render leaves no text to annotate, so only the error is logged.
        let rendered = self.renderer.render(kind, params).map_err(|source| {
            error!(file = %file, %kind, error = %source, "template rendering failed");
            Error::Render {
                kind,
                file: file.clone(),
                source,
            }
        })?;

        self.formatter.format(&rendered).map_err(|source| {
            error!(
                file = %file,
                %kind,
                error = %source,
                "formatting failed:\n{}",
                annotate_source(&rendered)
            );
            Error::Format {
                kind,
                file: file.clone(),
                source,
            }
        })
    }
}
