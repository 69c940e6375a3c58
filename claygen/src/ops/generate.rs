//! Generate operation - HTTP wiring and stubs from a descriptor set.

use std::path::{Path, PathBuf};

use claygen_codegen::{ArtifactKind, Generator, GeneratorOptions, ImportRegistry, Session};
use claygen_config::Config;
use claygen_core::{Overwrite, WriteResult};
use eyre::{Context, Result};
use tracing::info;

use super::load;
use crate::{
    formatter::{CommandFormatter, Formatter},
    reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult},
    templates::TemplateRenderer,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// JSON descriptor set to generate from.
    pub descriptors: &'a Path,
    /// Directory generated files are written to.
    pub output_dir: &'a Path,
    /// Directory relative paths in the config resolve against.
    pub config_dir: &'a Path,
    /// Preview without writing files.
    pub dry_run: bool,
}

impl GenerateOptions<'_> {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.config_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Execute the generate operation.
pub fn generate(config: &Config, opts: GenerateOptions) -> Result<GenerateReport> {
    let mut registry = ImportRegistry::new();
    let files = load::descriptors(opts.descriptors, &mut registry)?;

    let desc_template = config.templates.desc.as_deref().map(|p| opts.resolve(p));
    let impl_template = config
        .templates
        .implementation
        .as_deref()
        .map(|p| opts.resolve(p));
    let renderer = TemplateRenderer::load(desc_template.as_deref(), impl_template.as_deref())?;
    let formatter = match &config.format.command {
        Some(command) => Formatter::Command(CommandFormatter::new(
            command.clone(),
            config.format.args.clone(),
        )),
        None => Formatter::Passthrough,
    };

    let settings = &config.generate;
    let options = GeneratorOptions {
        emit_impl: settings.emit_impl,
        force: settings.force,
        desc_path: settings.desc_path.clone(),
        impl_path: settings.impl_path.clone(),
        swagger: load::swagger_documents(&config.swagger, |p| opts.resolve(p))?,
    };
    let roots = settings.root_dirs.iter().map(|p| opts.resolve(p)).collect();
    let session = Session::detect(registry, roots);

    let mut generator = Generator::new(options, session, renderer, formatter);
    let generation = generator
        .generate(&files)
        .wrap_err("Failed to generate code")?;

    let skipped_inputs = generation.skipped;
    let preserved_stubs = generation.preserved;
    let result = if opts.dry_run {
        let files = generation
            .artifacts
            .into_iter()
            .map(|a| PreviewFile {
                path: a.file.name,
                content: a.file.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let mut written = Vec::new();
        let mut unchanged = Vec::new();
        for artifact in generation.artifacts {
            let overwrite = match artifact.kind {
                ArtifactKind::Impl if !settings.force => Overwrite::IfMissing,
                _ => Overwrite::Always,
            };
            let file = artifact.file;
            let outcome = file
                .write_to(opts.output_dir, overwrite)
                .wrap_err("Failed to write generated code")?;
            match outcome {
                WriteResult::Written => written.push(file.name),
                WriteResult::Skipped => {
                    info!(
                        path = %file.name,
                        "stub exists in output directory, not overwritten"
                    );
                    unchanged.push(file.name)
                }
            }
        }
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written,
            unchanged,
        })
    };

    Ok(GenerateReport {
        input_count: files.len(),
        skipped_inputs,
        preserved_stubs,
        result,
    })
}
