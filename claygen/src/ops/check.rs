//! Check operation - configuration validation.

use claygen_codegen::{ArtifactKind, RootPathResolver, ToolLocation};
use claygen_config::ClaygenToml;

use super::load;
use crate::{reports::CheckReport, templates::TemplateRenderer};

/// Execute the check operation.
///
/// Parsing already validated the config itself; this checks that the files it
/// points at exist and are usable.
pub fn check(toml: &ClaygenToml) -> CheckReport {
    let config = toml.config();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let desc = config.templates.desc.as_deref().map(|p| toml.resolve(p));
    let implementation = config
        .templates
        .implementation
        .as_deref()
        .map(|p| toml.resolve(p));
    match TemplateRenderer::load(desc.as_deref(), implementation.as_deref()) {
        Ok(renderer) => {
            for kind in [ArtifactKind::Desc, ArtifactKind::Impl] {
                match renderer.validate(kind) {
                    Ok(true) => {}
                    Ok(false) if kind == ArtifactKind::Desc => {
                        errors.push("[templates] has no 'desc' entry".to_string())
                    }
                    Ok(false) => {}
                    Err(e) => errors.push(format!("invalid {} template: {}", kind, e)),
                }
            }
        }
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if let Err(e) = load::swagger_documents(&config.swagger, |p| toml.resolve(p)) {
        errors.push(format!("{:#}", e));
    }

    if config.format.command.is_none() {
        warnings.push("no [format] command set, generated code is emitted unformatted".to_string());
    }

    let settings = &config.generate;
    let resolver = if settings.root_dirs.is_empty() {
        RootPathResolver::from_env(ToolLocation::default())
    } else {
        RootPathResolver::new(
            ToolLocation::default(),
            settings.root_dirs.iter().map(|p| toml.resolve(p)),
        )
    };
    let roots = resolver
        .roots()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let summary = vec![
        ("impl".to_string(), settings.emit_impl.to_string()),
        ("force".to_string(), settings.force.to_string()),
        ("desc_path".to_string(), settings.desc_path.clone()),
        ("impl_path".to_string(), settings.impl_path.clone()),
        ("root_dirs".to_string(), roots),
        ("swagger documents".to_string(), config.swagger.len().to_string()),
    ];

    CheckReport {
        config_path: toml.path().to_path_buf(),
        errors,
        warnings,
        summary,
    }
}
