//! User-supplied template files rendered with minijinja.

use std::{fs, path::Path};

use claygen_codegen::{ArtifactKind, BoxError, RenderParams, Renderer};
use eyre::{Context, Result};
use minijinja::Environment;

/// Template sources for both artifact kinds.
///
/// Templates see the serialized [`RenderParams`]: `file`, `imports`,
/// `swagger_buffer` and `desc_prefix`.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    desc: Option<String>,
    implementation: Option<String>,
}

impl TemplateRenderer {
    pub fn new(desc: Option<String>, implementation: Option<String>) -> Self {
        Self {
            desc,
            implementation,
        }
    }

    /// Read template files from disk.
    pub fn load(desc: Option<&Path>, implementation: Option<&Path>) -> Result<Self> {
        let read = |path: Option<&Path>| -> Result<Option<String>> {
            path.map(|p| {
                fs::read_to_string(p)
                    .wrap_err_with(|| format!("Failed to read template {}", p.display()))
            })
            .transpose()
        };
        Ok(Self::new(read(desc)?, read(implementation)?))
    }

    fn source(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::Desc => self.desc.as_deref(),
            ArtifactKind::Impl => self.implementation.as_deref(),
        }
    }

    /// Check that the template for `kind` parses. `Ok(false)` if none is set.
    pub fn validate(&self, kind: ArtifactKind) -> Result<bool, minijinja::Error> {
        let Some(source) = self.source(kind) else {
            return Ok(false);
        };
        let mut env = Environment::new();
        env.add_template(kind.template_name(), source)?;
        Ok(true)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, kind: ArtifactKind, params: &RenderParams<'_>) -> Result<String, BoxError> {
        let source = self
            .source(kind)
            .ok_or_else(|| format!("no {} template configured", kind.template_name()))?;

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template(kind.template_name(), source)?;
        let rendered = env.get_template(kind.template_name())?.render(params)?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use claygen_ir::{GoPackage, ProtoFile, Service};

    use super::*;

    const DESC: &str = "package {{ file.go_pkg.name }}\n\nimport (\n{%- for pkg in imports %}\n    {% if pkg.alias %}{{ pkg.alias }} {% endif %}\"{{ pkg.path }}\"\n{%- endfor %}\n)\n";

    fn file() -> ProtoFile {
        ProtoFile::new("svc.proto", GoPackage::new("github.com/acme/api", "api"))
            .service(Service::new("Users"))
    }

    #[test]
    fn test_render_desc() {
        let renderer = TemplateRenderer::new(Some(DESC.to_string()), None);
        let file = file();
        let params = RenderParams::new(
            &file,
            vec![
                GoPackage::new("context", "context"),
                GoPackage::new("b/pkg", "pkg").with_alias("pkg_0"),
            ],
        );

        let out = renderer.render(ArtifactKind::Desc, &params).unwrap();
        insta::assert_snapshot!(out, @r#"
        package api

        import (
            "context"
            pkg_0 "b/pkg"
        )
        "#);
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let renderer = TemplateRenderer::new(Some(DESC.to_string()), None);
        let file = file();
        let params = RenderParams::new(&file, Vec::new());

        let err = renderer.render(ArtifactKind::Impl, &params).unwrap_err();
        assert_eq!(err.to_string(), "no impl template configured");
    }

    #[test]
    fn test_validate() {
        let renderer = TemplateRenderer::new(Some("{% if %}".to_string()), None);
        assert!(renderer.validate(ArtifactKind::Desc).is_err());
        assert!(!renderer.validate(ArtifactKind::Impl).unwrap());
    }
}
