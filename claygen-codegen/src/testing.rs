//! Collaborator doubles for exercising the generator.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{cell::RefCell, collections::HashSet, fmt};

use crate::{ArtifactKind, BoxError, RenderParams, Renderer, SourceFormatter, StubProbe};

/// What an [`EchoRenderer`] was asked to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    pub kind: ArtifactKind,
    pub file: String,
    /// Import specs, in order.
    pub imports: Vec<String>,
    pub desc_prefix: Option<String>,
    pub swagger: Option<String>,
}

/// Renders a plain-text summary of its parameters and records every call.
///
/// Output looks like:
///
/// ```text
/// // desc: svc.proto
/// package api
///
/// import "context"
/// import pkg_0 "b/pkg"
/// ```
#[derive(Debug, Default)]
pub struct EchoRenderer {
    calls: RefCell<Vec<RenderCall>>,
}

impl EchoRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }
}

impl Renderer for EchoRenderer {
    fn render(&self, kind: ArtifactKind, params: &RenderParams<'_>) -> Result<String, BoxError> {
        let imports: Vec<String> = params.imports.iter().map(|p| p.import_spec()).collect();

        let mut out = format!(
            "// {}: {}\npackage {}\n\n",
            kind.template_name(),
            params.file.name,
            params.file.go_pkg.name
        );
        for spec in &imports {
            out.push_str("import ");
            out.push_str(spec);
            out.push('\n');
        }
        if let Some(prefix) = &params.desc_prefix {
            out.push_str(&format!("\nvar _ = {prefix}Handler\n"));
        }

        self.calls.borrow_mut().push(RenderCall {
            kind,
            file: params.file.name.clone(),
            imports,
            desc_prefix: params.desc_prefix.clone(),
            swagger: params
                .swagger_buffer
                .as_ref()
                .map(|b| String::from_utf8_lossy(b).into_owned()),
        });
        Ok(out)
    }
}

/// Error raised by the failing doubles.
#[derive(Debug)]
pub struct InjectedFailure(pub String);

impl fmt::Display for InjectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InjectedFailure {}

/// Renders like [`EchoRenderer`] but fails for one artifact kind.
#[derive(Debug)]
pub struct FailingRenderer {
    pub fail_on: ArtifactKind,
    inner: EchoRenderer,
}

impl FailingRenderer {
    pub fn new(fail_on: ArtifactKind) -> Self {
        Self {
            fail_on,
            inner: EchoRenderer::new(),
        }
    }
}

impl Renderer for FailingRenderer {
    fn render(&self, kind: ArtifactKind, params: &RenderParams<'_>) -> Result<String, BoxError> {
        if kind == self.fail_on {
            return Err(Box::new(InjectedFailure(format!(
                "no template for {}",
                kind.template_name()
            ))));
        }
        self.inner.render(kind, params)
    }
}

/// Rejects any source containing `marker`.
#[derive(Debug, Clone)]
pub struct FailingFormatter {
    pub marker: String,
}

impl FailingFormatter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl SourceFormatter for FailingFormatter {
    fn format(&self, source: &str) -> Result<String, BoxError> {
        if source.contains(&self.marker) {
            return Err(Box::new(InjectedFailure(format!(
                "unexpected {:?}",
                self.marker
            ))));
        }
        Ok(source.to_string())
    }
}

/// Reports a fixed set of stub paths as existing.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe(pub HashSet<String>);

impl StaticProbe {
    pub fn with<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl StubProbe for StaticProbe {
    fn exists(&self, path: &str) -> bool {
        self.0.contains(path)
    }
}
