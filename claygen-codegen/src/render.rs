//! Collaborator seams: template rendering and source formatting.

use std::fmt;

use serde::Serialize;

use crate::RenderParams;

/// Boxed error returned by collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The two kinds of generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// HTTP transport wiring (`*.pb.goclay.go`), always regenerated.
    Desc,
    /// Implementation stub (`*.pb.impl.go`), meant to be hand-completed.
    Impl,
}

impl ArtifactKind {
    /// Template name used by renderers.
    pub fn template_name(&self) -> &'static str {
        match self {
            ArtifactKind::Desc => "desc",
            ArtifactKind::Impl => "impl",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Desc => f.write_str("wiring"),
            ArtifactKind::Impl => f.write_str("implementation"),
        }
    }
}

/// Renders template text for an artifact.
pub trait Renderer {
    fn render(&self, kind: ArtifactKind, params: &RenderParams<'_>) -> Result<String, BoxError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, kind: ArtifactKind, params: &RenderParams<'_>) -> Result<String, BoxError> {
        (**self).render(kind, params)
    }
}

/// Formats rendered source before it is emitted.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, BoxError>;
}

impl<F> SourceFormatter for F
where
    F: Fn(&str) -> Result<String, BoxError>,
{
    fn format(&self, source: &str) -> Result<String, BoxError> {
        self(source)
    }
}

/// Formatter that emits rendered text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str) -> Result<String, BoxError> {
        Ok(source.to_string())
    }
}
