//! Go package references.

use serde::{Deserialize, Serialize};

/// A Go package referenced by generated code.
///
/// `name` is the package's own name (usually the last segment of `path`).
/// `alias` is set only when `name` collided with another package bound in the
/// same generation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoPackage {
    /// Import path (e.g. `github.com/pkg/errors`).
    pub path: String,
    /// Package name.
    pub name: String,
    /// Import alias, if one was needed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl GoPackage {
    /// Create a package reference without an alias.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            alias: None,
        }
    }

    /// Attach an import alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The identifier generated code uses to refer to this package.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Render the Go import spec (`alias "path"` or `"path"`).
    pub fn import_spec(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} {:?}", alias, self.path),
            None => format!("{:?}", self.path),
        }
    }
}
