//! Import path of the running tool.
//!
//! Implementation stubs living in a different package than the wiring code
//! must import the wiring package by its full import path. That path is
//! derived from where the generator binary sits inside a root search
//! directory (a `GOPATH` entry).

use std::path::{Component, Path, PathBuf};

use claygen_core::join_path;
use tracing::debug;

/// Resolved, symlink-free directory of the running tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolLocation {
    dir: Option<PathBuf>,
}

impl ToolLocation {
    /// Locate the running binary from `argv[0]`.
    ///
    /// Resolution failures are logged and leave the location unresolved.
    pub fn current() -> Self {
        match std::env::args_os().next() {
            Some(arg0) => {
                let dir = Path::new(&arg0).parent().unwrap_or(Path::new(""));
                Self::resolved(dir)
            }
            None => {
                debug!("argv[0] is not available, tool location unresolved");
                Self::default()
            }
        }
    }

    /// Canonicalize `dir` and use it as the tool location.
    pub fn resolved(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        match dir.canonicalize() {
            Ok(dir) => Self { dir: Some(dir) },
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "cannot resolve tool directory");
                Self::default()
            }
        }
    }

    /// Use `dir` verbatim as the tool location.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// The tool directory, if it could be resolved.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// Computes import paths relative to the configured root directories.
#[derive(Debug, Clone)]
pub struct RootPathResolver {
    tool: ToolLocation,
    roots: Vec<PathBuf>,
}

impl RootPathResolver {
    /// Create a resolver. Roots are canonicalized when possible.
    pub fn new(tool: ToolLocation, roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let roots = roots
            .into_iter()
            .map(|root| match root.canonicalize() {
                Ok(resolved) => resolved,
                Err(err) => {
                    debug!(root = %root.display(), error = %err, "cannot resolve root directory");
                    root
                }
            })
            .collect();
        Self { tool, roots }
    }

    /// Create a resolver whose roots are the entries of `$GOPATH`
    /// (`$HOME/go` when unset).
    pub fn from_env(tool: ToolLocation) -> Self {
        Self::new(tool, gopath_roots())
    }

    /// Root directories in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Import path of the tool's own directory.
    ///
    /// The first root containing the tool directory wins; the result is
    /// relative to `<root>/src`, or to `<root>` if the tool is outside `src`.
    pub fn tool_import_root(&self) -> Option<String> {
        let dir = self.tool.dir()?;
        self.roots.iter().find_map(|root| {
            if !dir.starts_with(root) {
                return None;
            }
            let relative = dir
                .strip_prefix(root.join("src"))
                .or_else(|_| dir.strip_prefix(root))
                .ok()?;
            Some(slash_path(relative))
        })
    }

    /// Import path under which code for `go_pkg_path` is reachable from the tool root.
    ///
    /// Returns `None` when no root contains the tool; callers must then omit
    /// any reference that needs the path.
    pub fn import_path_for(&self, go_pkg_path: &str) -> Option<String> {
        let current = self.tool_import_root()?;
        let pkg = if go_pkg_path == "." { "" } else { go_pkg_path };

        if has_path_prefix(pkg, &current) {
            Some(pkg.to_string())
        } else if !pkg.is_empty() {
            Some(join_path([current.as_str(), pkg]))
        } else {
            Some(current)
        }
    }
}

fn gopath_roots() -> Vec<PathBuf> {
    match std::env::var_os("GOPATH") {
        Some(gopath) if !gopath.is_empty() => std::env::split_paths(&gopath)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        _ => std::env::var_os("HOME")
            .map(|home| vec![PathBuf::from(home).join("go")])
            .unwrap_or_default(),
    }
}

fn has_path_prefix(path: &str, prefix: &str) -> bool {
    prefix.is_empty()
        || path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
