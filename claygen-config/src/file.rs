use std::path::{Path, PathBuf};

use crate::{Config, Result, parse_config};

/// A claygen.toml file with both raw content and parsed config.
pub struct ClaygenToml {
    path: PathBuf,
    content: String,
    config: Config,
}

impl ClaygenToml {
    /// Open and parse a claygen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let config = parse_config(&content, &filename)?;

        Ok(Self {
            path,
            content,
            config,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Take ownership of the parsed config.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Resolve a path from the config relative to the file's directory.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        match self.path.parent() {
            Some(dir) if relative.is_relative() => dir.join(relative),
            _ => relative.to_path_buf(),
        }
    }
}
