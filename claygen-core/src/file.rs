use std::{
    fs,
    path::{Component, Path},
};

use eyre::{Result, WrapErr, bail};

/// A generated file returned by the generator: a name relative to the output
/// directory and its final content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub content: String,
}

/// Policy for output files that already exist on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Replace existing content (generated wiring).
    Always,
    /// Leave an existing file untouched (hand-completed stubs).
    IfMissing,
}

/// Outcome of [`OutputFile::write_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The file existed and the policy kept it.
    Skipped,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Write under `dir`, creating parent directories as needed.
    ///
    /// Names must stay inside `dir`: absolute names and `..` elements are
    /// rejected.
    pub fn write_to(&self, dir: &Path, overwrite: Overwrite) -> Result<WriteResult> {
        let escapes = Path::new(&self.name).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            bail!("output file '{}' is outside the output directory", self.name);
        }

        let path = dir.join(&self.name);
        if overwrite == Overwrite::IfMissing && path.exists() {
            return Ok(WriteResult::Skipped);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("cannot create {}", parent.display()))?;
        }
        fs::write(&path, &self.content)
            .wrap_err_with(|| format!("cannot write {}", path.display()))?;
        Ok(WriteResult::Written)
    }
}
