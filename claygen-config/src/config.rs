//! `claygen.toml` schema.

use std::{collections::BTreeMap, path::PathBuf, str::FromStr};

use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Root of `claygen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generate: GenerateConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub format: FormatConfig,

    /// Swagger documents to embed, keyed by proto file name.
    #[serde(default)]
    pub swagger: BTreeMap<String, PathBuf>,
}

/// The `[generate]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Emit implementation stubs.
    #[serde(default, rename = "impl")]
    pub emit_impl: bool,

    /// Overwrite implementation stubs that already exist.
    #[serde(default)]
    pub force: bool,

    /// Output path segment of the wiring package.
    #[serde(default = "default_path")]
    pub desc_path: String,

    /// Output path segment of the implementation package.
    #[serde(default = "default_path")]
    pub impl_path: String,

    /// Root search directories used to compute import paths. Empty means the
    /// entries of `$GOPATH`.
    #[serde(default)]
    pub root_dirs: Vec<PathBuf>,
}

fn default_path() -> String {
    ".".to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            emit_impl: false,
            force: false,
            desc_path: default_path(),
            impl_path: default_path(),
            root_dirs: Vec::new(),
        }
    }
}

/// The `[templates]` section: user-supplied template files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Template for the HTTP wiring file.
    pub desc: Option<PathBuf>,

    /// Template for the implementation stub.
    #[serde(rename = "impl")]
    pub implementation: Option<PathBuf>,
}

/// The `[format]` section: external source formatter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    /// Formatter executable; rendered text is emitted as-is when unset.
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "claygen.toml")
    }
}

/// Parse a config from content with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let ctx = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    config.validate(&ctx)?;
    Ok(config)
}

impl Config {
    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.generate.desc_path.is_empty() {
            return Err(ctx.validation_error("desc_path", "desc_path must not be empty"));
        }
        if self.generate.impl_path.is_empty() {
            return Err(ctx.validation_error("impl_path", "impl_path must not be empty"));
        }
        if self.generate.emit_impl && self.templates.implementation.is_none() {
            return Err(ctx.validation_error(
                "impl",
                "implementation stubs are enabled but [templates] has no 'impl' entry",
            ));
        }
        Ok(())
    }

    /// Whether wiring and implementation live in different packages.
    pub fn split_packages(&self) -> bool {
        self.generate.desc_path != self.generate.impl_path
    }
}
