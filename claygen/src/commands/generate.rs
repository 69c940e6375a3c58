use std::path::{Path, PathBuf};

use claygen_config::{ClaygenToml, Config};
use clap::Args;
use eyre::Result;
use tracing::debug;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

const DEFAULT_CONFIG: &str = "claygen.toml";

#[derive(Args)]
pub struct GenerateCommand {
    /// JSON descriptor set produced by the protoc front-end
    #[arg(short, long)]
    pub descriptors: PathBuf,

    /// Path to claygen.toml (defaults to ./claygen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Generator parameters overriding [generate] (e.g. "impl=true,force=true")
    #[arg(short, long)]
    pub param: Option<String>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let (mut config, config_dir) = self.load_config();
        if let Some(param) = &self.param {
            config.generate.apply_parameter(param).unwrap_or_exit();
        }

        let report = ops::generate(
            &config,
            GenerateOptions {
                descriptors: &self.descriptors,
                output_dir: &self.output,
                config_dir: &config_dir,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    /// The config to use and the directory its relative paths resolve against.
    fn load_config(&self) -> (Config, PathBuf) {
        let path = match &self.config {
            Some(path) => path.clone(),
            None if Path::new(DEFAULT_CONFIG).exists() => PathBuf::from(DEFAULT_CONFIG),
            None => {
                debug!("no claygen.toml found, using defaults");
                return (Config::default(), PathBuf::from("."));
            }
        };

        let toml = ClaygenToml::open(&path).unwrap_or_exit();
        let dir = toml
            .path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        (toml.into_config(), dir)
    }
}
