use std::path::PathBuf;

use claygen_config::ClaygenToml;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to claygen.toml (defaults to ./claygen.toml)
    #[arg(short, long, default_value = "claygen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let toml = ClaygenToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&toml);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
