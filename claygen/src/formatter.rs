//! External source formatter (e.g. `gofmt`).

use std::{
    io::Write,
    process::{Command, Stdio},
    thread,
};

use claygen_codegen::{BoxError, SourceFormatter};

/// Pipes rendered source through an external command.
///
/// The command reads source on stdin and writes the formatted result to
/// stdout. A non-zero exit is a format failure carrying the command's stderr.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SourceFormatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String, BoxError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to run {}: {}", self.program, e))?;

        let mut stdin = child.stdin.take().ok_or("formatter stdin unavailable")?;
        let (written, output) = thread::scope(|s| -> Result<_, BoxError> {
            let writer = s.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output()?;
            let written = writer
                .join()
                .map_err(|_| "formatter input thread panicked")?;
            Ok((written, output))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )
            .into());
        }
        written?;

        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Formatter chosen by configuration.
#[derive(Debug, Clone)]
pub enum Formatter {
    Command(CommandFormatter),
    Passthrough,
}

impl SourceFormatter for Formatter {
    fn format(&self, source: &str) -> Result<String, BoxError> {
        match self {
            Formatter::Command(cmd) => cmd.format(source),
            Formatter::Passthrough => claygen_codegen::Passthrough.format(source),
        }
    }
}
