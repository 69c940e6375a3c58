//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of input files in the descriptor set.
    pub input_count: usize,
    /// Input files without services.
    pub skipped_inputs: Vec<String>,
    /// Existing stubs the generator left alone.
    pub preserved_stubs: Vec<String>,
    /// Files written or previewed.
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Files written.
    pub written: Vec<String>,
    /// Stubs already present in the output directory and not overwritten.
    pub unchanged: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.key_value("Input files", &self.input_count.to_string());
        out.key_value("Output", &written.output_dir.display().to_string());

        if !written.written.is_empty() {
            out.newline();
            out.section("Generated");
            for file in &written.written {
                out.added_item(file);
            }
        }

        let kept: Vec<&String> = self
            .preserved_stubs
            .iter()
            .chain(&written.unchanged)
            .collect();
        if !kept.is_empty() {
            out.newline();
            out.section("Existing stubs kept");
            for file in kept {
                out.kept_item(file);
            }
        }

        self.render_skipped(out);
    }

    fn render_skipped(&self, out: &mut dyn Output) {
        if !self.skipped_inputs.is_empty() {
            out.newline();
            out.section("Skipped (no services)");
            for file in &self.skipped_inputs {
                out.list_item(file);
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
        self.render_skipped(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            input_count: 2,
            skipped_inputs: vec!["types.proto".into()],
            preserved_stubs: Vec::new(),
            result: GenerationResult::Written(WrittenResult {
                output_dir: PathBuf::from("gen"),
                written: vec!["svc.pb.goclay.go".into()],
                unchanged: vec!["svc.pb.impl.go".into()],
            }),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        insta::assert_snapshot!(out.0, @r"
        Input files: 2
        Output: gen

        Generated:
          + svc.pb.goclay.go

        Existing stubs kept:
          = svc.pb.impl.go

        Skipped (no services):
          - types.proto
        ");
    }
}
