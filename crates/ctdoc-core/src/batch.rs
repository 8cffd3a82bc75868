//! Batch processing over several protocols.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{error, info, info_span};

use ctdoc_ingest::ProtocolParser;
use ctdoc_model::RunReport;
use ctdoc_output::DocumentBackend;

use crate::automation::{Automation, file_stem};
use crate::error::{Result, WorkflowError};
use crate::options::WorkflowOptions;

pub const DEFAULT_BATCH_DIR: &str = "batch_output";
pub const SUMMARY_TEXT: &str = "batch_summary.txt";
pub const SUMMARY_JSON: &str = "batch_summary.json";

/// Per-input counts taken from its run report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output_directory: PathBuf,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub skipped_tasks: usize,
    pub generated_files: usize,
}

impl BatchEntry {
    fn from_report(input: &Path, report: &RunReport) -> Self {
        Self {
            input: input.to_path_buf(),
            output_directory: report.output_directory().to_path_buf(),
            completed_tasks: report.completed_tasks(),
            failed_tasks: report.failed_tasks(),
            skipped_tasks: report.skipped_tasks(),
            generated_files: report.generated_files().len(),
        }
    }
}

/// An input whose orchestrator could not be constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub skipped_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub base_dir: PathBuf,
    pub processed_at: String,
    pub entries: Vec<BatchEntry>,
    pub totals: BatchTotals,
    /// Reported separately; these inputs have no run report.
    pub construction_failures: Vec<BatchFailure>,
}

impl BatchSummary {
    /// True when any task failed or any input could not be started.
    pub fn has_failures(&self) -> bool {
        self.totals.failed_tasks > 0 || !self.construction_failures.is_empty()
    }
}

/// Runs [`Automation`] once per input, each into its own subdirectory.
pub struct BatchRunner {
    base_dir: PathBuf,
    options: WorkflowOptions,
    progress: bool,
}

impl BatchRunner {
    pub fn new(base_dir: Option<PathBuf>, options: WorkflowOptions) -> Self {
        Self {
            base_dir: base_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_BATCH_DIR)),
            options,
            progress: false,
        }
    }

    /// Draw a progress bar on stderr while processing.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Process every input in order and write the batch summary.
    ///
    /// A failure for one input never stops the others. Only writing the
    /// summary itself can fail.
    pub fn run(
        &self,
        inputs: &[PathBuf],
        parser: &dyn ProtocolParser,
        backend: &dyn DocumentBackend,
    ) -> Result<BatchSummary> {
        let span = info_span!("batch", inputs = inputs.len(), base_dir = %self.base_dir.display());
        let _guard = span.enter();
        fs::create_dir_all(&self.base_dir).map_err(|source| WorkflowError::CreateDir {
            path: self.base_dir.clone(),
            source,
        })?;

        let bar = self.progress_bar(inputs.len());
        let mut entries = Vec::new();
        let mut failures = Vec::new();
        for (index, input) in inputs.iter().enumerate() {
            bar.set_message(file_stem(input));
            info!(
                input = %input.display(),
                position = index + 1,
                total = inputs.len(),
                "processing protocol"
            );
            let options = self.options.clone().with_output_dir(self.output_dir_for(input));
            match Automation::new(input, parser, backend, options) {
                Ok(automation) => {
                    let report = automation.run();
                    entries.push(BatchEntry::from_report(input, &report));
                }
                Err(error) => {
                    error!(input = %input.display(), %error, "could not start protocol");
                    failures.push(BatchFailure {
                        input: input.clone(),
                        error: error.to_string(),
                    });
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        let totals = entries.iter().fold(BatchTotals::default(), |acc, entry| BatchTotals {
            completed_tasks: acc.completed_tasks + entry.completed_tasks,
            failed_tasks: acc.failed_tasks + entry.failed_tasks,
            skipped_tasks: acc.skipped_tasks + entry.skipped_tasks,
        });
        let summary = BatchSummary {
            base_dir: self.base_dir.clone(),
            processed_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            entries,
            totals,
            construction_failures: failures,
        };
        self.write_summary(&summary)?;
        info!(
            processed = summary.entries.len(),
            failed_to_start = summary.construction_failures.len(),
            "batch finished"
        );
        Ok(summary)
    }

    fn output_dir_for(&self, input: &Path) -> PathBuf {
        self.base_dir.join(format!(
            "{}_{}",
            file_stem(input),
            Local::now().format("%Y%m%d_%H%M%S")
        ))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar
    }

    fn write_summary(&self, summary: &BatchSummary) -> Result<()> {
        let json_path = self.base_dir.join(SUMMARY_JSON);
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(&json_path, format!("{json}\n")).map_err(|source| WorkflowError::Write {
            path: json_path.clone(),
            source,
        })?;

        let text_path = self.base_dir.join(SUMMARY_TEXT);
        fs::write(&text_path, render_summary(summary)).map_err(|source| WorkflowError::Write {
            path: text_path.clone(),
            source,
        })?;
        info!(path = %text_path.display(), "batch summary written");
        Ok(())
    }
}

fn render_summary(summary: &BatchSummary) -> String {
    let rule = "=".repeat(80);
    let divider = "-".repeat(80);
    let mut lines = vec![
        rule.clone(),
        "Batch Processing Summary".to_string(),
        rule.clone(),
        String::new(),
        format!("Protocols Processed: {}", summary.entries.len()),
        format!("Processed At: {}", summary.processed_at),
    ];

    for (index, entry) in summary.entries.iter().enumerate() {
        let name = entry
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(String::new());
        lines.push(format!("{}. {name}", index + 1));
        lines.push(divider.clone());
        lines.push(format!(
            "   Output Directory: {}",
            entry.output_directory.display()
        ));
        lines.push(format!("   Completed Tasks: {}", entry.completed_tasks));
        lines.push(format!("   Failed Tasks: {}", entry.failed_tasks));
        lines.push(format!("   Skipped Tasks: {}", entry.skipped_tasks));
        lines.push(format!("   Generated Files: {}", entry.generated_files));
    }

    if !summary.construction_failures.is_empty() {
        lines.push(String::new());
        lines.push("Failed To Start".to_string());
        lines.push(divider);
        for failure in &summary.construction_failures {
            lines.push(format!("   {}: {}", failure.input.display(), failure.error));
        }
    }

    lines.extend([
        String::new(),
        rule.clone(),
        "Totals".to_string(),
        rule,
        format!("Total Completed: {}", summary.totals.completed_tasks),
        format!("Total Failed: {}", summary.totals.failed_tasks),
        format!("Total Skipped: {}", summary.totals.skipped_tasks),
    ]);
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
