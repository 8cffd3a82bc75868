//! Run-report persistence: `automation_report.json` and a text rendering.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeDelta};

use ctdoc_model::RunReport;

use crate::error::{Result, WorkflowError};

pub const REPORT_JSON: &str = "automation_report.json";
pub const REPORT_TEXT: &str = "automation_report.txt";

const RULE: &str = "================================================================================";
const DIVIDER: &str = "--------------------------------------------------------------------------------";

/// Write the JSON and text reports into `dir`, returning both paths.
pub fn write_run_report(report: &RunReport, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let json_path = dir.join(REPORT_JSON);
    let json = serde_json::to_string_pretty(report)?;
    write(&json_path, format!("{json}\n"))?;

    let text_path = dir.join(REPORT_TEXT);
    write(&text_path, render_text_report(report))?;
    Ok((json_path, text_path))
}

fn write(path: &Path, content: String) -> Result<()> {
    fs::write(path, content).map_err(|source| WorkflowError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Human-readable rendering of a run report.
pub fn render_text_report(report: &RunReport) -> String {
    let mut lines: Vec<String> = vec![
        RULE.into(),
        "Clinical Document Automation Report".into(),
        RULE.into(),
        String::new(),
    ];

    section(&mut lines, "Basic Information");
    lines.push(format!("Protocol: {}", report.protocol_path().display()));
    lines.push(format!(
        "Output Directory: {}",
        report.output_directory().display()
    ));
    lines.push(format!("Start Time: {}", timestamp(report.start_time())));
    if let Some(end) = report.end_time() {
        lines.push(format!("End Time: {}", timestamp(end)));
    }
    if let Some(duration) = report.duration() {
        lines.push(format!("Duration: {}", format_duration(duration)));
    }
    lines.push(String::new());

    if let Some(info) = report.protocol_info() {
        section(&mut lines, "Protocol Information");
        for (label, value) in info.summary_pairs() {
            lines.push(format!("{label}: {value}"));
        }
        lines.push(String::new());
    }

    section(&mut lines, "Statistics");
    lines.push(format!("Total Tasks: {}", report.total_tasks()));
    lines.push(format!("Completed: {}", report.completed_tasks()));
    lines.push(format!("Failed: {}", report.failed_tasks()));
    lines.push(format!("Skipped: {}", report.skipped_tasks()));
    lines.push(format!("Success Rate: {:.1}%", report.success_rate()));
    lines.push(String::new());

    section(&mut lines, "Task Details");
    for (index, task) in report.tasks().iter().enumerate() {
        lines.push(format!(
            "{}. {} {} - {}",
            index + 1,
            task.status().icon(),
            task.kind().as_str().to_uppercase(),
            task.status().as_str().to_uppercase()
        ));
        if let Some(path) = task.output_path() {
            lines.push(format!("   Output: {}", path.display()));
        }
        if let Some(message) = task.error_message() {
            lines.push(format!("   Message: {message}"));
        }
        if let Some(start) = task.start_time() {
            lines.push(format!("   Started: {}", timestamp(start)));
        }
        if let Some(end) = task.end_time() {
            lines.push(format!("   Finished: {}", timestamp(end)));
        }
        lines.push(String::new());
    }

    if !report.generated_files().is_empty() {
        section(&mut lines, "Generated Files");
        for (index, path) in report.generated_files().iter().enumerate() {
            lines.push(format!("{}. {}", index + 1, path.display()));
        }
        lines.push(String::new());
    }

    if !report.errors().is_empty() {
        section(&mut lines, "Errors");
        for (index, error) in report.errors().iter().enumerate() {
            lines.push(format!("{}. {error}", index + 1));
        }
        lines.push(String::new());
    }

    lines.extend([RULE.into(), "End of Report".into(), RULE.into()]);
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(format!("[{title}]"));
    lines.push(DIVIDER.into());
}

fn timestamp(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `H:MM:SS.mmm`
fn format_duration(duration: TimeDelta) -> String {
    let millis = duration.num_milliseconds().max(0);
    let seconds = millis / 1000;
    format!(
        "{}:{:02}:{:02}.{:03}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60,
        millis % 1000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(TimeDelta::milliseconds(0)), "0:00:00.000");
        assert_eq!(
            format_duration(TimeDelta::milliseconds(3_723_045)),
            "1:02:03.045"
        );
    }
}
