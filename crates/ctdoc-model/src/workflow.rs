//! Workflow task lifecycle and the per-run report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::enums::{TaskKind, TaskStatus};
use crate::error::{ModelError, Result};
use crate::protocol::ProtocolInfo;

/// One step of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTask {
    task_id: String,
    task_type: TaskKind,
    status: TaskStatus,
    output_path: Option<PathBuf>,
    error_message: Option<String>,
    start_time: Option<DateTime<Local>>,
    end_time: Option<DateTime<Local>>,
}

impl WorkflowTask {
    pub fn new(kind: TaskKind) -> Self {
        Self {
            task_id: kind.task_id().to_string(),
            task_type: kind,
            status: TaskStatus::Pending,
            output_path: None,
            error_message: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn kind(&self) -> TaskKind {
        self.task_type
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn start(&mut self) -> Result<()> {
        self.transition(TaskStatus::Running)?;
        self.start_time = Some(Local::now());
        Ok(())
    }

    pub fn complete(&mut self, output_path: impl Into<PathBuf>) -> Result<()> {
        self.transition(TaskStatus::Completed)?;
        self.output_path = Some(output_path.into());
        self.end_time = Some(Local::now());
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.transition(TaskStatus::Failed)?;
        self.error_message = Some(message.into());
        self.end_time = Some(Local::now());
        Ok(())
    }

    pub fn skip(&mut self, reason: impl Into<String>) -> Result<()> {
        self.transition(TaskStatus::Skipped)?;
        self.error_message = Some(reason.into());
        self.end_time = Some(Local::now());
        Ok(())
    }

    fn transition(&mut self, next: TaskStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(ModelError::InvalidTransition {
                task_id: self.task_id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Aggregate record of one orchestration run.
///
/// Task bookkeeping goes through the report so that the counters, the
/// artifact list and the error list always agree with the task list. Once
/// [`RunReport::finish`] has stamped the end time every mutator fails with
/// [`ModelError::ReportFinished`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    protocol_path: PathBuf,
    output_directory: PathBuf,
    start_time: DateTime<Local>,
    end_time: Option<DateTime<Local>>,
    total_tasks: usize,
    completed_tasks: usize,
    failed_tasks: usize,
    skipped_tasks: usize,
    tasks: Vec<WorkflowTask>,
    generated_files: Vec<PathBuf>,
    errors: Vec<String>,
    protocol_info: Option<ProtocolInfo>,
}

impl RunReport {
    pub fn new(protocol_path: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            protocol_path: protocol_path.into(),
            output_directory: output_directory.into(),
            start_time: Local::now(),
            end_time: None,
            total_tasks: 0,
            completed_tasks: 0,
            failed_tasks: 0,
            skipped_tasks: 0,
            tasks: Vec::new(),
            generated_files: Vec::new(),
            errors: Vec::new(),
            protocol_info: None,
        }
    }

    /// Append a new pending task and return its index.
    pub fn begin_task(&mut self, kind: TaskKind) -> Result<usize> {
        self.ensure_open()?;
        self.tasks.push(WorkflowTask::new(kind));
        self.total_tasks += 1;
        Ok(self.tasks.len() - 1)
    }

    pub fn start_task(&mut self, index: usize) -> Result<()> {
        self.ensure_open()?;
        self.task_mut(index)?.start()
    }

    pub fn complete_task(&mut self, index: usize, output_path: impl Into<PathBuf>) -> Result<()> {
        self.ensure_open()?;
        let output_path = output_path.into();
        self.task_mut(index)?.complete(output_path.clone())?;
        self.completed_tasks += 1;
        self.generated_files.push(output_path);
        Ok(())
    }

    pub fn fail_task(&mut self, index: usize, message: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        let message = message.into();
        let task = self.task_mut(index)?;
        task.fail(message.clone())?;
        let kind = task.kind();
        self.failed_tasks += 1;
        self.errors.push(format!("[{kind}] {message}"));
        Ok(())
    }

    /// The reason stays on the task; only failures enter `errors`.
    pub fn skip_task(&mut self, index: usize, reason: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.task_mut(index)?.skip(reason)?;
        self.skipped_tasks += 1;
        Ok(())
    }

    /// Record a supporting artifact that does not own a task of its own.
    pub fn add_generated_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.ensure_open()?;
        self.generated_files.push(path.into());
        Ok(())
    }

    /// Record an error that escaped step execution.
    pub fn record_error(&mut self, message: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.errors.push(message.into());
        Ok(())
    }

    pub fn set_protocol_info(&mut self, info: ProtocolInfo) -> Result<()> {
        self.ensure_open()?;
        self.protocol_info = Some(info);
        Ok(())
    }

    /// Stamp the end time. Further calls are no-ops.
    pub fn finish(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(Local::now());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn protocol_path(&self) -> &Path {
        &self.protocol_path
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn total_tasks(&self) -> usize {
        self.total_tasks
    }

    pub fn completed_tasks(&self) -> usize {
        self.completed_tasks
    }

    pub fn failed_tasks(&self) -> usize {
        self.failed_tasks
    }

    pub fn skipped_tasks(&self) -> usize {
        self.skipped_tasks
    }

    pub fn tasks(&self) -> &[WorkflowTask] {
        &self.tasks
    }

    pub fn task(&self, kind: TaskKind) -> Option<&WorkflowTask> {
        self.tasks.iter().find(|task| task.kind() == kind)
    }

    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn protocol_info(&self) -> Option<&ProtocolInfo> {
        self.protocol_info.as_ref()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_tasks > 0
    }

    /// Percentage of tasks that completed, `0.0` for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_tasks as f64 / self.total_tasks as f64 * 100.0
    }

    pub fn duration(&self) -> Option<TimeDelta> {
        self.end_time.map(|end| end - self.start_time)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_finished() {
            return Err(ModelError::ReportFinished);
        }
        Ok(())
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut WorkflowTask> {
        self.tasks
            .get_mut(index)
            .ok_or(ModelError::UnknownTask { index })
    }
}
