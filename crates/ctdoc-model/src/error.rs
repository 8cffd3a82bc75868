use thiserror::Error;

use crate::enums::TaskStatus;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{field} cannot be empty")]
    EmptyRuleField { field: &'static str },

    #[error("rule id {rule_id} does not carry the {expected} prefix")]
    PrefixMismatch {
        rule_id: String,
        expected: &'static str,
    },

    #[error("field {name}: minimum {min} is greater than maximum {max}")]
    InvalidBounds { name: String, min: f64, max: f64 },

    #[error("task {task_id}: cannot transition from {from} to {to}")]
    InvalidTransition {
        task_id: String,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("no task at index {index}")]
    UnknownTask { index: usize },

    #[error("run report is finished and can no longer change")]
    ReportFinished,
}

pub type Result<T> = std::result::Result<T, ModelError>;
