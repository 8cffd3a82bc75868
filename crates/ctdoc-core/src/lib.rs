#![deny(unsafe_code)]

//! Workflow orchestration for clinical document generation.
//!
//! [`Automation`] runs parse, CRF, DVP, user guide and DMP steps against a
//! single protocol and records every step in a
//! [`RunReport`](ctdoc_model::RunReport). [`BatchRunner`] repeats that over
//! several protocols and writes an aggregate summary.

pub mod automation;
pub mod batch;
pub mod error;
pub mod options;
pub mod report;

pub use automation::{Automation, StepOutcome};
pub use batch::{BatchEntry, BatchFailure, BatchRunner, BatchSummary, BatchTotals};
pub use error::{Result, StepError, WorkflowError};
pub use options::WorkflowOptions;
pub use report::{render_text_report, write_run_report};
