//! Data model shared by every crate in the clinical document workspace.
//!
//! Protocol metadata, CRF field definitions, validation rules and the
//! workflow task/report bookkeeping all live here so that downstream
//! crates agree on one representation.

pub mod enums;
pub mod error;
pub mod field;
pub mod protocol;
pub mod rule;
pub mod workflow;

pub use enums::{DocumentKind, FieldDataType, Severity, TaskKind, TaskStatus, ValidationCategory};
pub use error::{ModelError, Result};
pub use field::FieldDefinition;
pub use protocol::ProtocolInfo;
pub use rule::{CustomRule, RuleDetails, RuleRecord, ValidationRule};
pub use workflow::{RunReport, WorkflowTask};
