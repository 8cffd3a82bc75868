//! Closed enumerations for rule classification and workflow state.
//!
//! Each enum has a canonical string form (`as_str`), a `Display`
//! implementation that delegates to it, and a forgiving `FromStr` that
//! accepts the spellings found in configuration files and on the command
//! line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Importance of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks analysis; must be resolved before database lock.
    Critical,
    /// Affects data quality; should be resolved.
    Major,
    /// Cosmetic or informational.
    Minor,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Major, Severity::Minor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Major => "Major",
            Severity::Minor => "Minor",
        }
    }

    /// Definition used in document appendices.
    pub fn definition(&self) -> &'static str {
        match self {
            Severity::Critical => {
                "Issues that may affect subject safety or the primary endpoint and must be resolved before database lock."
            }
            Severity::Major => {
                "Issues that affect data quality or secondary endpoints and should be resolved before database lock."
            }
            Severity::Minor => "Issues of a cosmetic or informational nature that do not affect analysis.",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CRITICAL" => Ok(Severity::Critical),
            "MAJOR" => Ok(Severity::Major),
            "MINOR" => Ok(Severity::Minor),
            _ => Err(format!("Unknown severity: {s}")),
        }
    }
}

/// Category of a generated validation rule.
///
/// The category fixes the rule-id prefix: a rule whose id does not start
/// with `prefix()` cannot be produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCategory {
    RangeCheck,
    RequiredField,
    LogicalCheck,
    CrossForm,
    DateConsistency,
    ProtocolDeviation,
    Custom,
}

impl ValidationCategory {
    pub const ALL: [ValidationCategory; 7] = [
        ValidationCategory::RangeCheck,
        ValidationCategory::RequiredField,
        ValidationCategory::LogicalCheck,
        ValidationCategory::CrossForm,
        ValidationCategory::DateConsistency,
        ValidationCategory::ProtocolDeviation,
        ValidationCategory::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCategory::RangeCheck => "range_check",
            ValidationCategory::RequiredField => "required_field",
            ValidationCategory::LogicalCheck => "logical_check",
            ValidationCategory::CrossForm => "cross_form",
            ValidationCategory::DateConsistency => "date_consistency",
            ValidationCategory::ProtocolDeviation => "protocol_deviation",
            ValidationCategory::Custom => "custom",
        }
    }

    /// Human-readable name used in documents and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            ValidationCategory::RangeCheck => "Range Check",
            ValidationCategory::RequiredField => "Required Field",
            ValidationCategory::LogicalCheck => "Logical Check",
            ValidationCategory::CrossForm => "Cross-Form Validation",
            ValidationCategory::DateConsistency => "Date Consistency",
            ValidationCategory::ProtocolDeviation => "Protocol Deviation",
            ValidationCategory::Custom => "Custom",
        }
    }

    /// Rule-id prefix for this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            ValidationCategory::RangeCheck => "RNG",
            ValidationCategory::RequiredField => "REQ",
            ValidationCategory::LogicalCheck => "LOG",
            ValidationCategory::CrossForm => "CRS",
            ValidationCategory::DateConsistency => "DAT",
            ValidationCategory::ProtocolDeviation => "PRO",
            ValidationCategory::Custom => "CUS",
        }
    }
}

impl fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ValidationCategory {
    type Err = String;

    /// Accepts the snake-case form, the display name, or the id prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "RANGE_CHECK" | "RANGE" | "RNG" => Ok(ValidationCategory::RangeCheck),
            "REQUIRED_FIELD" | "REQUIRED" | "REQ" => Ok(ValidationCategory::RequiredField),
            "LOGICAL_CHECK" | "LOGICAL" | "LOG" => Ok(ValidationCategory::LogicalCheck),
            "CROSS_FORM" | "CROSS_FORM_VALIDATION" | "CRS" => Ok(ValidationCategory::CrossForm),
            "DATE_CONSISTENCY" | "DAT" => Ok(ValidationCategory::DateConsistency),
            "PROTOCOL_DEVIATION" | "PRO" => Ok(ValidationCategory::ProtocolDeviation),
            "CUSTOM" | "CUS" => Ok(ValidationCategory::Custom),
            _ => Err(format!("Unknown validation category: {s}")),
        }
    }
}

/// Data type of a CRF field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldDataType {
    Text,
    #[serde(alias = "number")]
    Numeric,
    Date,
    Dropdown,
    Checkbox,
}

impl FieldDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldDataType::Text => "text",
            FieldDataType::Numeric => "numeric",
            FieldDataType::Date => "date",
            FieldDataType::Dropdown => "dropdown",
            FieldDataType::Checkbox => "checkbox",
        }
    }

    /// Label shown in form tables.
    pub fn label(&self) -> &'static str {
        match self {
            FieldDataType::Text => "Text",
            FieldDataType::Numeric => "Number",
            FieldDataType::Date => "Date",
            FieldDataType::Dropdown => "Dropdown",
            FieldDataType::Checkbox => "Checkbox",
        }
    }

    /// Whether values are picked from an enumerated option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldDataType::Dropdown | FieldDataType::Checkbox)
    }
}

impl fmt::Display for FieldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldDataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TEXT" | "TEXTAREA" => Ok(FieldDataType::Text),
            "NUMERIC" | "NUMBER" => Ok(FieldDataType::Numeric),
            "DATE" => Ok(FieldDataType::Date),
            "DROPDOWN" | "RADIO" => Ok(FieldDataType::Dropdown),
            "CHECKBOX" => Ok(FieldDataType::Checkbox),
            _ => Err(format!("Unknown field data type: {s}")),
        }
    }
}

/// Lifecycle state of a workflow task.
///
/// `Pending -> Running -> {Completed | Failed | Skipped}`; a task may also
/// be skipped straight from `Pending`. Terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Skipped,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
            TaskStatus::Skipped => "skipped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Skipped
        )
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        match self {
            TaskStatus::Pending => matches!(next, TaskStatus::Running | TaskStatus::Skipped),
            TaskStatus::Running => next.is_terminal(),
            _ => false,
        }
    }

    /// Marker used in text reports and console summaries.
    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "...",
            TaskStatus::Running => "▶",
            TaskStatus::Completed => "✓",
            TaskStatus::Failed => "✗",
            TaskStatus::Skipped => "○",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of work a workflow task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    ProtocolParsing,
    Crf,
    Dvp,
    UserGuide,
    Dmp,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::ProtocolParsing => "protocol_parsing",
            TaskKind::Crf => "crf",
            TaskKind::Dvp => "dvp",
            TaskKind::UserGuide => "user_guide",
            TaskKind::Dmp => "dmp",
        }
    }

    /// Stable task identifier recorded in run reports.
    pub fn task_id(&self) -> &'static str {
        match self {
            TaskKind::ProtocolParsing => "parse_protocol",
            TaskKind::Crf => "generate_crf",
            TaskKind::Dvp => "generate_dvp",
            TaskKind::UserGuide => "generate_user_guide",
            TaskKind::Dmp => "generate_dmp",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document the workflow can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Crf,
    Dvp,
    UserGuide,
    Dmp,
}

impl DocumentKind {
    /// Every generatable document, in execution order.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Crf,
        DocumentKind::Dvp,
        DocumentKind::UserGuide,
        DocumentKind::Dmp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Crf => "crf",
            DocumentKind::Dvp => "dvp",
            DocumentKind::UserGuide => "user_guide",
            DocumentKind::Dmp => "dmp",
        }
    }

    /// File-name prefix of the generated artifact.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Crf => "CRF",
            DocumentKind::Dvp => "DVP",
            DocumentKind::UserGuide => "UserGuide",
            DocumentKind::Dmp => "DMP",
        }
    }

    pub fn task_kind(&self) -> TaskKind {
        match self {
            DocumentKind::Crf => TaskKind::Crf,
            DocumentKind::Dvp => TaskKind::Dvp,
            DocumentKind::UserGuide => TaskKind::UserGuide,
            DocumentKind::Dmp => TaskKind::Dmp,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "crf" => Ok(DocumentKind::Crf),
            "dvp" => Ok(DocumentKind::Dvp),
            "user_guide" | "userguide" | "guide" => Ok(DocumentKind::UserGuide),
            "dmp" => Ok(DocumentKind::Dmp),
            _ => Err(format!("Unknown document kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefixes_are_distinct() {
        let mut prefixes: Vec<&str> = ValidationCategory::ALL.iter().map(|c| c.prefix()).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), ValidationCategory::ALL.len());
    }

    #[test]
    fn category_parses_display_name() {
        assert_eq!(
            "Cross-Form Validation".parse::<ValidationCategory>(),
            Ok(ValidationCategory::CrossForm)
        );
        assert_eq!(
            "range_check".parse::<ValidationCategory>(),
            Ok(ValidationCategory::RangeCheck)
        );
        assert!("bogus".parse::<ValidationCategory>().is_err());
    }

    #[test]
    fn severity_round_trips_through_str() {
        for severity in Severity::ALL {
            assert_eq!(severity.as_str().parse::<Severity>(), Ok(severity));
        }
        assert_eq!(" major ".parse::<Severity>(), Ok(Severity::Major));
    }

    #[test]
    fn terminal_states_accept_no_transition() {
        let all = [
            TaskStatus::Pending,
            TaskStatus::Running,
            TaskStatus::Completed,
            TaskStatus::Failed,
            TaskStatus::Skipped,
        ];
        for from in all.iter().filter(|s| s.is_terminal()) {
            for to in all {
                assert!(!from.can_transition_to(to));
            }
        }
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::Running));
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Completed));
    }

    #[test]
    fn document_kind_accepts_cli_spelling() {
        assert_eq!("user-guide".parse::<DocumentKind>(), Ok(DocumentKind::UserGuide));
        assert_eq!(DocumentKind::UserGuide.task_kind().task_id(), "generate_user_guide");
    }
}
