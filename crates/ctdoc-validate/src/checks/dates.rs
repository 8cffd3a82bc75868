//! Date consistency heuristics keyed on field names.

use std::sync::LazyLock;

use regex::Regex;

use ctdoc_model::{FieldDataType, FieldDefinition, Severity, ValidationCategory};

use super::RuleDraft;

/// Direction of a date comparison against the reference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateComparison {
    OnOrBefore,
    OnOrAfter,
}

impl DateComparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateComparison::OnOrBefore => "on_or_before",
            DateComparison::OnOrAfter => "on_or_after",
        }
    }
}

pub(crate) struct DatePattern {
    pub pattern: Regex,
    pub reference_field: &'static str,
    pub comparison: DateComparison,
    pub description: &'static str,
}

/// Name patterns, matched in order against the lower-cased field name.
static DATE_PATTERNS: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    [
        (
            r"inform.*consent.*date",
            "study_start_date",
            DateComparison::OnOrBefore,
            "Informed consent date should be on or before the study start date",
        ),
        (
            r"visit.*date",
            "inform_consent_date",
            DateComparison::OnOrAfter,
            "Visit date should be on or after informed consent date",
        ),
        (
            r"ae.*start.*date",
            "ae_end_date",
            DateComparison::OnOrBefore,
            "Adverse event start date should be on or before end date",
        ),
    ]
    .into_iter()
    .map(|(pattern, reference_field, comparison, description)| DatePattern {
        pattern: Regex::new(pattern).expect("invalid date pattern"),
        reference_field,
        comparison,
        description,
    })
    .collect()
});

/// One major rule per (date field, matching pattern) pair.
pub(crate) fn check(fields: &[FieldDefinition]) -> Vec<RuleDraft> {
    let mut drafts = Vec::new();
    for field in fields
        .iter()
        .filter(|field| field.data_type == FieldDataType::Date)
    {
        let name = field.name.to_lowercase();
        for rule in DATE_PATTERNS
            .iter()
            .filter(|rule| rule.pattern.is_match(&name))
        {
            drafts.push(
                RuleDraft::new(
                    ValidationCategory::DateConsistency,
                    Severity::Major,
                    rule.description.to_string(),
                    format!(
                        "Please verify the date for {}. {}.",
                        field.label, rule.description
                    ),
                )
                .for_field(field)
                .detail("reference_field", rule.reference_field)
                .detail("check_type", rule.comparison.as_str()),
            );
        }
    }
    drafts
}
