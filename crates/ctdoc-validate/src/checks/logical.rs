use ctdoc_model::{FieldDefinition, Severity, ValidationCategory};

use super::RuleDraft;

const TRIGGER_WORDS: [&str; 2] = ["indicate", "occurred"];

/// "If Yes, give details" rules for indicator fields.
pub(crate) fn check(fields: &[FieldDefinition]) -> Vec<RuleDraft> {
    fields
        .iter()
        .filter(|field| {
            let name = field.name.to_lowercase();
            TRIGGER_WORDS.iter().any(|word| name.contains(word))
                && field.valid_values.iter().any(|value| value == "Yes")
        })
        .map(|field| {
            RuleDraft::new(
                ValidationCategory::LogicalCheck,
                Severity::Major,
                format!(
                    "If {} is 'Yes', associated details must be provided",
                    field.label
                ),
                format!(
                    "Please provide details for {} as it is marked as 'Yes'.",
                    field.label
                ),
            )
            .for_field(field)
            .detail("condition", "value = 'Yes'")
        })
        .collect()
}
