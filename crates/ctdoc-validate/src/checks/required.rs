use ctdoc_model::{FieldDefinition, Severity, ValidationCategory};

use super::RuleDraft;

/// One critical rule per required field.
pub(crate) fn check(fields: &[FieldDefinition]) -> Vec<RuleDraft> {
    fields
        .iter()
        .filter(|field| field.required)
        .map(|field| {
            RuleDraft::new(
                ValidationCategory::RequiredField,
                Severity::Critical,
                format!(
                    "Check that {} ({}) in {} is not missing",
                    field.label, field.name, field.form_name
                ),
                format!("Please provide the missing value for {}.", field.label),
            )
            .for_field(field)
        })
        .collect()
}
